//! CLI command handlers, one file per command.

mod download;
mod route;
mod tree;

pub use download::run_download;
pub use route::run_route;
pub use tree::run_tree;
