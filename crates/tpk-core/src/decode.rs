//! Decoding of table-of-contents documents.
//!
//! The Tipitaka site serves its TOC files as UTF-16 XML. Bytes are first turned
//! into text (BOM selects byte order, little-endian otherwise), then the nested
//! `<tree>` elements are parsed into [`Tree`] values.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DecodeError;
use crate::tree::{Node, Tree};

const TREE_TAG: &[u8] = b"tree";

/// Decodes a downloaded TOC document.
pub fn decode(bytes: &[u8]) -> Result<Tree, DecodeError> {
    let text = decode_utf16(bytes)?;
    parse_tree(&text)
}

/// Converts UTF-16 bytes (with or without BOM) to a `String`.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let (encoding, body) = split_bom(bytes);
    if body.len() % 2 != 0 {
        return Err(DecodeError::OddLength { len: bytes.len() });
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or(DecodeError::Encoding)
}

fn split_bom(bytes: &[u8]) -> (&'static Encoding, &[u8]) {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
        [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
        _ => (UTF_16LE, bytes),
    }
}

/// Element being built while its end tag has not been seen yet.
#[derive(Default)]
struct Pending {
    text: String,
    src: String,
    action: String,
    children: Vec<Tree>,
}

impl Pending {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let mut p = Pending::default();
        for attr in e.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                b"text" => p.text = value,
                b"src" => p.src = value,
                b"action" => p.action = value,
                _ => {}
            }
        }
        Ok(p)
    }

    /// `src` wins over `action`, which wins over inline children.
    fn finish(self) -> Tree {
        let node = if !self.src.is_empty() {
            if !self.children.is_empty() || !self.action.is_empty() {
                tracing::debug!(src = %self.src, "ignoring inline content of deferred node");
            }
            Node::Deferred(self.src)
        } else if !self.action.is_empty() {
            Node::Leaf(self.action)
        } else {
            Node::Branch(self.children)
        };
        Tree {
            text: self.text,
            node,
        }
    }
}

/// Parses XML text whose root element is `<tree>`.
///
/// Child elements other than `<tree>` are skipped together with their content.
pub fn parse_tree(xml: &str) -> Result<Tree, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Pending> = Vec::new();
    // Depth inside an ignored element; zero while not skipping.
    let mut skip_depth = 0usize;
    let mut root: Option<Tree> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else if e.name().as_ref() == TREE_TAG {
                    check_single_root(&root, &stack, e)?;
                    stack.push(Pending::from_start(e)?);
                } else if stack.is_empty() {
                    return Err(unexpected_root(e));
                } else {
                    skip_depth = 1;
                }
            }
            Event::Empty(ref e) => {
                if skip_depth > 0 {
                    continue;
                }
                if e.name().as_ref() == TREE_TAG {
                    check_single_root(&root, &stack, e)?;
                    let tree = Pending::from_start(e)?.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(tree),
                        None => root = Some(tree),
                    }
                } else if stack.is_empty() {
                    return Err(unexpected_root(e));
                }
            }
            Event::End(_) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                // End names are checked by the reader, so this closes a <tree>.
                if let Some(done) = stack.pop() {
                    let tree = done.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(tree),
                        None => root = Some(tree),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() || skip_depth > 0 {
        return Err(DecodeError::Unterminated);
    }
    root.ok_or(DecodeError::NoRoot)
}

fn check_single_root(
    root: &Option<Tree>,
    stack: &[Pending],
    e: &BytesStart<'_>,
) -> Result<(), DecodeError> {
    if root.is_some() && stack.is_empty() {
        return Err(unexpected_root(e));
    }
    Ok(())
}

fn unexpected_root(e: &BytesStart<'_>) -> DecodeError {
    DecodeError::UnexpectedRoot {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
    }
}

#[cfg(test)]
pub(crate) fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}
