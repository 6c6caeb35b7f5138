pub mod corpus_server;

/// UTF-16LE with BOM, the encoding the Tipitaka site uses for TOC documents.
pub fn utf16le(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}
