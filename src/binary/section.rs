use super::leb128;
use anyhow::{Context as _, Result};
use num_derive::FromPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum SectionCode {
    Custom = 0x00,
    Type = 0x01,
    Import = 0x02,
    Function = 0x03,
    Table = 0x04,
    Memory = 0x05,
    Global = 0x06,
    Export = 0x07,
    Start = 0x08,
    Element = 0x09,
    Code = 0x0a,
    Data = 0x0b,
    DataCount = 0x0c,
}

/// Wrap section content with its id and ULEB128-encoded byte length.
pub fn frame(code: SectionCode, content: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(content.len())
        .with_context(|| format!("section {:?} content exceeds the u32 size range", code))?;
    let mut section = vec![code as u8];
    section.extend(leb128::encode_unsigned(len));
    section.extend_from_slice(content);
    Ok(section)
}
