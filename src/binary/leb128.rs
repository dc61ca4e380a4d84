use anyhow::{Result, bail};

/// Encode a non-negative integer as canonical ULEB128, shortest form.
/// Zero encodes as exactly one `0x00` byte.
pub fn encode_unsigned(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![];
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
        if value == 0 {
            break;
        }
    }
    bytes
}

/// Encode a signed integer as canonical SLEB128.
///
/// The supported range is 33-bit two's complement (what wasm's widest
/// signed immediate needs); values beyond it are rejected rather than
/// truncated.
pub fn encode_signed(mut value: i64) -> Result<Vec<u8>> {
    if !((-1 << 32)..(1 << 32)).contains(&value) {
        bail!("value out of the supported 33-bit signed range: {}", value);
    }
    let mut bytes = vec![];
    loop {
        let byte = (value & 0x7f) as u8;
        // arithmetic shift, so the sign propagates
        value >>= 7;
        let sign_bit_clear = byte & 0x40 == 0;
        if (value == 0 && sign_bit_clear) || (value == -1 && !sign_bit_clear) {
            bytes.push(byte);
            break;
        }
        bytes.push(byte | 0x80);
    }
    Ok(bytes)
}
