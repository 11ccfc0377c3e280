use crate::types::BootImageError;

/// Narrow a 64-bit value from the source executable to the 32-bit wire width.
/// Values that do not fit are rejected instead of truncated.
pub fn to_u32(field: &'static str, value: u64) -> Result<u32, BootImageError> {
    u32::try_from(value).map_err(|_| BootImageError::FieldOverflow { field, value })
}

/// Short printable preview of a byte slice for log lines.
pub fn fmt_bytes(b: &[u8], max: usize) -> String {
    if b.len() <= max {
        format!("0x{}", hex::encode(b))
    } else {
        format!("0x{}.. ({} bytes)", hex::encode(&b[..max]), b.len())
    }
}
