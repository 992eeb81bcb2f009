//! Byte-count helpers.

/// Bytes per kibibyte.
pub const KB: u64 = 1024;
/// Bytes per mebibyte.
pub const MB: u64 = 1024 * KB;
/// Bytes per gibibyte.
pub const GB: u64 = 1024 * MB;

/// Convert mebibytes to bytes, saturating on overflow.
#[must_use]
pub const fn megabytes(mb: u64) -> u64 {
    mb.saturating_mul(MB)
}

/// Convert kibibytes to bytes, saturating on overflow.
#[must_use]
pub const fn kilobytes(kb: u64) -> u64 {
    kb.saturating_mul(KB)
}

/// Render a byte count using the largest unit that divides it exactly.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    match bytes {
        0 => "0B".to_string(),
        b if b % GB == 0 => format!("{}GB", b / GB),
        b if b % MB == 0 => format!("{}MB", b / MB),
        b if b % KB == 0 => format!("{}KB", b / KB),
        b => format!("{b}B"),
    }
}
