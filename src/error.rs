use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// Not a number, or trailing characters after one. `quoted` is the
    /// argument as a C string literal, quotes included.
    #[error("Invalid seed {quoted}")]
    Invalid { quoted: String },

    /// Parsed, but does not fit in 32 bits.
    #[error("Seed {0} is not in range [0, {max}]", max = u32::MAX)]
    OutOfRange(u64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    Dimension {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown glyph style {0:?} (expected rounded, square or ascii)")]
    UnknownStyle(String),
}
