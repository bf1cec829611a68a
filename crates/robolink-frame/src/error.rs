/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The buffer is smaller than the 2-byte frame header.
    #[error("buffer too short for frame header ({len} bytes, need 2)")]
    TooShort { len: usize },

    /// The declared payload length does not fit in the buffer.
    #[error("declared payload length {declared} exceeds buffer ({actual} bytes)")]
    LengthMismatch { declared: usize, actual: usize },

    /// The kind byte is outside the expected domain for this decode path.
    #[error("unexpected frame kind {kind:#04x} (expected {expected:#04x})")]
    BadKind { kind: u8, expected: u8 },

    /// Catch-all for inputs that cannot be framed or interpreted at all.
    #[error("malformed frame: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
