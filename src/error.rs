use core::fmt;
use std::io;

/// An error produced while decoding an `-lh4-`/`-lh5-`/`-lh6-`/`-lh7-` compressed stream.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The byte source failed, or was exhausted mid-symbol or mid-field.
    Io(io::Error),
    /// A decode-breaking condition was detected without an I/O failure: an over- or
    /// under-subscribed Huffman code table, or a structurally nonsensical block header field.
    Malformed(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io(e) => e.fmt(f),
            DecodeError::Malformed(reason) => write!(f, "malformed compressed stream: {}", reason),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(e) => Some(e),
            DecodeError::Malformed(_) => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        DecodeError::Io(e)
    }
}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Io(e) => e,
            DecodeError::Malformed(reason) => io::Error::new(io::ErrorKind::InvalidData, reason),
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_displays_reason() {
        let err = DecodeError::Malformed("too many leaves");
        assert_eq!(err.to_string(), "malformed compressed stream: too many leaves");
    }

    #[test]
    fn io_error_round_trips() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: DecodeError = io_err.into();
        assert!(matches!(err, DecodeError::Io(_)));
        let back: io::Error = err.into();
        assert_eq!(back.kind(), io::ErrorKind::UnexpectedEof);
    }
}
