use thiserror::Error;

/// Errors returned by firehose decoding.
///
/// Both variants are recoverable: the caller drops the packet and keeps
/// decoding the stream.
///
/// # Examples
/// ```
/// use colmi_firehose_core::protocols::firehose::error::FirehoseError;
///
/// let err = FirehoseError::UnrecognizedKind { tag: 99 };
/// assert!(err.to_string().contains("unrecognized firehose kind"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FirehoseError {
    #[error("unrecognized firehose kind: {tag}")]
    UnrecognizedKind { tag: u8 },
    #[error("packet out of bounds: need {needed} bytes, got {actual}")]
    OutOfBounds { needed: usize, actual: usize },
}
