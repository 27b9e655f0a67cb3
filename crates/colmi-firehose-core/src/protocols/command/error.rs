use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("sub data too long: {len} bytes, at most {max} allowed")]
    SubDataTooLong { len: usize, max: usize },
}
