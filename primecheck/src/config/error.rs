/// Configuration error variants.
#[derive(Debug, thiserror::Error)]
pub enum PrimecheckConfigError {
    /// The read buffer is too small to read efficiently.
    #[error("The read buffer must be at least {min} bytes, got {0}", min = super::MIN_READ_BUFFER_SIZE)]
    ReadBufferTooSmall(usize),

    /// The write buffer cannot hold a single verdict line.
    #[error("The write buffer must be at least {min} bytes, got {0}", min = super::MIN_WRITE_BUFFER_SIZE)]
    WriteBufferTooSmall(usize),

    /// A buffer size exceeds the supported maximum.
    #[error("The {0} buffer must be at most {max} bytes, got {1}", max = super::MAX_BUFFER_SIZE)]
    BufferTooLarge(&'static str, usize),
}
