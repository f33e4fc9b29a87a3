use std::collections::TryReserveError;

/// Errors surfaced at the edges of the render pipeline.
///
/// Synthesis itself is total; only buffer acquisition, geometry checks and
/// output I/O can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to allocate a buffer of {samples} samples")]
    Allocation {
        samples: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    /// The RIFF size fields are 32 bits wide.
    #[error("{samples} samples do not fit in a WAV data chunk")]
    DataTooLarge { samples: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
