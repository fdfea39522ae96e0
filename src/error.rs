//! Error type shared by configuration, scheduling and persistence.

use std::path::PathBuf;

/// Everything that can stop a run.
///
/// Configuration errors are raised before any job is dispatched; I/O and
/// encoder errors are fatal to the run in progress.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("density must be at least 1")]
    ZeroDensity,
    #[error("size class has an empty canvas ({width}x{height})")]
    EmptySize { width: u32, height: u32 },
    #[error("no size class named '{0}'")]
    UnknownSizeClass(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("a render worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, Error>;
