use thiserror::Error;

pub type PalResult<T> = std::result::Result<T, PalError>;

#[derive(Error, Debug)]
pub enum PalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("nix errno: {0}")]
    Nix(#[from] nix::errno::Errno),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Platform query failed: {0}")]
    Platform(String),
}

impl PalError {
    /// Maps an I/O error from a path-taking syscall to the PAL taxonomy,
    /// keeping the offending path in the message.
    pub(crate) fn from_path_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => PalError::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                PalError::PermissionDenied(path.display().to_string())
            }
            _ => PalError::Io(err),
        }
    }
}
