use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("invalid maze file: {0}")]
    InvalidFormat(&'static str),
    #[error("maze file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}
