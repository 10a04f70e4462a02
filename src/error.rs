use thiserror::Error;

use crate::types::course::CourseId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unsupported file type: {file_name}")]
    UnsupportedFileType { file_name: String },

    #[error("Course not found: {0}")]
    NotFound(CourseId),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, Error>;
