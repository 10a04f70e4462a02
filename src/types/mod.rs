pub mod catalog;
pub mod course;
pub mod history;
pub mod media;
pub mod playback_state;
pub mod session;
