pub mod error;
pub mod ops;
pub mod renderer;
pub mod types;

pub use error::{Error, Result};
pub use ops::classify::classify;
pub use renderer::playback_surface::{DetachedSurface, PlaybackSurface};
pub use types::catalog::{Catalog, CatalogSnapshot};
pub use types::course::{Course, CourseId, CourseStatus};
pub use types::history::{EditHistory, EditOperation, EditTool};
pub use types::media::{Content, MediaKind};
pub use types::playback_state::{PlaybackState, PlaybackStatus, format_timestamp};
pub use types::session::EditSession;
