use crate::types::course::{Course, CourseId, FileName};

/// Marker inserted between the base name and the version number of a derived draft.
pub const DRAFT_MARKER: &str = "草稿";

/// Next version for the lineage rooted at `root`: one past the highest version
/// among the drafts currently derived from it, starting at 1.
pub fn next_draft_version<'a>(drafts: impl IntoIterator<Item = &'a Course>, root: CourseId) -> u32 {
    drafts
        .into_iter()
        .filter(|d| d.original_id == Some(root))
        .filter_map(|d| d.draft_version)
        .max()
        .unwrap_or(0)
        + 1
}

/// Builds `<stem>-草稿<version>.<ext>` from the lineage root's file name.
pub fn draft_title(root_name: &FileName, version: u32) -> String {
    match &root_name.extension {
        Some(ext) => format!("{}-{}{}.{}", root_name.stem, DRAFT_MARKER, version, ext),
        None => format!("{}-{}{}", root_name.stem, DRAFT_MARKER, version),
    }
}
