use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::media::{Content, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn new() -> Self {
        CourseId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CourseId {
    fn from(id: Uuid) -> Self {
        CourseId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
}

/// An uploaded file name split at its last `.`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileName {
    pub stem: String,
    /// Extension as written by the uploader, without the dot.
    pub extension: Option<String>,
}

impl FileName {
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !ext.is_empty() => FileName {
                stem: stem.to_string(),
                extension: Some(ext.to_string()),
            },
            _ => FileName {
                stem: name.to_string(),
                extension: None,
            },
        }
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extension {
            Some(ext) => write!(f, "{}.{}", self.stem, ext),
            None => f.write_str(&self.stem),
        }
    }
}

/// A media asset held by the catalog, either as a draft or as a published copy.
///
/// Records are only built by the catalog. Fields are read through accessors so
/// a caller holding a clone cannot rewrite its kind or lineage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub(crate) id: CourseId,
    pub(crate) title: String,
    pub(crate) kind: MediaKind,
    pub(crate) status: CourseStatus,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(rename = "contentSize")]
    pub(crate) content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) original_id: Option<CourseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) draft_version: Option<u32>,
    /// File name of the lineage root; derived titles are built from this.
    #[serde(skip)]
    pub(crate) root_name: FileName,
}

impl Course {
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn status(&self) -> CourseStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Lineage root this record was derived from, if any.
    pub fn original_id(&self) -> Option<CourseId> {
        self.original_id
    }

    pub fn draft_version(&self) -> Option<u32> {
        self.draft_version
    }

    /// The id every derived draft of this course is keyed under.
    pub fn lineage_root(&self) -> CourseId {
        self.original_id.unwrap_or(self.id)
    }

    pub fn root_name(&self) -> &FileName {
        &self.root_name
    }

    pub fn is_draft(&self) -> bool {
        self.status == CourseStatus::Draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_name() {
        let name = FileName::parse("lecture1.mp4");
        assert_eq!(name.stem, "lecture1");
        assert_eq!(name.extension.as_deref(), Some("mp4"));
        assert_eq!(name.to_string(), "lecture1.mp4");
    }

    #[test]
    fn test_parse_multiple_dots_splits_at_last() {
        let name = FileName::parse("week.2.final.MOV");
        assert_eq!(name.stem, "week.2.final");
        assert_eq!(name.extension.as_deref(), Some("MOV"));
    }

    #[test]
    fn test_parse_without_extension() {
        assert_eq!(
            FileName::parse("README"),
            FileName {
                stem: "README".to_string(),
                extension: None
            }
        );
        assert_eq!(FileName::parse("trailing.").extension, None);
        assert_eq!(FileName::parse("trailing.").to_string(), "trailing.");
    }

    #[test]
    fn test_course_ids_are_unique() {
        let a = CourseId::new();
        let b = CourseId::new();
        assert_ne!(a, b);
    }
}
