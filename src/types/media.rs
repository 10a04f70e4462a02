use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

/// Semantic kind of a course, fixed when the file is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
    Text,
    Document,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Video,
        MediaKind::Audio,
        MediaKind::Image,
        MediaKind::Text,
        MediaKind::Document,
    ];

    /// Video and audio carry a timeline; everything else has no playback position.
    pub fn is_time_based(self) -> bool {
        match self {
            MediaKind::Video | MediaKind::Audio => true,
            MediaKind::Image | MediaKind::Text | MediaKind::Document => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
            MediaKind::Text => "text",
            MediaKind::Document => "document",
        }
    }

    /// Label shown on course cards in the console.
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "视频",
            MediaKind::Audio => "音频",
            MediaKind::Image => "图片",
            MediaKind::Text => "文本",
            MediaKind::Document => "文档",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to an immutable binary payload.
///
/// Cloning a `Content` clones the handle, never the bytes. Edits that change
/// the payload must build a new `Content` instead of touching this one.
#[derive(Clone, PartialEq, Eq)]
pub struct Content {
    bytes: Arc<[u8]>,
}

impl Content {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Content {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when both handles point at the same payload.
    pub fn ptr_eq(&self, other: &Content) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::new(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Content::new(bytes)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("len", &self.bytes.len())
            .finish()
    }
}

// Snapshots only expose the payload size.
impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_payload() {
        let content = Content::from(vec![1u8, 2, 3]);
        let copy = content.clone();
        assert!(content.ptr_eq(&copy));
        assert_eq!(copy.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_equal_bytes_are_distinct_handles() {
        let a = Content::from(vec![7u8; 4]);
        let b = Content::from(vec![7u8; 4]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_time_based_kinds() {
        let timed: Vec<_> = MediaKind::ALL
            .iter()
            .filter(|k| k.is_time_based())
            .collect();
        assert_eq!(timed, vec![&MediaKind::Video, &MediaKind::Audio]);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Document).unwrap();
        assert_eq!(json, "\"document\"");
        assert_eq!(MediaKind::Video.label(), "视频");
    }
}
