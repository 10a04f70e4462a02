use crate::error::{Error, Result};
use crate::types::course::FileName;
use crate::types::media::MediaKind;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "flv", "wmv", "mkv", "3gp"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac", "wma", "ogg"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "svg"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "doc", "docx", "pdf", "rtf", "html", "dot", "dotx", "xls", "xlsx", "xlt", "xltx", "xlsm",
    "ppt", "pptx", "pot", "potx", "ppsx",
];

/// Ingestion allow-list, in the order the tables are checked.
/// Text is checked before document so a shared extension would resolve to text.
const KIND_TABLE: [(MediaKind, &[&str]); 5] = [
    (MediaKind::Video, VIDEO_EXTENSIONS),
    (MediaKind::Audio, AUDIO_EXTENSIONS),
    (MediaKind::Image, IMAGE_EXTENSIONS),
    (MediaKind::Text, TEXT_EXTENSIONS),
    (MediaKind::Document, DOCUMENT_EXTENSIONS),
];

/// Maps a lowercase extension (without the dot) to its kind.
pub fn kind_for_extension(ext: &str) -> Option<MediaKind> {
    KIND_TABLE
        .iter()
        .find(|(_, exts)| exts.contains(&ext))
        .map(|(kind, _)| *kind)
}

/// Classifies a file by the text after its last `.`, ignoring case.
/// Names without an extension, or with one outside the allow-list, are rejected.
pub fn classify(file_name: &str) -> Result<MediaKind> {
    FileName::parse(file_name)
        .extension
        .as_deref()
        .map(str::to_lowercase)
        .and_then(|ext| kind_for_extension(&ext))
        .ok_or_else(|| Error::UnsupportedFileType {
            file_name: file_name.to_string(),
        })
}

/// Every extension accepted at ingestion.
pub fn allowed_extensions() -> impl Iterator<Item = &'static str> {
    KIND_TABLE.iter().flat_map(|(_, exts)| exts.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classify_each_table() {
        for (kind, exts) in KIND_TABLE {
            for ext in exts {
                let name = format!("lesson.{}", ext);
                assert_eq!(classify(&name).unwrap(), kind, "{}", name);
            }
        }
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("LECTURE.MP4").unwrap(), MediaKind::Video);
        assert_eq!(classify("Notes.Md").unwrap(), MediaKind::Text);
        assert_eq!(classify("slides.PPTX").unwrap(), MediaKind::Document);
    }

    #[test]
    fn test_classify_uses_last_dot() {
        assert_eq!(classify("week.1.intro.mov").unwrap(), MediaKind::Video);
        assert_eq!(classify("song.mp4.wav").unwrap(), MediaKind::Audio);
    }

    #[test]
    fn test_classify_rejects_unknown_and_missing_extensions() {
        for name in ["notes.xyz", "README", "trailing.", "archive.tar.gz", ""] {
            assert_eq!(
                classify(name),
                Err(Error::UnsupportedFileType {
                    file_name: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_tables_are_disjoint() {
        let all: Vec<_> = allowed_extensions().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
    }
}
