use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Editing tools offered by the console. None of them rewrite the payload yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTool {
    Cut,
    Audio,
    Text,
    Sticker,
    Effect,
    Subtitle,
    Template,
}

impl EditTool {
    pub const ALL: [EditTool; 7] = [
        EditTool::Cut,
        EditTool::Audio,
        EditTool::Text,
        EditTool::Sticker,
        EditTool::Effect,
        EditTool::Subtitle,
        EditTool::Template,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EditTool::Cut => "cut",
            EditTool::Audio => "audio",
            EditTool::Text => "text",
            EditTool::Sticker => "sticker",
            EditTool::Effect => "effect",
            EditTool::Subtitle => "subtitle",
            EditTool::Template => "template",
        }
    }

    pub fn parse(name: &str) -> Option<EditTool> {
        EditTool::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EditTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the undo/redo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOperation {
    pub tool: EditTool,
    /// Playhead position when the tool was applied, in seconds.
    pub at: f64,
    pub note: Option<String>,
}

impl EditOperation {
    pub fn new(tool: EditTool, at: f64) -> Self {
        EditOperation {
            tool,
            at,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Linear undo/redo history.
///
/// `cursor` is the index of the current entry, `None` while the history is
/// empty. Recording after an undo drops every entry past the cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditHistory {
    entries: Vec<EditOperation>,
    cursor: Option<usize>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, op: EditOperation) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(op);
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn undo(&mut self) -> Result<&EditOperation> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                Ok(&self.entries[c - 1])
            }
            _ => Err(Error::NothingToUndo),
        }
    }

    pub fn redo(&mut self) -> Result<&EditOperation> {
        match self.cursor {
            Some(c) if c + 1 < self.entries.len() => {
                self.cursor = Some(c + 1);
                Ok(&self.entries[c + 1])
            }
            _ => Err(Error::NothingToRedo),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&EditOperation> {
        self.cursor.map(|c| &self.entries[c])
    }

    pub fn entries(&self) -> &[EditOperation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> EditHistory {
        let mut history = EditHistory::new();
        for i in 0..n {
            history.record(EditOperation::new(EditTool::ALL[i % 7], i as f64));
        }
        history
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = EditHistory::new();
        assert_eq!(history.undo(), Err(Error::NothingToUndo));
        assert_eq!(history.cursor(), None);
        assert_eq!(history.redo(), Err(Error::NothingToRedo));
    }

    #[test]
    fn test_record_moves_cursor_to_last() {
        let history = history_of(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.current().unwrap().tool, EditTool::Text);
    }

    #[test]
    fn test_first_entry_cannot_be_undone() {
        let mut history = history_of(1);
        assert!(!history.can_undo());
        assert_eq!(history.undo(), Err(Error::NothingToUndo));
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        for len in 1..6 {
            for k in 0..=len {
                let mut history = history_of(len);
                let start = history.cursor();
                for _ in 0..k {
                    let _ = history.undo();
                }
                for _ in 0..k {
                    let _ = history.redo();
                }
                assert_eq!(history.cursor(), start, "len {} k {}", len, k);
            }
        }
    }

    #[test]
    fn test_record_after_undo_drops_redo_branch() {
        let mut history = history_of(4);
        history.undo().unwrap();
        history.undo().unwrap();
        let cursor_before = history.cursor().unwrap();
        assert_eq!(cursor_before, 1);

        history.record(EditOperation::new(EditTool::Subtitle, 7.0).with_note("intro"));
        assert_eq!(history.len(), cursor_before + 2);
        assert_eq!(history.cursor(), Some(cursor_before + 1));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), Err(Error::NothingToRedo));
        assert_eq!(history.current().unwrap().note.as_deref(), Some("intro"));
    }

    #[test]
    fn test_redo_at_end() {
        let mut history = history_of(2);
        assert_eq!(history.redo(), Err(Error::NothingToRedo));
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_tool_parse() {
        assert_eq!(EditTool::parse("CUT"), Some(EditTool::Cut));
        assert_eq!(EditTool::parse("subtitle"), Some(EditTool::Subtitle));
        assert_eq!(EditTool::parse("zoom"), None);
    }
}
