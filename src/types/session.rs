use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::renderer::playback_surface::{DetachedSurface, PlaybackSurface};
use crate::types::course::Course;
use crate::types::history::{EditHistory, EditOperation, EditTool};
use crate::types::media::{Content, MediaKind};
use crate::types::playback_state::PlaybackState;

#[derive(Debug, Clone)]
struct LoadedFile {
    content: Content,
    kind: MediaKind,
}

/// Editing context for one file: playhead, play/pause state and undo history.
///
/// The session holds its own handle to the payload for as long as the file is
/// loaded. The surface binding is released on reload, on `close` and on drop.
/// Edit tools never write into the loaded payload; `export` hands back the
/// current handle for the caller to save or publish.
pub struct EditSession<S: PlaybackSurface = DetachedSurface> {
    surface: S,
    loaded: Option<LoadedFile>,
    playback: PlaybackState,
    history: EditHistory,
}

impl EditSession<DetachedSurface> {
    pub fn new() -> Self {
        Self::with_surface(DetachedSurface::new())
    }
}

impl Default for EditSession<DetachedSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlaybackSurface> EditSession<S> {
    pub fn with_surface(surface: S) -> Self {
        EditSession {
            surface,
            loaded: None,
            playback: PlaybackState::new(),
            history: EditHistory::new(),
        }
    }

    /// Binds a new payload, releasing the previous one, and resets the
    /// playhead and history.
    pub fn load(&mut self, content: Content, kind: MediaKind) {
        self.release();
        self.playback = PlaybackState::new();
        self.history.clear();

        let duration = self.surface.bind(&content, kind);
        debug!(%kind, size = content.len(), "loaded file into session");
        self.loaded = Some(LoadedFile { content, kind });

        if let Some(duration) = duration {
            self.on_metadata_loaded(duration);
        }
    }

    pub fn open(&mut self, course: &Course) {
        self.load(course.content.clone(), course.kind);
    }

    /// Unloads the file and returns its handle.
    pub fn close(&mut self) -> Option<Content> {
        self.release();
        self.playback = PlaybackState::new();
        self.history.clear();
        self.loaded.take().map(|file| file.content)
    }

    pub fn play(&mut self) -> Result<()> {
        if self.playback.is_playing() {
            return Ok(());
        }
        let Some(kind) = self.kind() else {
            return Err(self.playback_failed("no file loaded".to_string()));
        };
        if !kind.is_time_based() {
            return Err(self.playback_failed(format!("{} files cannot be played", kind)));
        }

        match self.surface.start() {
            Ok(()) => {
                self.playback.play();
                debug!(at = self.playback.current_time, "playing");
                Ok(())
            }
            Err(reason) => Err(self.playback_failed(reason)),
        }
    }

    pub fn pause(&mut self) {
        if self.playback.is_playing() {
            self.surface.pause();
            self.playback.pause();
            debug!(at = self.playback.current_time, "paused");
        }
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        if self.playback.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Moves the playhead within `[0, duration]` and returns where it landed.
    /// Files without a timeline ignore the call.
    pub fn seek(&mut self, target: f64) -> f64 {
        if self.is_time_based() {
            let at = self.playback.seek(target);
            self.surface.seek(at);
        }
        self.playback.current_time
    }

    /// Position reported by the surface while playing.
    pub fn on_time_advance(&mut self, observed: f64) {
        if self.is_time_based() {
            self.playback.advance(observed);
        }
    }

    /// Playback does not loop: the playhead returns to the start.
    pub fn on_reach_end(&mut self) {
        if self.is_time_based() {
            self.playback.reach_end();
            self.surface.seek(0.0);
            debug!("reached end of media");
        }
    }

    pub fn on_metadata_loaded(&mut self, duration: f64) {
        if !self.is_time_based() {
            return;
        }
        if !self.playback.set_duration(duration) {
            warn!(duration, "ignoring unusable media duration");
        }
    }

    pub fn record_edit(&mut self, op: EditOperation) {
        debug!(tool = %op.tool, at = op.at, "recorded edit");
        self.history.record(op);
    }

    /// Records `tool` at the current playhead.
    pub fn apply_tool(&mut self, tool: EditTool) {
        self.record_edit(EditOperation::new(tool, self.playback.current_time));
    }

    pub fn undo(&mut self) -> Result<()> {
        let op = self.history.undo()?;
        debug!(tool = %op.tool, "undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let op = self.history.redo()?;
        debug!(tool = %op.tool, "redo");
        Ok(())
    }

    /// Current edited state. The stub tools leave the payload untouched, so
    /// this is the loaded handle itself.
    pub fn export(&self) -> Option<Content> {
        self.loaded.as_ref().map(|file| file.content.clone())
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn kind(&self) -> Option<MediaKind> {
        self.loaded.as_ref().map(|file| file.kind)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_time_based(&self) -> bool {
        self.kind().is_some_and(MediaKind::is_time_based)
    }

    fn release(&mut self) {
        if self.loaded.is_some() {
            self.surface.release();
        }
    }

    fn playback_failed(&mut self, reason: String) -> Error {
        warn!(%reason, "playback failed");
        self.playback.pause();
        Error::PlaybackFailed(reason)
    }
}

impl<S: PlaybackSurface> Drop for EditSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
