use crate::types::media::{Content, MediaKind};

/// Whatever actually renders the media: a GStreamer pipeline, a web view, or
/// nothing at all. An editing session drives it; time and end-of-stream
/// notifications flow back through the session's `on_*` methods.
pub trait PlaybackSurface {
    /// Binds a payload. Returns the duration in seconds if it is known right away.
    fn bind(&mut self, content: &Content, kind: MediaKind) -> Option<f64>;

    /// Starts or resumes playback. The error string is shown to the user.
    fn start(&mut self) -> Result<(), String>;

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Drops everything held for the current binding.
    fn release(&mut self);
}

/// Surface for headless use: accepts every bound payload and renders nothing.
/// Position updates are expected to come from the caller.
#[derive(Debug, Default)]
pub struct DetachedSurface {
    bound: Option<MediaKind>,
}

impl DetachedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }
}

impl PlaybackSurface for DetachedSurface {
    fn bind(&mut self, _content: &Content, kind: MediaKind) -> Option<f64> {
        self.bound = Some(kind);
        None
    }

    fn start(&mut self) -> Result<(), String> {
        match self.bound {
            Some(_) => Ok(()),
            None => Err("no media bound".to_string()),
        }
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _seconds: f64) {}

    fn release(&mut self) {
        self.bound = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_surface_needs_binding() {
        let mut surface = DetachedSurface::new();
        assert!(surface.start().is_err());

        let content = Content::from(vec![0u8; 2]);
        assert_eq!(surface.bind(&content, MediaKind::Audio), None);
        assert!(surface.start().is_ok());

        surface.release();
        assert!(!surface.is_bound());
    }
}
