use std::io::Write;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::renderer::playback_surface::PlaybackSurface;
use crate::types::media::{Content, MediaKind};

/// Plays the loaded payload through a GStreamer `playbin`.
///
/// Content is held in memory, so each binding stages it to a temp file that
/// lives exactly as long as the pipeline.
pub struct GstSurface {
    pipeline: Option<gst::Element>,
    staged: Option<NamedTempFile>,
}

impl GstSurface {
    pub fn new() -> Result<Self, gst::glib::Error> {
        gst::init()?;
        Ok(GstSurface {
            pipeline: None,
            staged: None,
        })
    }

    /// Current pipeline position in seconds, for feeding `on_time_advance`.
    pub fn position(&self) -> Option<f64> {
        self.pipeline
            .as_ref()?
            .query_position::<gst::ClockTime>()
            .map(|t| t.seconds_f64())
    }

    /// Drains pending bus messages and reports whether the stream ended.
    pub fn poll_end(&self) -> bool {
        let Some(bus) = self.pipeline.as_ref().and_then(|p| p.bus()) else {
            return false;
        };
        while let Some(msg) =
            bus.pop_filtered(&[gst::MessageType::Eos, gst::MessageType::Error])
        {
            match msg.view() {
                gst::MessageView::Eos(..) => return true,
                gst::MessageView::Error(err) => {
                    warn!(error = %err.error(), "pipeline error");
                    return true;
                }
                _ => (),
            }
        }
        false
    }

    fn stage(content: &Content) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    fn probe_duration(uri: &str) -> Option<f64> {
        let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)).ok()?;
        match discoverer.discover_uri(uri) {
            Ok(info) => info.duration().map(|d| d.seconds_f64()),
            Err(err) => {
                warn!(%uri, error = %err, "could not probe media duration");
                None
            }
        }
    }
}

impl PlaybackSurface for GstSurface {
    fn bind(&mut self, content: &Content, kind: MediaKind) -> Option<f64> {
        if !kind.is_time_based() {
            return None;
        }
        let staged = match Self::stage(content) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "could not stage content for playback");
                return None;
            }
        };
        let uri = match gst::glib::filename_to_uri(staged.path(), None) {
            Ok(uri) => uri,
            Err(err) => {
                warn!(error = %err, "could not build media uri");
                return None;
            }
        };

        let duration = Self::probe_duration(uri.as_str());
        match gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()
        {
            Ok(pipeline) => {
                if let Err(err) = pipeline.set_state(gst::State::Paused) {
                    warn!(error = %err, "pipeline refused to preroll");
                }
                debug!(%uri, ?duration, "bound playbin");
                self.pipeline = Some(pipeline);
            }
            Err(err) => warn!(error = %err, "could not create playbin"),
        }
        self.staged = Some(staged);
        duration
    }

    fn start(&mut self) -> Result<(), String> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| "no playable media bound".to_string())?;
        pipeline
            .set_state(gst::State::Playing)
            .map_err(|err| err.to_string())?;

        // Decoding errors surface asynchronously; wait for the state change to settle.
        let (result, _, _) = pipeline.state(Some(gst::ClockTime::from_seconds(5)));
        result.map(|_| ()).map_err(|err| {
            pipeline.set_state(gst::State::Null).ok();
            err.to_string()
        })
    }

    fn pause(&mut self) {
        if let Some(pipeline) = &self.pipeline {
            pipeline.set_state(gst::State::Paused).ok();
        }
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(pipeline) = &self.pipeline {
            let target = gst::ClockTime::from_seconds_f64(seconds.max(0.0));
            if let Err(err) =
                pipeline.seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)
            {
                warn!(seconds, error = %err, "seek failed");
            }
        }
    }

    fn release(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.set_state(gst::State::Null).ok();
        }
        self.staged = None;
    }
}

impl Drop for GstSurface {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::session::EditSession;

    #[test]
    fn test_garbage_payload_cannot_play() {
        let surface = GstSurface::new().unwrap();
        let mut session = EditSession::with_surface(surface);
        session.load(Content::from(vec![0u8; 64]), MediaKind::Video);

        assert!(matches!(session.play(), Err(Error::PlaybackFailed(_))));
        assert!(!session.playback().is_playing());
    }

    #[test]
    fn test_release_drops_staged_file() {
        let mut surface = GstSurface::new().unwrap();
        surface.bind(&Content::from(vec![1u8; 8]), MediaKind::Audio);
        let path = surface.staged.as_ref().map(|f| f.path().to_path_buf()).unwrap();
        assert!(path.exists());

        surface.release();
        assert!(!path.exists());
        assert!(surface.position().is_none());
        assert!(!surface.poll_end());
    }
}
