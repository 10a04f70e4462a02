use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// Playhead bookkeeping for one loaded file.
///
/// Transitions:
/// `Stopped -play-> Playing -pause-> Paused -play-> Playing`, and
/// `Playing -end-> Stopped`. Seeking and time updates never change the status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current_time: f64,
    pub duration: f64,
    pub status: PlaybackStatus,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            status: PlaybackStatus::Stopped,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub(crate) fn play(&mut self) {
        self.status = PlaybackStatus::Playing;
    }

    pub(crate) fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Moves the playhead, clamped to `[0, duration]`. NaN targets are ignored.
    pub(crate) fn seek(&mut self, target: f64) -> f64 {
        if !target.is_nan() {
            self.current_time = target.clamp(0.0, self.duration.max(0.0));
        }
        self.current_time
    }

    pub(crate) fn advance(&mut self, observed: f64) {
        if observed.is_finite() {
            self.current_time = observed.max(0.0);
        }
    }

    pub(crate) fn reach_end(&mut self) {
        self.status = PlaybackStatus::Stopped;
        self.current_time = 0.0;
    }

    /// Records the media duration once the surface knows it and rewinds.
    /// Returns false when the value is unusable.
    pub(crate) fn set_duration(&mut self, duration: f64) -> bool {
        if !duration.is_finite() || duration < 0.0 {
            return false;
        }
        self.duration = duration;
        self.current_time = 0.0;
        true
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats seconds as `mm:ss` for the scrubber read-out.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_stopped_at_zero() {
        let state = PlaybackState::new();
        assert_eq!(state.status, PlaybackStatus::Stopped);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, 0.0);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut state = PlaybackState::new();
        state.pause();
        assert_eq!(state.status, PlaybackStatus::Stopped);
        state.play();
        state.pause();
        assert_eq!(state.status, PlaybackStatus::Paused);
        state.play();
        assert!(state.is_playing());
    }

    #[test]
    fn test_seek_clamps() {
        let mut state = PlaybackState::new();
        state.set_duration(30.0);
        assert_eq!(state.seek(12.5), 12.5);
        assert_eq!(state.seek(-3.0), 0.0);
        assert_eq!(state.seek(99.0), 30.0);
        assert_eq!(state.seek(f64::NAN), 30.0);
    }

    #[test]
    fn test_reach_end_rewinds() {
        let mut state = PlaybackState::new();
        state.set_duration(10.0);
        state.play();
        state.advance(9.9);
        state.reach_end();
        assert_eq!(state.status, PlaybackStatus::Stopped);
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn test_set_duration_rejects_bad_values() {
        let mut state = PlaybackState::new();
        assert!(!state.set_duration(f64::NAN));
        assert!(!state.set_duration(f64::INFINITY));
        assert!(!state.set_duration(-1.0));
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(5.2), "00:05");
        assert_eq!(format_timestamp(125.9), "02:05");
        assert_eq!(format_timestamp(3600.0), "60:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
        assert_eq!(format_timestamp(-4.0), "00:00");
    }
}
