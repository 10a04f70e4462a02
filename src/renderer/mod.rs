#[cfg(feature = "gst")]
pub mod gst_surface;
pub mod playback_surface;
