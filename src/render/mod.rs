//! Rasterizer
//!
//! Plots an amplitude series or a spectrogram with plotters onto a
//! fixed-size canvas and encodes it as PNG. Canvas size never depends on the
//! input: empty data still yields an axis-only image.

mod canvas;
mod chart;
mod colormap;
mod spectrogram;
mod waveform;

pub use canvas::{Canvas, MAX_DIMENSION};
pub use chart::{format_tick, plot_rect, PlotRect};
pub use colormap::{color as magnitude_color, intensity as magnitude_intensity};
pub use spectrogram::{draw_spectrogram, render_spectrogram};
pub use waveform::{amplitude_range, draw_waveform, render_waveform, time_axis, WAVEFORM_COLOR};

/// Requested output size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800, 400)
    }
}
