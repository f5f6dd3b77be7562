//! Chart layout, label font and tick formatting shared by both plots

use crate::error::PipelineError;
use plotters::style::{register_font, FontStyle, TextStyle};
use std::fmt::Display;
use std::sync::OnceLock;

/// Blank border around the whole chart
pub(crate) const MARGIN: u32 = 12;
/// Height of the tick label strip under the plot
pub(crate) const X_LABEL_AREA: u32 = 36;
/// Width of the tick label strip left of the plot
pub(crate) const Y_LABEL_AREA: u32 = 64;

pub(crate) const TICKS: usize = 5;
const LABEL_FONT_SIZE: f64 = 14.0;
const LABEL_FAMILY: &str = "sans-serif";

static LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the embedded label font with plotters (once per process)
pub(crate) fn ensure_font() -> Result<(), PipelineError> {
    FONT_REGISTERED
        .get_or_init(|| {
            register_font(LABEL_FAMILY, FontStyle::Normal, LABEL_FONT).map_err(|_| "InvalidFont".to_string())
        })
        .clone()
        .map_err(|e| PipelineError::Encoding(format!("axis label font rejected: {}", e)))
}

pub(crate) fn label_style() -> TextStyle<'static> {
    (LABEL_FAMILY, LABEL_FONT_SIZE).into()
}

pub(crate) fn plot_error<E: Display>(err: E) -> PipelineError {
    PipelineError::Encoding(format!("plotting failed: {}", err))
}

/// Pixel rectangle the data is drawn into (right and bottom exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PlotRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Plot rectangle for a canvas, `None` when the margins and label strips
/// leave no room for data
pub fn plot_rect(width: u32, height: u32) -> Option<PlotRect> {
    let right = width.checked_sub(MARGIN)?;
    let bottom = height.checked_sub(MARGIN + X_LABEL_AREA)?;
    let left = MARGIN + Y_LABEL_AREA;
    let top = MARGIN;
    if right < left + 2 || bottom < top + 2 {
        return None;
    }
    Some(PlotRect {
        left,
        top,
        right,
        bottom,
    })
}

/// Compact tick label: `k` suffix from 1000, two decimals below 10
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs < 1e-9 {
        "0".to_string()
    } else if abs >= 1000.0 {
        let scaled = format!("{:.1}", value / 1000.0);
        format!("{}k", scaled.trim_end_matches(".0"))
    } else if abs >= 10.0 || value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_rect() {
        let rect = plot_rect(800, 400).unwrap();
        assert_eq!((rect.left, rect.top, rect.right, rect.bottom), (76, 12, 788, 352));
        assert_eq!((rect.width(), rect.height()), (712, 340));
        assert!(plot_rect(80, 400).is_none());
        assert!(plot_rect(800, 40).is_none());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0000001), "0");
        assert_eq!(format_tick(4000.0), "4k");
        assert_eq!(format_tick(-32768.0), "-32.8k");
        assert_eq!(format_tick(250.0), "250");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(3.0), "3");
    }

    #[test]
    fn test_font_registers_once() {
        assert!(ensure_font().is_ok());
        assert!(ensure_font().is_ok());
    }
}
