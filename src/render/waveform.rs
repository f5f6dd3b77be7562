//! Waveform line plot

use super::canvas::{plot_color, Canvas};
use super::chart::{self, ensure_font, format_tick, label_style, plot_error, plot_rect};
use super::CanvasSize;
use crate::error::PipelineError;
use crate::model::{AmplitudeSeries, RenderedImage};
use image::Rgb;
use plotters::prelude::*;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Color of the amplitude line
pub const WAVEFORM_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

/// Fraction of the amplitude span added above and below the data
const RANGE_MARGIN: f64 = 0.05;

/// Render and encode the waveform plot
pub fn render_waveform(series: &AmplitudeSeries, size: CanvasSize) -> Result<RenderedImage, PipelineError> {
    draw_waveform(series, size)?.encode_png()
}

/// Draw the waveform plot onto a fresh canvas
///
/// Each point is placed at its sample time (`index / sample_rate`). An empty
/// series produces the axes only.
pub fn draw_waveform(series: &AmplitudeSeries, size: CanvasSize) -> Result<Canvas, PipelineError> {
    let mut canvas = Canvas::new(size.width, size.height, BACKGROUND)?;
    if plot_rect(size.width, size.height).is_none() {
        return Ok(canvas);
    }
    ensure_font()?;

    let (lo, hi) = amplitude_range(series);
    let (start, end) = time_axis(series);
    let rate = series.sample_rate();
    let time_of = |index: usize| {
        if rate > 0 {
            index as f64 / rate as f64
        } else {
            index as f64
        }
    };

    {
        let root = canvas.drawing_area();
        let mut plot = ChartBuilder::on(&root)
            .margin(chart::MARGIN)
            .x_label_area_size(chart::X_LABEL_AREA)
            .y_label_area_size(chart::Y_LABEL_AREA)
            .build_cartesian_2d(start..end, lo..hi)
            .map_err(plot_error)?;

        plot.configure_mesh()
            .disable_mesh()
            .x_labels(chart::TICKS)
            .y_labels(chart::TICKS)
            .label_style(label_style())
            .x_label_formatter(&|v: &f64| format_tick(*v))
            .y_label_formatter(&|v: &f64| format_tick(*v))
            .draw()
            .map_err(plot_error)?;

        plot.draw_series(LineSeries::new(
            series.points().iter().map(|p| (time_of(p.index), p.amplitude)),
            &plot_color(WAVEFORM_COLOR),
        ))
        .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
    }

    Ok(canvas)
}

/// Auto-ranged amplitude axis: data extremes plus a fixed margin
///
/// A flat series is widened to +-1 around its value; an empty one uses -1..1.
pub fn amplitude_range(series: &AmplitudeSeries) -> (f64, f64) {
    match series.range() {
        None => (-1.0, 1.0),
        Some((lo, hi)) if hi - lo <= 0.0 => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * RANGE_MARGIN;
            (lo - pad, hi + pad)
        }
    }
}

/// Time axis from the first to the last sample time
///
/// Falls back to sample indices without a sample rate, and to one sample
/// period when there are fewer than two points.
pub fn time_axis(series: &AmplitudeSeries) -> (f64, f64) {
    let unit = if series.sample_rate() > 0 {
        1.0 / series.sample_rate() as f64
    } else {
        1.0
    };
    let last = series.len().saturating_sub(1);
    if last == 0 {
        (0.0, unit)
    } else {
        (0.0, last as f64 * unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: Vec<f64>) -> AmplitudeSeries {
        AmplitudeSeries::from_amplitudes(values, 100)
    }

    fn line_pixels(canvas: &Canvas) -> Vec<(u32, u32)> {
        let mut found = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) == WAVEFORM_COLOR {
                    found.push((x, y));
                }
            }
        }
        found
    }

    #[test]
    fn test_amplitude_range() {
        assert_eq!(amplitude_range(&series(vec![])), (-1.0, 1.0));
        assert_eq!(amplitude_range(&series(vec![0.0, 0.0])), (-1.0, 1.0));
        assert_eq!(amplitude_range(&series(vec![-10.0, 10.0])), (-11.0, 11.0));
    }

    #[test]
    fn test_time_axis_ends_at_last_sample() {
        let five = AmplitudeSeries::from_amplitudes(vec![0.0; 5], 4);
        assert_eq!(time_axis(&five), (0.0, 1.0));
        assert_eq!(time_axis(&series(vec![])), (0.0, 0.01));
        assert_eq!(time_axis(&AmplitudeSeries::from_amplitudes(vec![0.0; 3], 0)), (0.0, 2.0));
    }

    #[test]
    fn test_empty_series_keeps_requested_size() {
        let canvas = draw_waveform(&series(vec![]), CanvasSize::new(320, 120)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (320, 120));
        assert!(line_pixels(&canvas).is_empty());
    }

    #[test]
    fn test_tiny_canvas_is_blank_but_valid() {
        let canvas = draw_waveform(&series(vec![1.0, -1.0]), CanvasSize::new(5, 3)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (5, 3));
        assert_eq!(canvas.pixel(2, 1), BACKGROUND);
    }

    #[test]
    fn test_line_spans_plot_width() {
        let values: Vec<f64> = (0..200).map(|i| (i as f64 * 0.1).sin()).collect();
        let canvas = draw_waveform(&series(values), CanvasSize::new(400, 200)).unwrap();
        let rect = plot_rect(400, 200).unwrap();

        let pixels = line_pixels(&canvas);
        let min_x = pixels.iter().map(|p| p.0).min().unwrap();
        let max_x = pixels.iter().map(|p| p.0).max().unwrap();
        assert!(min_x <= rect.left + 2, "line starts at column {}", min_x);
        assert!(max_x + 3 >= rect.right, "line ends at column {}", max_x);
        assert!(pixels.iter().all(|&(x, y)| x >= rect.left && x < rect.right && y >= rect.top && y < rect.bottom));
    }

    #[test]
    fn test_flat_series_is_one_row() {
        let canvas = draw_waveform(&series(vec![0.0; 50]), CanvasSize::new(300, 160)).unwrap();
        let rect = plot_rect(300, 160).unwrap();

        let mut rows: Vec<u32> = line_pixels(&canvas).iter().map(|p| p.1).collect();
        rows.dedup();
        assert_eq!(rows.len(), 1);
        let middle = (rect.top + rect.bottom) / 2;
        assert!(rows[0].abs_diff(middle) <= 2, "row {} vs middle {}", rows[0], middle);
    }

    #[test]
    fn test_zero_canvas_fails() {
        let result = render_waveform(&series(vec![1.0]), CanvasSize::new(0, 100));
        assert!(matches!(result, Err(PipelineError::Encoding(_))));
    }
}
