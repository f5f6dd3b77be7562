//! Spectrogram heat map

use super::canvas::{plot_color, Canvas};
use super::chart::{self, ensure_font, format_tick, label_style, plot_error, plot_rect};
use super::colormap;
use super::CanvasSize;
use crate::error::PipelineError;
use crate::model::{RenderedImage, Spectrogram};
use image::Rgb;
use plotters::prelude::*;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Render and encode the spectrogram plot
pub fn render_spectrogram(spectrogram: &Spectrogram, size: CanvasSize) -> Result<RenderedImage, PipelineError> {
    draw_spectrogram(spectrogram, size)?.encode_png()
}

/// Draw the spectrogram onto a fresh canvas
///
/// Time runs left to right, frequency bottom to top. Each plot pixel is
/// mapped to a time and a frequency first, then shows the frame covering
/// that time and the nearest bin.
pub fn draw_spectrogram(spectrogram: &Spectrogram, size: CanvasSize) -> Result<Canvas, PipelineError> {
    let mut canvas = Canvas::new(size.width, size.height, BACKGROUND)?;
    if plot_rect(size.width, size.height).is_none() {
        return Ok(canvas);
    }
    ensure_font()?;

    let duration = positive_or_one(if spectrogram.sample_rate > 0 {
        spectrogram.duration_secs()
    } else {
        0.0
    });
    let max_frequency = positive_or_one(if spectrogram.sample_rate > 0 && spectrogram.window_size > 0 {
        spectrogram.max_frequency()
    } else {
        0.0
    });
    let max_magnitude = spectrogram.max_magnitude();

    {
        let root = canvas.drawing_area();
        let mut plot = ChartBuilder::on(&root)
            .margin(chart::MARGIN)
            .x_label_area_size(chart::X_LABEL_AREA)
            .y_label_area_size(chart::Y_LABEL_AREA)
            .build_cartesian_2d(0.0..duration, 0.0..max_frequency)
            .map_err(plot_error)?;

        let (columns, rows) = plot.plotting_area().get_pixel_range();
        let width = (columns.end - columns.start).max(0) as usize;
        let height = (rows.end - rows.start).max(0) as usize;

        for col in 0..width {
            let time = (col as f64 + 0.5) / width as f64 * duration;
            let frame = spectrogram
                .frame_at_time(time)
                .map(|i| &spectrogram.frames[i]);

            for row in 0..height {
                let frequency = ((height - 1 - row) as f64 + 0.5) / height as f64 * max_frequency;
                let magnitude = frame
                    .and_then(|f| f.magnitudes.get(spectrogram.bin_at_frequency(frequency)))
                    .copied()
                    .unwrap_or(0.0);
                let color = colormap::color(colormap::intensity(magnitude, max_magnitude));
                root.draw_pixel(
                    (columns.start + col as i32, rows.start + row as i32),
                    &plot_color(color),
                )
                .map_err(plot_error)?;
            }
        }

        plot.configure_mesh()
            .disable_mesh()
            .x_labels(chart::TICKS)
            .y_labels(chart::TICKS)
            .label_style(label_style())
            .x_label_formatter(&|v: &f64| format_tick(*v))
            .y_label_formatter(&|v: &f64| format_tick(*v))
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
    }

    Ok(canvas)
}

fn positive_or_one(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}
