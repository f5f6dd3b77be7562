mod common;

use common::{aiff_16bit_8000, tone, wav_16bit};
use soundplot::analysis::{mono_samples, AnalysisParams, ChannelReduction, SpectralAnalyzer, WindowFunction};
use soundplot::decode::decode;
use soundplot::render::{magnitude_color, plot_rect, CanvasSize, WAVEFORM_COLOR};
use soundplot::{AudioClip, ClipPipeline, PipelineConfig, PipelineError};

#[test]
fn test_tone_spectrogram_peaks_at_440hz() {
    let audio = decode(&wav_16bit(8000, 1, &tone(440.0, 8000, 8000))).unwrap();
    let analyzer = SpectralAnalyzer::new(AnalysisParams::default()).unwrap();
    let mono = mono_samples(&audio, ChannelReduction::First).unwrap();
    let spec = analyzer.analyze(&mono, audio.sample_rate()).unwrap();

    // floor((8000 - 1024) / 512) + 1
    assert_eq!(spec.frame_count(), 14);
    assert_eq!(spec.bin_count(), 513);

    let expected = 56; // 440 * 1024 / 8000 = 56.3
    let on_target = (0..spec.frame_count())
        .filter(|&i| spec.peak_bin(i).unwrap().abs_diff(expected) <= 1)
        .count();
    assert!(on_target * 2 > spec.frame_count(), "{} of {} frames on target", on_target, spec.frame_count());
}

#[test]
fn test_end_to_end_default_canvas() {
    let clip = AudioClip::new("tone.wav", wav_16bit(8000, 1, &tone(440.0, 8000, 8000)));
    let artifacts = ClipPipeline::default().render(&clip).unwrap();

    assert_eq!(artifacts.label, "tone.wav");
    for image in [&artifacts.waveform, &artifacts.spectrogram] {
        assert_eq!(image.content_type, "image/png");
        let decoded = image::load_from_memory(&image.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 400));
    }
}

#[test]
fn test_custom_canvas_sizes() {
    let config = PipelineConfig::new()
        .with_waveform_size(CanvasSize::new(640, 200))
        .with_spectrogram_size(CanvasSize::new(300, 300));
    let clip = AudioClip::new("tone.wav", wav_16bit(8000, 1, &tone(1000.0, 8000, 4096)));
    let artifacts = ClipPipeline::new(config).render(&clip).unwrap();

    let wave = image::load_from_memory(&artifacts.waveform.bytes).unwrap();
    let spec = image::load_from_memory(&artifacts.spectrogram.bytes).unwrap();
    assert_eq!((wave.width(), wave.height()), (640, 200));
    assert_eq!((spec.width(), spec.height()), (300, 300));
}

#[test]
fn test_rendering_is_deterministic() {
    let bytes = wav_16bit(8000, 1, &tone(300.0, 8000, 3000));
    let pipeline = ClipPipeline::new(PipelineConfig::new().with_size(200, 100).with_framing(256, 128));
    let a = pipeline.render_bytes("a.wav", bytes.clone()).unwrap();
    let b = pipeline.render_bytes("a.wav", bytes).unwrap();
    assert_eq!(a.waveform, b.waveform);
    assert_eq!(a.spectrogram, b.spectrogram);
}

#[test]
fn test_silent_clip_has_no_energy() {
    let audio = decode(&wav_16bit(8000, 1, &vec![0; 4096])).unwrap();
    let mono = mono_samples(&audio, ChannelReduction::First).unwrap();
    let spec = SpectralAnalyzer::new(AnalysisParams::default())
        .unwrap()
        .analyze(&mono, 8000)
        .unwrap();
    assert!(spec.triples().all(|(_, _, m)| m == 0.0));

    let artifacts = ClipPipeline::default()
        .render_bytes("silence.wav", wav_16bit(8000, 1, &vec![0; 4096]))
        .unwrap();
    assert!(image::load_from_memory(&artifacts.spectrogram.bytes).is_ok());
}

#[test]
fn test_silent_clip_draws_flat_line_and_minimum_color() {
    let artifacts = ClipPipeline::default()
        .render_bytes("silence.wav", wav_16bit(8000, 1, &vec![0; 4096]))
        .unwrap();
    let rect = plot_rect(800, 400).unwrap();

    let waveform = image::load_from_memory(&artifacts.waveform.bytes).unwrap().to_rgb8();
    let mut rows: Vec<u32> = waveform
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == WAVEFORM_COLOR)
        .map(|(_, y, _)| y)
        .collect();
    rows.dedup();
    assert_eq!(rows.len(), 1, "line covers rows {:?}", rows);
    // an all-zero series is plotted on a -1..1 axis, so 0 sits mid-plot
    let middle = (rect.top + rect.bottom) / 2;
    assert!(rows[0].abs_diff(middle) <= 2, "line at row {}, middle {}", rows[0], middle);

    let spectrogram = image::load_from_memory(&artifacts.spectrogram.bytes).unwrap().to_rgb8();
    let silent = magnitude_color(0.0);
    for y in rect.top + 3..rect.bottom - 3 {
        for x in rect.left + 3..rect.right - 3 {
            assert_eq!(*spectrogram.get_pixel(x, y), silent, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_invalid_framing_is_rejected() {
    let bytes = wav_16bit(8000, 1, &tone(440.0, 8000, 4096));
    for (w, o) in [(0, 0), (512, 512), (256, 300)] {
        let pipeline = ClipPipeline::new(PipelineConfig::new().with_framing(w, o));
        let result = pipeline.render_bytes("tone.wav", bytes.clone());
        assert!(
            matches!(result, Err(PipelineError::InvalidParameter(_))),
            "W={} O={} gave {:?}",
            w,
            o,
            result.map(|a| a.label)
        );
    }
}

#[test]
fn test_short_clip_is_insufficient() {
    let result = ClipPipeline::default().render_bytes("blip.wav", wav_16bit(8000, 1, &tone(440.0, 8000, 1000)));
    assert_eq!(
        result.unwrap_err(),
        PipelineError::InsufficientSamples {
            available: 1000,
            required: 1024
        }
    );
}

#[test]
fn test_truncated_header_is_corrupt() {
    let bytes = wav_16bit(8000, 1, &tone(440.0, 8000, 2048));
    let result = ClipPipeline::default().render_bytes("cut.wav", bytes[..20].to_vec());
    assert!(matches!(result, Err(PipelineError::CorruptInput(_))));
}

#[test]
fn test_stereo_uses_first_channel_by_default() {
    let left = tone(440.0, 8000, 2048);
    let interleaved: Vec<i16> = left.iter().flat_map(|&l| [l, 0]).collect();
    let audio = decode(&wav_16bit(8000, 2, &interleaved)).unwrap();
    assert_eq!(audio.channels(), 2);
    assert_eq!(audio.frame_count(), 2048);

    let first = mono_samples(&audio, ChannelReduction::First).unwrap();
    let mean = mono_samples(&audio, ChannelReduction::Mean).unwrap();
    assert_eq!(first.len(), 2048);
    for (f, m) in first.iter().zip(mean.iter()) {
        assert!((f / 2.0 - m).abs() < 1e-12);
    }
}

#[test]
fn test_aiff_renders_like_wave() {
    let samples = tone(440.0, 8000, 4096);
    let config = PipelineConfig::new().with_size(240, 160).with_window(WindowFunction::Hamming);
    let pipeline = ClipPipeline::new(config);

    let from_wav = pipeline.render_bytes("x", wav_16bit(8000, 1, &samples)).unwrap();
    let from_aiff = pipeline.render_bytes("x", aiff_16bit_8000(1, &samples)).unwrap();
    assert_eq!(from_wav.waveform, from_aiff.waveform);
    assert_eq!(from_wav.spectrogram, from_aiff.spectrogram);
}
