/// Magnitude spectrum of one analysis window
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    /// Offset of the first mono frame in the window
    pub start: usize,

    /// `window_size / 2 + 1` non-negative magnitudes, DC first
    pub magnitudes: Vec<f64>,
}

/// Time x frequency magnitude grid
///
/// Frame starts increase with a fixed stride of `hop_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    pub frames: Vec<SpectralFrame>,
    pub sample_rate: u32,
    pub window_size: usize,
    pub hop_size: usize,
}

impl Spectrogram {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Magnitude bins per frame
    pub fn bin_count(&self) -> usize {
        self.window_size / 2 + 1
    }

    /// Frequency resolution in Hz
    pub fn bin_width(&self) -> f64 {
        self.sample_rate as f64 / self.window_size as f64
    }

    /// Center frequency of bin `j` in Hz
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.bin_width()
    }

    /// Start time of frame `i` in seconds
    pub fn frame_time(&self, frame: usize) -> f64 {
        (frame * self.hop_size) as f64 / self.sample_rate as f64
    }

    /// Highest representable frequency (Nyquist)
    pub fn max_frequency(&self) -> f64 {
        self.bin_frequency(self.bin_count() - 1)
    }

    /// Time spanned from the first frame start to the last frame end
    pub fn duration_secs(&self) -> f64 {
        match self.frames.last() {
            Some(last) => (last.start + self.window_size) as f64 / self.sample_rate as f64,
            None => 0.0,
        }
    }

    /// Largest magnitude over the whole grid (0 when empty)
    pub fn max_magnitude(&self) -> f64 {
        self.frames
            .iter()
            .flat_map(|f| f.magnitudes.iter())
            .copied()
            .fold(0.0, f64::max)
    }

    /// Index of the strongest bin in frame `i`, lowest bin on ties
    pub fn peak_bin(&self, frame: usize) -> Option<usize> {
        let magnitudes = &self.frames.get(frame)?.magnitudes;
        let mut best: Option<(usize, f64)> = None;
        for (bin, &m) in magnitudes.iter().enumerate() {
            if best.map_or(true, |(_, b)| m > b) {
                best = Some((bin, m));
            }
        }
        best.map(|(bin, _)| bin)
    }

    /// Frame covering `time` seconds: the last one starting at or before it
    ///
    /// Times past the last start belong to the last frame, which extends a
    /// full window beyond its start.
    pub fn frame_at_time(&self, time: f64) -> Option<usize> {
        if self.frames.is_empty() || self.sample_rate == 0 || self.hop_size == 0 {
            return None;
        }
        let position = (time * self.sample_rate as f64).max(0.0);
        let index = (position / self.hop_size as f64).floor() as usize;
        Some(index.min(self.frames.len() - 1))
    }

    /// Bin whose center frequency is nearest to `frequency` Hz
    pub fn bin_at_frequency(&self, frequency: f64) -> usize {
        let width = self.bin_width();
        if !width.is_finite() || width <= 0.0 {
            return 0;
        }
        let bin = (frequency.max(0.0) / width).round() as usize;
        bin.min(self.bin_count() - 1)
    }

    /// `(time, frequency, magnitude)` for every cell, frame-major
    pub fn triples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.frames.iter().enumerate().flat_map(move |(i, frame)| {
            let time = self.frame_time(i);
            frame
                .magnitudes
                .iter()
                .enumerate()
                .map(move |(j, &m)| (time, self.bin_frequency(j), m))
        })
    }
}
