/// One plotted amplitude sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudePoint {
    /// Sample frame index, starting at 0
    pub index: usize,

    /// Raw sample value after channel reduction
    pub amplitude: f64,
}

/// Amplitude-over-time sequence for the waveform plot
///
/// Indices are strictly increasing and amplitudes are finite.
#[derive(Debug, Clone)]
pub struct AmplitudeSeries {
    points: Vec<AmplitudePoint>,
    sample_rate: u32,
}

impl AmplitudeSeries {
    /// Build a series from consecutive amplitudes, indexed from 0
    pub fn from_amplitudes<I>(amplitudes: I, sample_rate: u32) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let points = amplitudes
            .into_iter()
            .enumerate()
            .map(|(index, amplitude)| AmplitudePoint { index, amplitude })
            .collect();
        Self {
            points,
            sample_rate,
        }
    }

    pub fn points(&self) -> &[AmplitudePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample rate of the source audio, used to label the time axis
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Smallest and largest amplitude, `None` for an empty series
    pub fn range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.amplitude, p.amplitude)),
            Some((lo, hi)) => Some((lo.min(p.amplitude), hi.max(p.amplitude))),
        })
    }

    /// Duration covered by the series in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.points.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_start_at_zero() {
        let series = AmplitudeSeries::from_amplitudes(vec![3.0, -1.0, 2.0], 8000);
        let indices: Vec<usize> = series.points().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(series.range(), Some((-1.0, 3.0)));
    }

    #[test]
    fn test_empty_series_has_no_range() {
        let series = AmplitudeSeries::from_amplitudes(Vec::new(), 8000);
        assert!(series.is_empty());
        assert_eq!(series.range(), None);
        assert_eq!(series.duration_secs(), 0.0);
    }
}
