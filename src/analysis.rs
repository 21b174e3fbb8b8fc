//! Spectral checks on synthesized waveforms

use crate::gen::waveform::Waveform;
use rustfft::{num_complex::Complex, FftPlanner};

/// Frequency in Hz of the strongest non-DC bin of `waveform`.
///
/// Resolution is `samples_per_second / len` Hz. Returns `None` for waveforms
/// shorter than two samples or with no energy outside DC. An undersampled sine
/// reports its alias, not the requested frequency.
pub fn dominant_frequency(waveform: &Waveform) -> Option<f64> {
    let len = waveform.len();
    if len < 2 {
        return None;
    }

    // Remove the offset so DC leakage does not swamp low bins
    let mean = waveform.iter().sum::<f64>() / len as f64;
    let mut buffer: Vec<Complex<f64>> = waveform
        .iter()
        .map(|&sample| Complex::new(sample - mean, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(len);
    fft.process(&mut buffer);

    let num_bins = len / 2;
    let (bin, magnitude) = buffer[1..=num_bins]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm()))
        .fold((0, 0.0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if magnitude <= 1e-9 {
        return None;
    }
    Some(bin as f64 * waveform.samples_per_second() as f64 / len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{create_sine_wave, SineConfig};

    #[test]
    fn test_finds_sine_frequency() {
        let wave = create_sine_wave(1.0, 40.0, 1.0, 2.5, 1000).unwrap();
        assert_eq!(dominant_frequency(&wave), Some(40.0));
    }

    #[test]
    fn test_undersampled_sine_reports_alias() {
        let wave = SineConfig::new(1.0, 900.0, 1.0).synthesize().unwrap();
        assert_eq!(dominant_frequency(&wave), Some(100.0));
    }

    #[test]
    fn test_flat_waveform_has_no_peak() {
        let wave = create_sine_wave(0.5, 0.0, 1.0, 3.0, 1000).unwrap();
        assert_eq!(dominant_frequency(&wave), None);
    }
}
