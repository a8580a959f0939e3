use crate::error::HistogramError;

/// RMS window length is `sample_rate / RMS_WINDOW_DIVISOR` frames.
pub const RMS_WINDOW_DIVISOR: u32 = 200;

pub fn rms_window_frames(sample_rate: u32) -> Result<usize, HistogramError> {
    match (sample_rate / RMS_WINDOW_DIVISOR) as usize {
        0 => Err(HistogramError::ZeroWindow { sample_rate }),
        frames => Ok(frames),
    }
}

/// RMS of `signal[start..start + window]`, truncated at the end of the signal.
pub fn window_rms(signal: &[f64], start: usize, window: usize) -> f64 {
    debug_assert!(start < signal.len());
    let end = (start + window).min(signal.len());
    let chunk = &signal[start..end];
    let sum: f64 = chunk.iter().map(|s| s * s).sum();
    (sum / chunk.len() as f64).sqrt()
}

/// One RMS value per window, starting at 0 and advancing by `window`.
/// The final window is shorter when the length is not a multiple of `window`.
pub fn rms_windows(signal: &[f64], window: usize) -> impl Iterator<Item = f64> + '_ {
    assert!(window > 0, "rms window must be non-empty");
    (0..signal.len())
        .step_by(window)
        .map(move |start| window_rms(signal, start, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn window_from_sample_rate() {
        assert_eq!(rms_window_frames(44100).unwrap(), 220);
        assert_eq!(rms_window_frames(48000).unwrap(), 240);
        assert_eq!(rms_window_frames(200).unwrap(), 1);
        assert!(matches!(
            rms_window_frames(199),
            Err(HistogramError::ZeroWindow { sample_rate: 199 })
        ));
    }

    #[test]
    fn full_windows() {
        let signal = [0.5, 0.5, -0.5, 0.5];
        let values: Vec<f64> = rms_windows(&signal, 2).collect();
        assert_eq!(values.len(), 2);
        assert_abs_diff_eq!(values[0], 0.5);
        assert_abs_diff_eq!(values[1], 0.5);
    }

    #[test]
    fn tail_window_is_truncated_not_padded() {
        // Last window holds one sample; padding would halve its power.
        let signal = [0.0, 0.0, 0.0, 0.8];
        let values: Vec<f64> = rms_windows(&signal, 3).collect();
        assert_eq!(values.len(), 2);
        assert_abs_diff_eq!(values[0], 0.0);
        assert_abs_diff_eq!(values[1], 0.8);
        assert_abs_diff_eq!(window_rms(&signal, 3, 3), 0.8);
    }

    #[test]
    fn window_count_is_ceil() {
        let signal = vec![0.1; 1001];
        for window in [1, 2, 7, 100, 1000, 1001, 5000] {
            let expected = (signal.len() + window - 1) / window;
            assert_eq!(rms_windows(&signal, window).count(), expected);
        }
    }

    #[test]
    fn empty_signal_has_no_windows() {
        assert_eq!(rms_windows(&[], 4).count(), 0);
    }

    #[test]
    fn rms_of_square_wave() {
        let signal: Vec<f64> = (0..8).map(|i| if i % 2 == 0 { 0.25 } else { -0.25 }).collect();
        assert_abs_diff_eq!(window_rms(&signal, 0, 8), 0.25, epsilon = 1e-12);
    }
}
