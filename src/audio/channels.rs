use crate::error::HistogramError;

/// De-interleave `buffer` into one signal per channel.
///
/// `signal[c][i] == buffer[i * channels + c]`. A trailing partial frame is
/// dropped.
pub fn split_channels(buffer: &[f64], channels: usize) -> Result<Vec<Vec<f64>>, HistogramError> {
    if channels == 0 {
        return Err(HistogramError::InvalidChannelCount);
    }
    let frames = buffer.len() / channels;
    if frames == 0 {
        return Err(HistogramError::NoSamples);
    }

    let mut signals: Vec<Vec<f64>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in buffer.chunks_exact(channels) {
        for (signal, &sample) in signals.iter_mut().zip(frame) {
            signal.push(sample);
        }
    }

    Ok(signals)
}

/// Inverse of [`split_channels`]. Signals are assumed to be of equal length.
#[cfg(test)]
pub fn interleave(signals: &[Vec<f64>]) -> Vec<f64> {
    let frames = signals.first().map_or(0, Vec::len);
    let mut buffer = Vec::with_capacity(frames * signals.len());
    for i in 0..frames {
        buffer.extend(signals.iter().map(|s| s[i]));
    }
    buffer
}
