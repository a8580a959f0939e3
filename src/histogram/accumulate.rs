use rayon::prelude::*;
use serde::Serialize;

use super::buckets::{to_dbfs, BucketTable, NUM_BUCKETS};
use super::window::rms_windows;

/// Bucket counts, parallel to the shared [`BucketTable`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    #[serde(with = "counts_as_seq")]
    counts: [u64; NUM_BUCKETS],
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_BUCKETS],
        }
    }

    /// Count `value` in the bucket of the smallest boundary >= |value|.
    pub fn classify(&mut self, table: &BucketTable, value: f64) {
        self.counts[table.index_of(value.abs())] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        // Never empty: always NUM_BUCKETS entries.
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

mod counts_as_seq {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(counts: &[u64; super::NUM_BUCKETS], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(counts.iter())
    }
}

/// Both histograms of one channel plus their normalization denominators.
#[derive(Clone, Debug, Serialize)]
pub struct ChannelResult {
    pub peak: Histogram,
    pub rms: Histogram,
    pub max_peak_count: u64,
    pub max_rms_count: u64,
    /// Samples that are exactly 0.0.
    pub zeros: usize,
}

pub fn analyze_channel(table: &BucketTable, signal: &[f64], window: usize) -> ChannelResult {
    let mut peak = Histogram::new();
    for &sample in signal {
        peak.classify(table, sample);
    }

    let mut rms = Histogram::new();
    for value in rms_windows(signal, window) {
        rms.classify(table, value);
    }

    ChannelResult {
        zeros: signal.iter().filter(|&&s| s == 0.0).count(),
        max_peak_count: peak.max_count(),
        max_rms_count: rms.max_count(),
        peak,
        rms,
    }
}

/// Analyze every channel. With `parallel` the channels are spread over the
/// rayon pool and `on_done` is called from worker threads; results and log
/// lines stay in channel order either way.
pub fn analyze_channels<F>(
    table: &BucketTable,
    signals: &[Vec<f64>],
    window: usize,
    parallel: bool,
    on_done: F,
) -> Vec<ChannelResult>
where
    F: Fn(usize) + Sync,
{
    let run = |(ch, signal): (usize, &Vec<f64>)| {
        let result = analyze_channel(table, signal, window);
        on_done(ch);
        result
    };

    let results: Vec<ChannelResult> = if parallel {
        signals.par_iter().enumerate().map(run).collect()
    } else {
        signals.iter().enumerate().map(run).collect()
    };

    for (ch, (signal, result)) in signals.iter().zip(&results).enumerate() {
        log::info!("ch {} has {} zeros", ch, result.zeros);

        let peak = signal.iter().map(|s| s.abs()).fold(0.0f64, f64::max);
        if peak > 0.0 {
            log::debug!("ch {} sample peak {:.2} dBFS", ch, to_dbfs(peak));
        }
        log::debug!(
            "ch {} classified {} samples, {} windows (max bucket counts: peak={}, rms={})",
            ch,
            result.peak.total(),
            result.rms.total(),
            result.max_peak_count,
            result.max_rms_count
        );
    }

    results
}
