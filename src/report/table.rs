use serde::Serialize;

use crate::histogram::accumulate::ChannelResult;
use crate::histogram::buckets::BucketTable;

/// Scale `count` so that `max` maps to 100.
///
/// An empty histogram (`max == 0`) reads 0.0 in every bucket.
pub fn normalize(count: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    100.0 * count as f64 / max as f64
}

/// Normalized levels of one channel in one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub peak: f64,
    pub rms: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Row {
    /// dBFS of the bucket, or 1.0 for the "> 0 dBFS" bucket.
    pub bucket: f64,
    pub channels: Vec<Cell>,
}

/// Normalized histogram table, loudest bucket first.
#[derive(Clone, Debug, Serialize)]
pub struct Report<'a> {
    pub sample_rate: u32,
    pub window_frames: usize,
    pub rows: Vec<Row>,
    #[serde(rename = "raw")]
    pub results: &'a [ChannelResult],
}

impl<'a> Report<'a> {
    pub fn build(
        table: &BucketTable,
        results: &'a [ChannelResult],
        sample_rate: u32,
        window_frames: usize,
    ) -> Self {
        let rows = table
            .buckets()
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, bucket)| Row {
                bucket: bucket.label(),
                channels: results
                    .iter()
                    .map(|r| Cell {
                        peak: normalize(r.peak.counts()[idx], r.max_peak_count),
                        rms: normalize(r.rms.counts()[idx], r.max_rms_count),
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(rows.len(), table.len());

        Self {
            sample_rate,
            window_frames,
            rows,
            results,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.results.len()
    }
}
