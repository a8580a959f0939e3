use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistogramError {
    #[error("channel count must be at least 1")]
    InvalidChannelCount,
    #[error("no audio samples read")]
    NoSamples,
    #[error("sample rate {sample_rate}Hz is too low for an RMS window")]
    ZeroWindow { sample_rate: u32 },
    #[error("{} already exists. Use --force", .0.display())]
    OutputExists(PathBuf),
}
