use clap::Parser;
use std::path::PathBuf;

use crate::report::ReportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "dbhist",
    about = "Generate histogram of samples and RMS values",
    after_help = "A window of sample_rate/200 frames is used for calculating RMS values. \
                  Histogram values are normalized so that max value is 100.\n\n\
                  Bucket 1 covers all values greater than 0 dBFS, bucket -140 covers all \
                  values lower or equal -140 dBFS."
)]
pub struct Cli {
    /// Input audio file (WAV, FLAC, MP3, OGG, AAC)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output report file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Report format [default: tsv]
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Analyze channels one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Config file (defaults to dbhist.toml or ~/.config/dbhist/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
