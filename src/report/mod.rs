pub mod table;
pub mod writer;

use clap::ValueEnum;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tab-separated table, one row per bucket
    #[default]
    Tsv,
    /// JSON document with normalized values and raw counts
    Json,
}
