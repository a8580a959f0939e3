use anyhow::{Context, Result};
use std::io::Write;

use super::table::Report;
use super::ReportFormat;

pub fn write_report<W: Write>(report: &Report, format: ReportFormat, out: &mut W) -> Result<()> {
    match format {
        ReportFormat::Tsv => write_tsv(report, out),
        ReportFormat::Json => write_json(report, out),
    }
}

pub fn write_tsv<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    write!(
        out,
        "# bucket 1 covers all values greater than 0 dBFS\n\
         # bucket -140 covers all values lower or equal -140 dBFS\n\
         #\n\
         # bucket"
    )?;
    for ch in 0..report.num_channels() {
        write!(out, "\tch_{}_peak\tch_{}_rms", ch, ch)?;
    }
    writeln!(out)?;

    for row in &report.rows {
        write!(out, "{:.1}", row.bucket)?;
        for cell in &row.channels {
            write!(out, "\t{:.1}\t{:.1}", cell.peak, cell.rms)?;
        }
        writeln!(out)?;
    }

    out.flush().context("Failed to flush report")?;
    Ok(())
}

pub fn write_json<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    out.flush().context("Failed to flush report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::accumulate::analyze_channel;
    use crate::histogram::buckets::BucketTable;

    fn render(report: &Report, format: ReportFormat) -> String {
        let mut buf = Vec::new();
        write_report(report, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn tsv_layout() {
        let table = BucketTable::new();
        let results = vec![
            analyze_channel(&table, &[0.5, 0.5, -0.5, 0.5], 2),
            analyze_channel(&table, &[0.0, 0.0, 0.0, 1.5], 2),
        ];
        let report = Report::build(&table, &results, 400, 2);
        let text = render(&report, ReportFormat::Tsv);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# bucket 1 covers all values greater than 0 dBFS");
        assert_eq!(lines[1], "# bucket -140 covers all values lower or equal -140 dBFS");
        assert_eq!(lines[2], "#");
        assert_eq!(lines[3], "# bucket\tch_0_peak\tch_0_rms\tch_1_peak\tch_1_rms");
        assert_eq!(lines.len(), 4 + 142);

        // ch_1: the 1.5 sample and its window (RMS 1.06) both land above 0 dBFS.
        assert_eq!(lines[4], "1.0\t0.0\t0.0\t33.3\t100.0");
        assert_eq!(lines[5], "0.0\t0.0\t0.0\t0.0\t0.0");
        assert_eq!(lines[11], "-6.0\t100.0\t100.0\t0.0\t0.0");
        assert_eq!(lines[145], "-140.0\t0.0\t0.0\t100.0\t100.0");

        for line in &lines[4..] {
            assert_eq!(line.split('\t').count(), 5);
        }
    }

    #[test]
    fn json_carries_rows_and_counts() {
        let table = BucketTable::new();
        let results = vec![analyze_channel(&table, &[1.0, 1.0], 2)];
        let report = Report::build(&table, &results, 400, 2);
        let text = render(&report, ReportFormat::Json);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["sample_rate"], 400);
        assert_eq!(value["window_frames"], 2);
        assert_eq!(value["rows"].as_array().unwrap().len(), 142);
        assert_eq!(value["rows"][1]["bucket"], 0.0);
        assert_eq!(value["rows"][1]["channels"][0]["peak"], 100.0);
        assert_eq!(value["raw"][0]["max_peak_count"], 2);
        assert_eq!(value["raw"][0]["peak"]["counts"][140], 2);
    }
}
