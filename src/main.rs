mod audio;
mod cli;
mod config;
mod error;
mod histogram;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use cli::Cli;
use config::Config;
use error::HistogramError;
use histogram::accumulate::analyze_channels;
use histogram::buckets::BucketTable;
use histogram::window::rms_window_frames;
use report::table::Report;
use report::writer::write_report;
use report::ReportFormat;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = config::find_config(cli.config.as_deref()).and_then(|path| {
        let loaded = config::load_config(&path);
        match loaded {
            Some(_) => log::info!("Loaded config from {}", path.display()),
            None => log::warn!("Failed to load config from {}", path.display()),
        }
        loaded
    });
    let (format, parallel) = resolve_settings(cli, cfg.as_ref());

    File::open(&cli.input).with_context(|| format!("can't open {}", cli.input.display()))?;
    let output = open_output(&cli.output, cli.force)?;

    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());

    // 1. Decode audio
    let audio_data = audio::decode::decode_audio(&cli.input)?;
    if audio_data.samples.is_empty() {
        return Err(HistogramError::NoSamples)
            .with_context(|| format!("no audio read from {}", cli.input.display()));
    }
    log::info!(
        "nread {} (samples), {:.1}s of audio",
        audio_data.samples.len(),
        audio_data.duration()
    );

    let window = rms_window_frames(audio_data.sample_rate)?;
    log::info!("rms window has {} frames", window);

    // 2. Split and analyze
    let signals = audio::channels::split_channels(&audio_data.samples, audio_data.channels)
        .with_context(|| format!("no audio read from {}", cli.input.display()))?;
    drop(audio_data.samples);

    let table = BucketTable::new();
    let pb = ProgressBar::new(signals.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} channels")?
            .progress_chars("=>-"),
    );
    let results = analyze_channels(&table, &signals, window, parallel, |_| pb.inc(1));
    pb.finish_and_clear();

    // 3. Normalize and write, replacing the output only once the report is complete
    let report = Report::build(&table, &results, audio_data.sample_rate, window);
    let mut out = BufWriter::new(output);
    write_report(&report, format, &mut out)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    let output = out
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    persist_output(output, &cli.output, cli.force)?;

    log::info!("done");
    Ok(())
}

/// CLI values win; config fills in what the CLI left unset.
fn resolve_settings(cli: &Cli, cfg: Option<&Config>) -> (ReportFormat, bool) {
    let format = cli
        .format
        .or_else(|| cfg.map(|c| c.report.format))
        .unwrap_or_default();
    let parallel = !cli.sequential && cfg.map_or(true, |c| c.analysis.parallel);
    (format, parallel)
}

/// Check the output path before any audio work so a bad path fails fast.
///
/// The report is staged in a temporary file next to `path`; `path` itself is
/// not touched until [`persist_output`].
fn open_output(path: &Path, force: bool) -> Result<NamedTempFile> {
    if path.exists() && !force {
        return Err(HistogramError::OutputExists(path.to_path_buf()).into());
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir)
        .with_context(|| format!("can't open {} for writing", path.display()))
}

fn persist_output(mut staged: NamedTempFile, path: &Path, force: bool) -> Result<()> {
    staged
        .as_file_mut()
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let persisted = if force {
        staged.persist(path)
    } else {
        staged.persist_noclobber(path)
    };
    persisted.with_context(|| format!("can't open {} for writing", path.display()))?;
    Ok(())
}
