use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Fully decoded stream, samples interleaved frame by frame.
pub struct AudioData {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    pub channels: usize,
    pub frames: usize,
}

impl AudioData {
    pub fn duration(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }
}

pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .with_context(|| format!("Unsupported audio format: {}", path.display()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .context("No audio tracks found")?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    if channels == 0 {
        anyhow::bail!("Audio track has no channels");
    }
    let sample_rate = track.codec_params.sample_rate.context("Unknown sample rate")?;
    let expected_frames = track.codec_params.n_frames;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let capacity = expected_frames.map_or(0, |n| n as usize * channels);
    let mut samples: Vec<f64> = Vec::with_capacity(capacity);

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(err)) => {
                log::warn!("Skipping undecodable packet: {}", err);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        if spec.channels.count() != channels {
            anyhow::bail!(
                "Channel layout changed mid-stream: {} -> {} channels",
                channels,
                spec.channels.count()
            );
        }

        let mut sample_buf = SampleBuffer::<f64>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    let frames = samples.len() / channels;

    log::info!(
        "Decoded audio: {} channels, {}Hz, {} frames, {:.1}s",
        channels,
        sample_rate,
        frames,
        frames as f64 / sample_rate as f64
    );

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
        frames,
    })
}
