//! Symphonia-backed decode strategy for compressed containers.

use crate::decode::DecodeStrategy;
use crate::error::DecodeError;
use crate::format::AudioFormat;
use crate::types::{AudioInfo, DecodedAudio};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Fallback strategy covering the compressed half of the supported set
/// (mp3, m4a, flac, aac, ogg, webm) plus anything else Symphonia's probe
/// recognizes.
///
/// More tolerant than the native WAV reader: corrupt frames are skipped
/// with a warning instead of aborting the decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    fn open_format(path: &Path) -> Result<Box<dyn FormatReader>, DecodeError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;

        Ok(probed.format)
    }
}

impl DecodeStrategy for SymphoniaDecoder {
    fn name(&self) -> &'static str {
        "symphonia"
    }

    fn probe(&self, path: &Path) -> Result<AudioInfo, DecodeError> {
        let format = Self::open_format(path)?;
        let track = format.default_track().ok_or(DecodeError::NoAudioTrack)?;
        let params = &track.codec_params;

        let sample_rate = params.sample_rate.ok_or(DecodeError::UnknownSampleRate)?;
        let channels = params.channels.map(|c| c.count() as u16).unwrap_or(1);
        let bits_per_sample = params.bits_per_sample.map(|b| b as u16);
        let label = AudioFormat::from_path(path)
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        // Some containers (notably raw mp3/aac streams) do not carry a
        // frame count; decode and count in that case.
        let frames = match params.n_frames {
            Some(frames) => frames,
            None => self.decode(path)?.frames() as u64,
        };

        Ok(AudioInfo {
            sample_rate,
            channels,
            frames,
            format: label,
            bits_per_sample,
        })
    }

    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError> {
        let mut format = Self::open_format(path)?;
        let track = format.default_track().ok_or(DecodeError::NoAudioTrack)?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params.sample_rate.ok_or(DecodeError::UnknownSampleRate)?;
        let mut channels = codec_params.channels.map(|c| c.count() as u16).unwrap_or(0);

        let mut decoder =
            symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(err)) => {
                    tracing::warn!(error = %err, "skipping corrupt audio frame");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            // The decoder's view of the channel layout wins over container
            // metadata, which can be absent or wrong for webm/ogg.
            channels = spec.channels.count() as u16;

            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(sample_buf.samples());
        }

        if samples.is_empty() {
            return Err(DecodeError::EmptyStream);
        }
        if channels == 0 {
            return Err(DecodeError::InvalidChannels(channels));
        }

        Ok(DecodedAudio {
            samples,
            sample_rate,
            channels,
        })
    }
}
