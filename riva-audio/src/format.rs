//! Supported audio formats and extension-based detection.

use std::fmt;
use std::path::Path;

/// Audio container formats accepted for normalization.
///
/// Matches the upload formats the Riva transcription service front end
/// accepts. Detection is by file extension only; the decode strategies
/// are the ones that actually verify the bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    M4a,
    Flac,
    Aac,
    Ogg,
    Webm,
}

impl AudioFormat {
    /// All supported formats, in no particular order.
    pub const ALL: [AudioFormat; 7] = [
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::M4a,
        AudioFormat::Flac,
        AudioFormat::Aac,
        AudioFormat::Ogg,
        AudioFormat::Webm,
    ];

    /// Detect the format from a path's extension, case-insensitively.
    ///
    /// Returns `None` for unknown extensions or paths without one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Detect the format from a bare extension such as `"mp3"` or `"WAV"`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" => Some(AudioFormat::M4a),
            "flac" => Some(AudioFormat::Flac),
            "aac" => Some(AudioFormat::Aac),
            "ogg" => Some(AudioFormat::Ogg),
            "webm" => Some(AudioFormat::Webm),
            _ => None,
        }
    }

    /// Canonical lowercase extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "aac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Webm => "webm",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AudioFormat::Wav => "WAV",
            AudioFormat::Mp3 => "MP3",
            AudioFormat::M4a => "M4A",
            AudioFormat::Flac => "FLAC",
            AudioFormat::Aac => "AAC",
            AudioFormat::Ogg => "OGG",
            AudioFormat::Webm => "WEBM",
        };
        f.write_str(label)
    }
}

/// Whether a path's extension belongs to the supported set.
///
/// Pure string inspection; the path does not need to exist.
pub fn is_supported(path: impl AsRef<Path>) -> bool {
    AudioFormat::from_path(path.as_ref()).is_some()
}

/// Lowercase extensions of every supported format.
pub fn supported_extensions() -> [&'static str; 7] {
    AudioFormat::ALL.map(|f| f.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_all_supported_extensions() {
        for ext in supported_extensions() {
            let path = format!("clip.{ext}");
            assert!(is_supported(&path), "{path} should be supported");
        }
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(
            AudioFormat::from_path(Path::new("INTERVIEW.WAV")),
            Some(AudioFormat::Wav)
        );
        assert_eq!(
            AudioFormat::from_path(Path::new("clip.Mp3")),
            Some(AudioFormat::Mp3)
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(!is_supported("notes.txt"));
        assert!(!is_supported("video.mp4"));
        assert!(!is_supported("archive.tar.gz"));
        assert!(!is_supported("no_extension"));
    }

    #[test]
    fn extension_round_trips() {
        for format in AudioFormat::ALL {
            assert_eq!(AudioFormat::from_extension(format.extension()), Some(format));
        }
    }
}
