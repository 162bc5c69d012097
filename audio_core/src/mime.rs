use serde::{Deserialize, Serialize};

/// Audio parameters carried by a raw-PCM MIME type such as
/// `audio/L16;rate=24000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub bits_per_sample: u16,
    pub sample_rate_hz: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            bits_per_sample: 16,
            sample_rate_hz: 24000,
        }
    }
}

impl AudioFormat {
    /// Parse bit depth and sample rate from a MIME type string.
    ///
    /// This never fails: a missing or malformed parameter keeps its
    /// default, so a vendor quirk in the format string cannot abort
    /// audio assembly. Only a well-formed parameter overrides a default.
    pub fn parse(mime_type: &str) -> Self {
        let mut format = Self::default();
        for segment in mime_type.split(';') {
            let segment = segment.trim();
            let lower = segment.to_ascii_lowercase();
            if let Some(value) = lower.strip_prefix("rate=") {
                if let Ok(rate) = value.trim().parse::<u32>() {
                    format.sample_rate_hz = rate;
                }
            } else if let Some(value) = segment.strip_prefix("audio/L") {
                if let Ok(bits) = value.trim().parse::<u16>() {
                    format.bits_per_sample = bits;
                }
            }
        }
        format
    }

    /// Like [`AudioFormat::parse`]; `None` yields the defaults.
    pub fn parse_opt(mime_type: Option<&str>) -> Self {
        mime_type.map(Self::parse).unwrap_or_default()
    }
}

/// File extension for a known audio MIME essence.
///
/// Raw-PCM types like `audio/L16` have no playable container of their own
/// and return `None`; the caller WAV-encodes those instead.
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => Some(".mp3"),
        "audio/ogg" => Some(".ogg"),
        "audio/flac" | "audio/x-flac" => Some(".flac"),
        "audio/aac" => Some(".aac"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some(".wav"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bits_and_rate() {
        let f = AudioFormat::parse("audio/L16;rate=24000");
        assert_eq!(f.bits_per_sample, 16);
        assert_eq!(f.sample_rate_hz, 24000);

        let f = AudioFormat::parse("audio/L24;rate=48000");
        assert_eq!(f.bits_per_sample, 24);
        assert_eq!(f.sample_rate_hz, 48000);
    }

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(AudioFormat::parse(""), AudioFormat::default());
        assert_eq!(AudioFormat::parse_opt(None), AudioFormat::default());
    }

    #[test]
    fn unrecognized_segments_are_ignored() {
        assert_eq!(
            AudioFormat::parse("garbage;nonsense=xyz"),
            AudioFormat::default()
        );
    }

    #[test]
    fn malformed_rate_keeps_default() {
        assert_eq!(AudioFormat::parse("rate=notanumber"), AudioFormat::default());
        let f = AudioFormat::parse("audio/L24;rate=notanumber");
        assert_eq!(f.bits_per_sample, 24);
        assert_eq!(f.sample_rate_hz, 24000);
    }

    #[test]
    fn malformed_bits_keeps_default() {
        let f = AudioFormat::parse("audio/Lxx;rate=16000");
        assert_eq!(f.bits_per_sample, 16);
        assert_eq!(f.sample_rate_hz, 16000);
    }

    #[test]
    fn rate_key_is_case_insensitive() {
        let f = AudioFormat::parse("audio/L16;RATE=32000");
        assert_eq!(f.sample_rate_hz, 32000);
    }

    #[test]
    fn segments_are_trimmed() {
        let f = AudioFormat::parse(" audio/L24 ; rate=48000 ");
        assert_eq!(f.bits_per_sample, 24);
        assert_eq!(f.sample_rate_hz, 48000);
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(extension_for("audio/mpeg"), Some(".mp3"));
        assert_eq!(extension_for("audio/ogg;codecs=opus"), Some(".ogg"));
        assert_eq!(extension_for("audio/wav"), Some(".wav"));
        assert_eq!(extension_for("audio/L16;rate=24000"), None);
        assert_eq!(extension_for(""), None);
    }
}
