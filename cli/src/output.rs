//! Artifact naming and persistence.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use audio_core::{extension_for, AssembledAudio};

/// `podcast_<sanitizedTopic>_<timestamp>`.
pub fn base_name(topic: &str, timestamp: &str) -> String {
    format!("podcast_{}_{}", sanitize_topic(topic), timestamp)
}

/// Compact, sortable, filesystem-safe.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Keep word characters, spaces and hyphens; cap at 30 characters;
/// spaces become underscores.
pub fn sanitize_topic(topic: &str) -> String {
    let kept: String = topic
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .take(30)
        .collect();
    kept.trim().replace(' ', "_")
}

pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn save_text(&self, file_name: &str, text: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn save_binary(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Persist script and audio under a shared base name. Audio with a
    /// known container format keeps the payload as-is; anything else
    /// (raw PCM in particular) is WAV-encoded first.
    pub fn save_podcast(
        &self,
        base: &str,
        script: &str,
        audio: &AssembledAudio,
    ) -> anyhow::Result<(PathBuf, PathBuf)> {
        let script_path = self.save_text(&format!("{base}.txt"), script)?;
        let audio_path = match audio.mime_type.as_deref().and_then(extension_for) {
            Some(ext) => self.save_binary(&format!("{base}{ext}"), &audio.data)?,
            None => self.save_binary(&format!("{base}.wav"), &audio.to_wav())?,
        };
        Ok((audio_path, script_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_punctuation_and_joins_words() {
        assert_eq!(sanitize_topic("Rust & WAV files!"), "Rust__WAV_files");
        assert_eq!(sanitize_topic("  padded  "), "padded");
        assert_eq!(sanitize_topic("kebab-case-topic"), "kebab-case-topic");
    }

    #[test]
    fn sanitize_caps_length_at_thirty_characters() {
        let long = "a".repeat(80);
        assert_eq!(sanitize_topic(&long).len(), 30);
    }

    #[test]
    fn base_name_layout() {
        assert_eq!(
            base_name("deep sea life", "20260825_120000"),
            "podcast_deep_sea_life_20260825_120000"
        );
    }

    #[test]
    fn raw_pcm_audio_is_wav_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let audio = AssembledAudio {
            data: vec![0u8; 16],
            mime_type: Some("audio/L16;rate=24000".to_string()),
        };

        let (audio_path, script_path) = writer.save_podcast("podcast_x_1", "S1: hi.", &audio).unwrap();
        assert!(audio_path.to_string_lossy().ends_with("podcast_x_1.wav"));
        assert!(script_path.to_string_lossy().ends_with("podcast_x_1.txt"));

        let bytes = fs::read(&audio_path).unwrap();
        assert_eq!(bytes.len(), 44 + 16);
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[test]
    fn known_container_audio_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let audio = AssembledAudio {
            data: b"not really mp3".to_vec(),
            mime_type: Some("audio/mpeg".to_string()),
        };

        let (audio_path, _) = writer.save_podcast("podcast_y_2", "S1: hi.", &audio).unwrap();
        assert!(audio_path.to_string_lossy().ends_with("podcast_y_2.mp3"));
        assert_eq!(fs::read(&audio_path).unwrap(), b"not really mp3");
    }
}
