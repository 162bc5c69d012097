//! Streaming multi-speaker speech synthesis over `streamGenerateContent`.
//!
//! The response arrives as server-sent events whose `data:` frames carry
//! base64-encoded raw PCM. This module turns that transport into the
//! `AudioChunk` stream the collector consumes; all retry and assembly
//! policy lives in `audio_core`.

use async_stream::try_stream;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use futures::stream::BoxStream;
use futures::StreamExt;

use audio_core::{AudioChunk, AudioSource, TransportError};

use crate::{schema, voices, GeminiClient, API_BASE};

/// One speaker's name as it appears in the script, plus the prebuilt
/// voice that reads their lines.
#[derive(Debug, Clone)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice: String,
}

/// A reusable streaming synthesis call. Every `stream` invocation opens
/// a fresh HTTP stream, so the collector can restart the whole chunk
/// sequence on retry.
pub struct TtsSource {
    client: GeminiClient,
    script: String,
    speakers: [SpeakerVoice; 2],
}

impl GeminiClient {
    /// Prepare a multi-speaker synthesis call. `accent` selects the
    /// reading instruction prepended to the script.
    pub fn tts_source(&self, script: &str, accent: &str, speakers: [SpeakerVoice; 2]) -> TtsSource {
        let instruction = voices::accent_instruction(accent);
        TtsSource {
            client: self.clone(),
            script: format!("{instruction}\n\n{script}"),
            speakers,
        }
    }
}

#[async_trait]
impl AudioSource for TtsSource {
    async fn stream(
        &self,
    ) -> Result<BoxStream<'static, Result<AudioChunk, TransportError>>, TransportError> {
        let url = format!(
            "{API_BASE}/{}:streamGenerateContent?alt=sse",
            self.client.tts_model
        );
        let body = schema::GenerateContentRequest {
            contents: vec![schema::Content {
                role: "user",
                parts: vec![schema::Part { text: &self.script }],
            }],
            generation_config: schema::GenerationConfig {
                temperature: 1.0,
                max_output_tokens: None,
                response_modalities: Some(vec!["AUDIO"]),
                speech_config: Some(schema::SpeechConfig {
                    multi_speaker_voice_config: schema::MultiSpeakerVoiceConfig {
                        speaker_voice_configs: self
                            .speakers
                            .iter()
                            .map(|sv| schema::SpeakerVoiceConfig {
                                speaker: &sv.speaker,
                                voice_config: schema::VoiceConfig {
                                    prebuilt_voice_config: schema::PrebuiltVoiceConfig {
                                        voice_name: &sv.voice,
                                    },
                                },
                            })
                            .collect(),
                    },
                }),
            },
        };

        let response = self
            .client
            .http
            .post(&url)
            .header("x-goog-api-key", &self.client.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TransportError::new(format!("TTS request failed: {e}")))?;

        let mut frames = response.bytes_stream();
        let stream = try_stream! {
            let mut buffer: Vec<u8> = Vec::new();
            while let Some(piece) = frames.next().await {
                let piece = piece
                    .map_err(|e| TransportError::new(format!("stream read failed: {e}")))?;
                buffer.extend_from_slice(&piece);
                // SSE frames can split across network reads.
                while let Some(end) = buffer.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=end).collect();
                    let line = String::from_utf8_lossy(&line);
                    if let Some(chunk) = parse_sse_line(line.trim_end())? {
                        yield chunk;
                    }
                }
            }
            // The final frame may arrive without a trailing newline.
            if !buffer.is_empty() {
                let line = String::from_utf8_lossy(&buffer).into_owned();
                if let Some(chunk) = parse_sse_line(line.trim_end())? {
                    yield chunk;
                }
            }
        };
        Ok(stream.boxed())
    }
}

/// Decode one SSE line into an audio chunk. Non-data lines, keep-alives,
/// and the `[DONE]` sentinel yield `None`.
fn parse_sse_line(line: &str) -> Result<Option<AudioChunk>, TransportError> {
    let Some(payload) = line.trim().strip_prefix("data:") else {
        return Ok(None);
    };
    let payload = payload.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return Ok(None);
    }

    let response: schema::GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|e| TransportError::new(format!("malformed stream frame: {e}")))?;
    let Some(part) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
    else {
        return Ok(None);
    };

    if let Some(inline) = part.inline_data {
        let data = match inline.data {
            Some(encoded) => Some(general_purpose::STANDARD.decode(encoded.as_bytes()).map_err(
                |e| TransportError::new(format!("invalid audio payload encoding: {e}")),
            )?),
            None => None,
        };
        return Ok(Some(AudioChunk {
            data,
            mime_type: inline.mime_type,
            text: None,
        }));
    }

    Ok(Some(AudioChunk {
        text: part.text,
        ..Default::default()
    }))
}
