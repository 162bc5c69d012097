//! Chunk collection with a retry policy.
//!
//! Drives a streaming synthesis source to completion and accumulates the
//! raw audio payload. Transport failures retry the whole stream from the
//! start; a stream that completes without any audio is a terminal error.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::mime::AudioFormat;
use crate::wav::encode_wav;

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// One element of a streaming synthesis response. Payload-less elements
/// may still carry diagnostic text from the service.
#[derive(Debug, Clone, Default)]
pub struct AudioChunk {
    pub data: Option<Vec<u8>>,
    pub mime_type: Option<String>,
    pub text: Option<String>,
}

/// Transport-level failure while opening or reading a stream.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// A source of audio chunk streams. Each `stream` call opens a fresh
/// stream, so the collector can restart the whole sequence on retry.
#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn stream(
        &self,
    ) -> Result<BoxStream<'static, Result<AudioChunk, TransportError>>, TransportError>;
}

/// All payloads concatenated in arrival order, plus the MIME type of the
/// first chunk that declared one. Later chunks' MIME types are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledAudio {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl AssembledAudio {
    pub fn format(&self) -> AudioFormat {
        AudioFormat::parse_opt(self.mime_type.as_deref())
    }

    /// Encode the payload as a WAV buffer using the parsed format.
    pub fn to_wav(&self) -> Vec<u8> {
        encode_wav(&self.data, &self.format())
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    /// The stream completed without producing a single audio chunk.
    /// Terminal: the transport itself worked, so a retry adds nothing.
    #[error("no audio was generated; the stream completed without audio chunks")]
    Empty,

    /// Every attempt failed at the transport level.
    #[error("failed to generate audio after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Discrete lifecycle events, for progress reporting decoupled from the
/// collection loop. Delivery is best-effort; a closed receiver never
/// fails collection.
#[derive(Debug, Clone)]
pub enum CollectEvent {
    AttemptStarted { attempt: u32, max: u32 },
    ChunkReceived { bytes: usize },
    Diagnostic(String),
    AttemptFailed { attempt: u32, error: String },
    Completed { chunks: usize, bytes: usize },
}

fn emit(events: Option<&UnboundedSender<CollectEvent>>, event: CollectEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Drive `source` to completion, retrying the whole stream on transport
/// failure up to [`MAX_RETRIES`] times with a fixed [`RETRY_DELAY`]
/// between attempts. The buffer of a failed attempt is discarded
/// entirely; nothing carries over between attempts.
pub async fn collect_audio<S: AudioSource + ?Sized>(
    source: &S,
    events: Option<&UnboundedSender<CollectEvent>>,
) -> Result<AssembledAudio, CollectError> {
    let mut last_error = String::new();
    for attempt in 1..=MAX_RETRIES {
        emit(
            events,
            CollectEvent::AttemptStarted {
                attempt,
                max: MAX_RETRIES,
            },
        );
        match run_attempt(source, events).await {
            Ok((assembled, chunks)) => {
                if chunks == 0 {
                    return Err(CollectError::Empty);
                }
                if assembled.mime_type.is_none() {
                    emit(
                        events,
                        CollectEvent::Diagnostic(
                            "stream did not declare a MIME type; assuming raw PCM defaults".into(),
                        ),
                    );
                }
                emit(
                    events,
                    CollectEvent::Completed {
                        chunks,
                        bytes: assembled.data.len(),
                    },
                );
                return Ok(assembled);
            }
            Err(err) => {
                warn!(attempt, max = MAX_RETRIES, "audio stream failed: {err}");
                emit(
                    events,
                    CollectEvent::AttemptFailed {
                        attempt,
                        error: err.to_string(),
                    },
                );
                last_error = err.to_string();
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
    Err(CollectError::Exhausted {
        attempts: MAX_RETRIES,
        last_error,
    })
}

/// One attempt: open a fresh stream and drain it. Returning `Err` drops
/// the partial buffer with it.
async fn run_attempt<S: AudioSource + ?Sized>(
    source: &S,
    events: Option<&UnboundedSender<CollectEvent>>,
) -> Result<(AssembledAudio, usize), TransportError> {
    let mut stream = source.stream().await?;
    let mut data: Vec<u8> = Vec::new();
    let mut mime_type: Option<String> = None;
    let mut chunks = 0usize;

    while let Some(item) = stream.next().await {
        let chunk = item?;
        if let Some(payload) = chunk.data {
            if mime_type.is_none() {
                mime_type = chunk.mime_type;
            }
            emit(
                events,
                CollectEvent::ChunkReceived {
                    bytes: payload.len(),
                },
            );
            data.extend_from_slice(&payload);
            chunks += 1;
        } else if let Some(text) = chunk.text {
            let text = text.trim().to_string();
            if !text.is_empty() {
                debug!("stream diagnostic: {text}");
                emit(events, CollectEvent::Diagnostic(text));
            }
        }
    }

    Ok((AssembledAudio { data, mime_type }, chunks))
}
