//! Audio assembly pipeline.
//!
//! Turns a stream of raw PCM byte chunks from a remote synthesis source
//! into one correctly-headered WAV file: MIME parameter parsing, chunk
//! accumulation with a retry policy, and the WAV container encoder.

pub mod collect;
pub mod mime;
pub mod wav;

pub use collect::{
    collect_audio, AssembledAudio, AudioChunk, AudioSource, CollectError, CollectEvent,
    TransportError, MAX_RETRIES, RETRY_DELAY,
};
pub use mime::{extension_for, AudioFormat};
pub use wav::encode_wav;
