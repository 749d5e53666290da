//! Aria Relay - voice assistant relay for embedded speaker devices
//!
//! Bridges a microphone-equipped embedded device to hosted
//! speech-to-text, chat-completion and speech-synthesis services:
//!
//! ```text
//! mic PCM ──▶ framer ──▶ [STT] ──▶ text ──▶ [LLM] ──▶ text ──▶ [TTS]
//!                                                                │
//!   device PCM ◀── parse → mix → gain → resample → widen ◀── WAV ┘
//! ```
//!
//! The `audio` module is the in-repo engineering: byte-exact WAV
//! framing and parsing plus the conditioning pipeline that produces
//! the fixed 16 kHz / 16-bit / stereo stream the speaker driver
//! expects. The `speech` module is thin HTTP plumbing around the
//! hosted services, and `api` exposes the whole round trip as a
//! single POST endpoint.

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod speech;

pub use audio::DeviceProfile;
pub use config::Config;
pub use error::{Error, Result};
