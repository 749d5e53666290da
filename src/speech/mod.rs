//! External speech service clients
//!
//! Thin HTTP wrappers around the hosted STT, chat-completion and TTS
//! endpoints. All audio conditioning lives in [`crate::audio`]; these
//! types only move bytes and text.

mod llm;
mod stt;
pub mod tts;

pub use llm::ChatCompletion;
pub use stt::SpeechToText;
pub use tts::{FallbackTts, TextToSpeech};
