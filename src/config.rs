//! Relay configuration
//!
//! Secrets come from the environment (a local `.env` file is honored
//! by the binary); everything else has defaults that an optional TOML
//! file at `~/.config/aria/relay.toml` can partially overlay.

use std::path::PathBuf;

use serde::Deserialize;

use crate::audio::DeviceProfile;
use crate::{Error, Result};

/// Default assistant persona for the completion stage
const DEFAULT_SYSTEM_PROMPT: &str = "You are Aria, a warm and friendly voice assistant. \
Keep responses concise (1-2 sentences max) since they will be spoken aloud. \
Be natural and conversational with a completely human voice. \
Use expression tags like <giggle>, <chuckle>, <sigh> or <excited> to convey emotion naturally.";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the hosted STT/LLM/TTS services
    pub api_key: String,
    pub stt_model: String,
    pub llm_model: String,
    pub system_prompt: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub tts_model: String,
    pub tts_voice: String,
    /// Language code for the fallback voice
    pub fallback_lang: String,
    /// Output contract of the playback device
    pub device: DeviceProfile,
}

/// Top-level TOML overlay schema; all fields optional
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub speech: SpeechFileConfig,

    #[serde(default)]
    pub device: DeviceFileConfig,
}

/// Speech service configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// STT model (e.g. "whisper-large-v3-turbo")
    pub stt_model: Option<String>,

    /// Completion model (e.g. "llama-3.3-70b-versatile")
    pub llm_model: Option<String>,

    /// Assistant persona prompt
    pub system_prompt: Option<String>,

    pub llm_max_tokens: Option<u32>,

    pub llm_temperature: Option<f32>,

    /// TTS model identifier
    pub tts_model: Option<String>,

    /// TTS voice identifier
    pub tts_voice: Option<String>,

    /// Fallback voice language code (e.g. "en")
    pub fallback_lang: Option<String>,
}

/// Playback device overrides
#[derive(Debug, Default, Deserialize)]
pub struct DeviceFileConfig {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub gain: Option<f32>,
}

impl Config {
    /// Load configuration from the environment plus the TOML overlay
    ///
    /// # Errors
    ///
    /// Returns error if `GROQ_API_KEY` is not set
    pub fn load() -> Result<Self> {
        Self::from_overlay(&load_config_file())
    }

    fn from_overlay(file: &ConfigFile) -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Error::Config("GROQ_API_KEY not set".to_string()))?;

        let defaults = DeviceProfile::default();
        let device = DeviceProfile {
            sample_rate: file.device.sample_rate.unwrap_or(defaults.sample_rate),
            channels: file.device.channels.unwrap_or(defaults.channels),
            bits_per_sample: defaults.bits_per_sample,
            gain: file.device.gain.unwrap_or(defaults.gain),
        };

        let speech = &file.speech;
        Ok(Self {
            api_key,
            stt_model: speech
                .stt_model
                .clone()
                .unwrap_or_else(|| "whisper-large-v3-turbo".to_string()),
            llm_model: speech
                .llm_model
                .clone()
                .unwrap_or_else(|| "llama-3.3-70b-versatile".to_string()),
            system_prompt: speech
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            llm_max_tokens: speech.llm_max_tokens.unwrap_or(150),
            llm_temperature: speech.llm_temperature.unwrap_or(0.7),
            tts_model: speech
                .tts_model
                .clone()
                .unwrap_or_else(|| "canopylabs/orpheus-v1-english".to_string()),
            tts_voice: speech.tts_voice.clone().unwrap_or_else(|| "autumn".to_string()),
            fallback_lang: speech.fallback_lang.clone().unwrap_or_else(|| "en".to_string()),
            device,
        })
    }
}

/// Load the TOML overlay from the standard path
///
/// Returns `ConfigFile::default()` if the file doesn't exist or can't
/// be parsed.
#[must_use]
pub fn load_config_file() -> ConfigFile {
    let Some(path) = config_file_path() else {
        return ConfigFile::default();
    };

    if !path.exists() {
        return ConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                ConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            ConfigFile::default()
        }
    }
}

/// Return the overlay path: `~/.config/aria/relay.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("aria").join("relay.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overlay_parses() {
        let file: ConfigFile = toml::from_str(
            r#"
[speech]
tts_voice = "aurora"

[device]
gain = 0.5
"#,
        )
        .unwrap();

        assert_eq!(file.speech.tts_voice.as_deref(), Some("aurora"));
        assert_eq!(file.device.gain, Some(0.5));
        assert!(file.speech.stt_model.is_none());
        assert!(file.device.sample_rate.is_none());
    }

    #[test]
    fn empty_overlay_parses() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.speech.llm_model.is_none());
    }
}
