//! Text-to-speech synthesis with a fallback voice
//!
//! The primary provider returns a WAV container for the audio
//! pipeline to condition. The fallback route fetches MP3 from the
//! Google Translate TTS endpoint and shells out to `ffmpeg` to decode
//! straight into the device format, so only the gain-only raw path is
//! needed afterward.

use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::audio::DeviceProfile;
use crate::{Error, Result};

const SPEECH_URL: &str = "https://api.groq.com/openai/v1/audio/speech";

const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

static EXPRESSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid expression tag pattern"));

/// Remove inline expression tags (`<giggle>`, `<sigh>`, ...)
///
/// The primary voice model interprets them; the fallback voice would
/// read them aloud.
#[must_use]
pub fn strip_expression_tags(text: &str) -> String {
    EXPRESSION_TAG.replace_all(text, "").to_string()
}

/// Synthesizes speech via the primary hosted voice model
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
}

impl TextToSpeech {
    /// Create a new TTS client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String, voice: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("API key required for TTS".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            voice,
        })
    }

    /// Synthesize text to a WAV container
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API reports an error
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SpeechRequest<'a> {
            model: &'a str,
            voice: &'a str,
            input: &'a str,
            response_format: &'a str,
        }

        let request = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: "wav",
        };

        let response = self
            .client
            .post(SPEECH_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        tracing::debug!(audio_bytes = audio.len(), "primary synthesis complete");
        Ok(audio.to_vec())
    }
}

/// Fallback synthesis via the Google Translate TTS endpoint
///
/// Returns raw PCM already in the device format.
pub struct FallbackTts {
    client: reqwest::Client,
    lang: String,
}

impl FallbackTts {
    /// Create a fallback TTS client for the given language code
    #[must_use]
    pub fn new(lang: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            lang,
        }
    }

    /// Synthesize text to raw PCM in the device format
    ///
    /// # Errors
    ///
    /// Returns error if the fetch fails or `ffmpeg` cannot decode
    pub async fn synthesize(&self, text: &str, profile: &DeviceProfile) -> Result<Vec<u8>> {
        let url = format!(
            "https://translate.google.com/translate_tts?ie=UTF-8&q={}&tl={}&client=tw-ob",
            urlencoding::encode(text),
            self.lang
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", FALLBACK_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Tts(format!("fallback TTS error: status {status}")));
        }

        let mp3 = response.bytes().await?.to_vec();
        tracing::debug!(mp3_bytes = mp3.len(), "fallback synthesis fetched");
        decode_mp3(mp3, profile).await
    }
}

/// Decode MP3 bytes to device-format raw PCM via an ffmpeg child
async fn decode_mp3(mp3: Vec<u8>, profile: &DeviceProfile) -> Result<Vec<u8>> {
    let mut child = Command::new("ffmpeg")
        .args([
            "-i",
            "pipe:0",
            "-f",
            "s16le",
            "-acodec",
            "pcm_s16le",
            "-ar",
            &profile.sample_rate.to_string(),
            "-ac",
            &profile.channels.to_string(),
            "pipe:1",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Audio(format!("failed to spawn ffmpeg: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Audio("ffmpeg stdin unavailable".to_string()))?;

    // Feed the input concurrently; waiting to write everything before
    // draining stdout can deadlock on the pipe buffer.
    let writer = tokio::spawn(async move {
        stdin.write_all(&mp3).await?;
        stdin.shutdown().await
    });

    let output = child.wait_with_output().await?;
    writer
        .await
        .map_err(|e| Error::Audio(format!("ffmpeg feed task failed: {e}")))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Audio(format!(
            "ffmpeg exited with {}: {stderr}",
            output.status
        )));
    }

    tracing::debug!(pcm_bytes = output.stdout.len(), "fallback audio decoded");
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_expression_tags() {
        assert_eq!(
            strip_expression_tags("Hmm, <think> let me see... <giggle> sure!"),
            "Hmm,  let me see...  sure!"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_expression_tags("hello there"), "hello there");
    }

    #[test]
    fn unclosed_angle_bracket_survives() {
        assert_eq!(strip_expression_tags("a < b"), "a < b");
    }
}
