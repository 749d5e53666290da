//! Voice round-trip endpoint
//!
//! Accepts raw microphone PCM (device rate, mono, 16-bit LE), runs
//! the STT -> LLM -> TTS relay and returns device-ready PCM with the
//! audio format announced in response headers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::audio::{self, pipeline};
use crate::speech::tts;

use super::ApiState;

/// Spoken when the transcript comes back empty (silence, breath noise)
const EMPTY_TRANSCRIPT_FALLBACK: &str = "Hello";

/// Process one voice interaction
pub async fn voice(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Response, VoiceError> {
    if body.is_empty() {
        return Err(VoiceError::BadRequest("empty audio body"));
    }
    tracing::info!(bytes = body.len(), "received microphone audio");

    let profile = &state.config.device;

    // Microphone input arrives headerless; wrap it for the STT API.
    let wav = audio::frame_pcm(&body, profile.sample_rate, 1, profile.bits_per_sample);

    let mut user_text = state
        .stt
        .transcribe(&wav)
        .await
        .map_err(|e| VoiceError::TranscriptionFailed(e.to_string()))?;
    if user_text.is_empty() {
        user_text = EMPTY_TRANSCRIPT_FALLBACK.to_string();
    }

    let reply = state
        .llm
        .complete(&user_text)
        .await
        .map_err(|e| VoiceError::CompletionFailed(e.to_string()))?;

    let device_pcm = match state.tts.synthesize(&reply).await {
        Ok(wav_bytes) => pipeline::process_wav(&wav_bytes, profile)
            .map_err(|e| VoiceError::AudioProcessingFailed(e.to_string()))?,
        Err(e) => {
            tracing::warn!(error = %e, "primary synthesis failed, using fallback voice");
            let clean = tts::strip_expression_tags(&reply);
            let raw = state
                .fallback_tts
                .synthesize(&clean, profile)
                .await
                .map_err(|e| VoiceError::SynthesisFailed(e.to_string()))?;
            pipeline::process_raw(&raw, profile)
        }
    };

    tracing::info!(bytes = device_pcm.len(), "returning device audio");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/pcm".to_string()),
            (
                HeaderName::from_static("x-audio-sample-rate"),
                profile.sample_rate.to_string(),
            ),
            (
                HeaderName::from_static("x-audio-channels"),
                profile.channels.to_string(),
            ),
            (
                HeaderName::from_static("x-audio-bits"),
                profile.bits_per_sample.to_string(),
            ),
        ],
        device_pcm,
    )
        .into_response())
}

/// Voice endpoint errors
#[derive(Debug)]
pub enum VoiceError {
    BadRequest(&'static str),
    TranscriptionFailed(String),
    CompletionFailed(String),
    SynthesisFailed(String),
    AudioProcessingFailed(String),
}

impl IntoResponse for VoiceError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::TranscriptionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "transcription_failed",
                msg,
            ),
            Self::CompletionFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "completion_failed", msg)
            }
            Self::SynthesisFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "synthesis_failed", msg)
            }
            Self::AudioProcessingFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "audio_processing_failed",
                msg,
            ),
        };

        (
            status,
            axum::Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}
