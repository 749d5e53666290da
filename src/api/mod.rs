//! HTTP API server for the relay

pub mod health;
pub mod voice;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::Config;
use crate::speech::{ChatCompletion, FallbackTts, SpeechToText, TextToSpeech};

/// Shared state for API handlers
pub struct ApiState {
    pub config: Config,
    pub stt: SpeechToText,
    pub llm: ChatCompletion,
    pub tts: TextToSpeech,
    pub fallback_tts: FallbackTts,
}

impl ApiState {
    /// Build handler state and service clients from configuration
    ///
    /// # Errors
    ///
    /// Returns error if a service client rejects the configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let stt = SpeechToText::new(config.api_key.clone(), config.stt_model.clone())?;
        let llm = ChatCompletion::new(
            config.api_key.clone(),
            config.llm_model.clone(),
            config.system_prompt.clone(),
            config.llm_max_tokens,
            config.llm_temperature,
        )?;
        let tts = TextToSpeech::new(
            config.api_key.clone(),
            config.tts_model.clone(),
            config.tts_voice.clone(),
        )?;
        let fallback_tts = FallbackTts::new(config.fallback_lang.clone());

        Ok(Self {
            config,
            stt,
            llm,
            tts,
            fallback_tts,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(health::status))
        .route("/voice", post(voice::voice))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Serve the API until the process is interrupted
///
/// # Errors
///
/// Returns error if the listener cannot bind or the server fails
pub async fn serve(state: Arc<ApiState>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "relay listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
