use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aria_relay::api::{self, ApiState};
use aria_relay::audio::{DeviceProfile, pipeline};
use aria_relay::Config;

/// Aria - voice assistant relay for embedded speaker devices
#[derive(Parser)]
#[command(name = "aria", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "ARIA_PORT", default_value = "8001")]
    port: u16,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a WAV file to device-ready raw PCM (offline pipeline check)
    Convert {
        /// Input WAV file
        input: PathBuf,
        /// Output raw PCM file
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Secrets come from the environment; a local .env file is honored.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,aria_relay=info",
        1 => "info,aria_relay=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Convert { input, output } => convert(&input, &output),
        };
    }

    tracing::info!(port = cli.port, "starting aria relay");

    let config = Config::load()?;
    tracing::debug!(
        stt_model = %config.stt_model,
        llm_model = %config.llm_model,
        tts_model = %config.tts_model,
        device = ?config.device,
        "loaded configuration"
    );

    let state = Arc::new(ApiState::from_config(config)?);
    api::serve(state, cli.port).await?;

    Ok(())
}

/// Run the container pipeline on a local file
fn convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let wav = std::fs::read(input)?;
    let profile = DeviceProfile::default();
    let pcm = pipeline::process_wav(&wav, &profile)?;
    std::fs::write(output, &pcm)?;

    println!(
        "Wrote {} bytes of raw PCM ({} Hz, {}-bit, {} channels)",
        pcm.len(),
        profile.sample_rate,
        profile.bits_per_sample,
        profile.channels
    );

    Ok(())
}
