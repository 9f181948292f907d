use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fint_cli::input::spawn_line_reader;
use fint_cli::logging::init_tracing;
use fint_cli::settings::load_config;
use fint_cli::{Cli, Exit, Screen};
use fint_core::services::{OtpFlowConfig, OtpSession};
use fint_infra::{FileSessionStore, HttpOtpApi};
use fint_shared::config::Environment;
use fint_shared::utils::email::mask_email;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Environment specific file first; dotenvy never overrides variables already set
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        base_url = %config.api.base_url,
        digits = config.otp.code_length,
        "Starting fint-otp"
    );

    let flow = OtpFlowConfig::try_from(&config.otp)?;
    let api = Arc::new(HttpOtpApi::new(&config.api).context("Failed to create API client")?);
    let store = Arc::new(FileSessionStore::new(cli.token_file));
    match store.load_token(&cli.email).await {
        Ok(Some(_)) => info!(
            email = %mask_email(&cli.email),
            "Account already has a stored token; it is replaced on success"
        ),
        Ok(None) => {}
        Err(e) => warn!(error = %e, path = %store.path().display(), "Token file is unreadable"),
    }
    let session = Arc::new(OtpSession::mount(api, &cli.email, flow)?.with_session_store(store));

    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
        .context("Failed to start the input reader")?;
    let exit = Screen::new(session).run(lines, tokio::io::stdout()).await?;

    info!(exit = ?exit, "fint-otp finished");

    Ok(match exit {
        Exit::Verified => ExitCode::SUCCESS,
        Exit::Quit | Exit::InputClosed => ExitCode::FAILURE,
    })
}
