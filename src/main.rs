use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use userinfos_panel::binding::{self, Action};
use userinfos_panel::config::{AppConfig, ConfigError};
use userinfos_panel::gateway::{BackendGateway, FixtureGateway, GatewayError, InvokeGateway};
use userinfos_panel::panel::UserInfoPanel;
use userinfos_panel::render::render_panel;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Gateway(#[from] GatewayError),
    #[error("reading input failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "userinfos", about = "Look up a provider's user properties through the desktop host")]
struct Cli {
    /// Provider selected at start; overrides `USERINFOS_PROVIDER`.
    #[arg(long)]
    provider: Option<String>,

    /// Answer lookups from a JSON fixture instead of the host shell.
    #[arg(long, env = "USERINFOS_FIXTURE")]
    fixture: Option<PathBuf>,

    /// Actions to run in order (`fetch`, `clear`, `"provider NAME"`, `show`).
    /// Reads actions from stdin when none are given.
    actions: Vec<Action>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "userinfos failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = AppConfig::from_env()?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }

    let gateway: Arc<dyn BackendGateway> = match &cli.fixture {
        Some(path) => {
            let fixture = FixtureGateway::load(path).await?;
            info!(path = %path.display(), providers = ?fixture.providers(), "using fixture gateway");
            Arc::new(fixture)
        }
        None => {
            let invoke = InvokeGateway::new(&config.gateway)?;
            info!(endpoint = invoke.endpoint(), "using host invoke gateway");
            Arc::new(invoke)
        }
    };

    let panel = Arc::new(UserInfoPanel::from_config(gateway, &config));

    if cli.actions.is_empty() {
        interactive(panel).await?;
    } else {
        binding::run_script(&panel, cli.actions, |text| print!("{text}")).await;
        print!("{}", render_panel(&panel.snapshot()));
    }
    Ok(())
}

/// Read actions from stdin, re-rendering on every state change.
async fn interactive(panel: Arc<UserInfoPanel>) -> Result<(), AppError> {
    print!("{}", render_panel(&panel.snapshot()));
    let renderer = tokio::spawn(binding::render_changes(panel.subscribe(), |text| print!("{text}")));

    let stdin = BufReader::new(tokio::io::stdin());
    binding::run_session(&panel, stdin, |text| print!("{text}")).await?;

    // Dropping the last handle closes the channel; the renderer prints the
    // final state and returns.
    drop(panel);
    if let Err(e) = renderer.await {
        error!(error = %e, "renderer task failed");
    }
    Ok(())
}
