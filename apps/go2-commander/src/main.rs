mod config;
mod keyboard;

use anyhow::{Context, Result};
use audio_cue::AudioPlayer;
use clap::{error::ErrorKind, Parser, ValueEnum};
use config::CommanderConfig;
use motion_sequencer::{install_ctrl_c, send_logged, ActionExecutor, StopSignal};
use sport_client::plugin::{new_sport_client, SportBackendKind};
use sport_client::SportCommand;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};
use voice_commands::{bind, run_listener, CommandClassifier, Dispatcher};

#[derive(Parser, Debug)]
#[command(name = "go2-commander")]
#[command(about = "Listen for spoken commands over UDP and act them out on a Go2")]
struct Args {
    /// Network interface that reaches the robot (e.g., eth0)
    interface: String,

    /// Sport client backend
    #[arg(long, value_enum, default_value_t = Backend::Mock)]
    backend: Backend,

    /// JSON config file; created with defaults if missing
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen address from the config
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Backend {
    Mock,
    Go2,
}

impl From<Backend> for SportBackendKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Mock => SportBackendKind::Mock,
            Backend::Go2 => SportBackendKind::Go2,
        }
    }
}

fn main() {
    setup_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => -1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to start runtime: {e}");
            std::process::exit(-1);
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => info!("Program exited cleanly"),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(-1);
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => CommanderConfig::load(path)?,
        None => CommanderConfig::default(),
    };
    let addr = args.bind.unwrap_or(config.bind);

    let stop = StopSignal::new();
    install_ctrl_c(&stop);

    let backend = SportBackendKind::from(args.backend);
    let mut client = new_sport_client(backend, &args.interface, config.sdk_timeout()?)
        .with_context(|| {
            format!(
                "opening {} sport client on {}",
                backend.as_str(),
                args.interface
            )
        })?;
    info!(
        backend = backend.as_str(),
        "Unitree Go2 sport client initialized on {}", args.interface
    );

    let socket = bind(addr).await?;

    info!("Entering pose mode");
    send_logged(client.as_mut(), &SportCommand::Pose(true));
    stop.sleep(config.pose_settle()).await;

    keyboard::watch_escape(&stop)?;

    let mut dispatcher = Dispatcher::new(
        CommandClassifier::new(config.keywords.clone()),
        ActionExecutor::new(config.timing(), stop.clone()),
        AudioPlayer::new(config.player.clone()),
        config.dispatch_settings(),
    );
    let stats = run_listener(&socket, &mut dispatcher, client.as_mut(), &stop).await;
    info!(
        received = stats.received,
        acted = stats.acted,
        unknown = stats.unknown,
        throttled = stats.throttled,
        "shutting down"
    );
    Ok(())
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_is_required() {
        let err = Args::try_parse_from(["go2-commander", "--backend", "mock"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults_and_overrides() {
        let args = Args::try_parse_from(["go2-commander", "eth0"]).unwrap();
        assert_eq!(args.interface, "eth0");
        assert_eq!(args.backend, Backend::Mock);
        assert!(args.config.is_none() && args.bind.is_none());

        let args =
            Args::try_parse_from(["go2-commander", "eth0", "--bind", "127.0.0.1:6000"]).unwrap();
        assert_eq!(args.bind, Some(SocketAddr::from(([127, 0, 0, 1], 6000))));
    }
}
