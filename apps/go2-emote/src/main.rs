use anyhow::{Context, Result};
use audio_cue::{AudioPlayer, PlayerConfig};
use clap::{error::ErrorKind, Parser, Subcommand, ValueEnum};
use motion_sequencer::presets::{self, TurnDirection};
use motion_sequencer::{install_ctrl_c, Routine, StopSignal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sport_client::plugin::{new_sport_client, SportBackendKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

const DEFAULT_CUE_ROOT: &str = "/home/verse/unitree_sdk2/example/go2w";
const SDK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(
    name = "go2-emote",
    about = "Scripted emotion routines for a Go2",
    disable_help_subcommand = true
)]
struct Cli {
    /// Network interface that reaches the robot (e.g., eth0)
    interface: String,

    /// Sport client backend
    #[arg(long, value_enum, default_value_t = Backend::Mock, global = true)]
    backend: Backend,

    /// Directory holding the zhazha/ and minions/ cue folders
    #[arg(long, default_value = DEFAULT_CUE_ROOT, global = true)]
    cue_root: PathBuf,

    /// External audio player program
    #[arg(long, default_value = "aplay", global = true)]
    player: String,

    /// Seed the wiggle randomness for a repeatable run
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    routine: RoutineCommand,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Backend {
    Mock,
    Go2,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Side {
    Left,
    Right,
}

#[derive(Subcommand, Debug)]
enum RoutineCommand {
    /// Wiggle while a random talking clip plays
    Talk {
        /// Clip directory (default: <cue-root>/zhazha/talking)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Look up and sway to a random sad clip
    Sad {
        /// Clip directory (default: <cue-root>/zhazha/sad)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Quick nose-down head shake
    Happy {
        /// Clip (default: <cue-root>/zhazha/happy/h2.wav)
        #[arg(long)]
        clip: Option<PathBuf>,
    },
    /// Lean along with a shout, then collapse
    Sing {
        /// Clip (default: <cue-root>/minions/shout.wav)
        #[arg(long)]
        clip: Option<PathBuf>,
    },
    /// Rotate in place for a second
    Turn {
        #[arg(value_enum, default_value_t = Side::Right)]
        side: Side,
    },
}

impl RoutineCommand {
    fn build(&self, cue_root: &Path) -> Routine {
        let path_or = |given: &Option<PathBuf>, rel: &str| {
            given.clone().unwrap_or_else(|| cue_root.join(rel))
        };
        match self {
            RoutineCommand::Talk { dir } => presets::talk(path_or(dir, "zhazha/talking")),
            RoutineCommand::Sad { dir } => presets::sad(path_or(dir, "zhazha/sad")),
            RoutineCommand::Happy { clip } => presets::happy(path_or(clip, "zhazha/happy/h2.wav")),
            RoutineCommand::Sing { clip } => presets::sing(path_or(clip, "minions/shout.wav")),
            RoutineCommand::Turn { side } => presets::turn(match side {
                Side::Left => TurnDirection::Left,
                Side::Right => TurnDirection::Right,
            }),
        }
    }
}

fn main() {
    setup_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
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

    if let Err(e) = runtime.block_on(run(cli)) {
        error!("{e:#}");
        std::process::exit(-1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let backend = match cli.backend {
        Backend::Mock => SportBackendKind::Mock,
        Backend::Go2 => SportBackendKind::Go2,
    };
    let mut client = new_sport_client(backend, &cli.interface, SDK_TIMEOUT)
        .with_context(|| {
            format!(
                "opening {} sport client on {}",
                backend.as_str(),
                cli.interface
            )
        })?;

    let stop = StopSignal::new();
    install_ctrl_c(&stop);

    let player = AudioPlayer::new(PlayerConfig {
        program: cli.player.clone(),
        ..PlayerConfig::default()
    });
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let routine = cli.routine.build(&cli.cue_root);
    let report = routine
        .run(client.as_mut(), &player, &mut rng, &stop)
        .await
        .with_context(|| format!("routine {} aborted", routine.name))?;

    info!(
        ticks = report.ticks,
        stopped = report.stopped,
        "Routine {} completed",
        report.name
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
    use motion_sequencer::{Choreography, Cue};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("go2-emote").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_interface_is_required() {
        let err = Cli::try_parse_from(["go2-emote", "talk"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        // no arguments at all prints usage, which main still maps to -1
        let err = Cli::try_parse_from(["go2-emote"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_default_cue_paths() {
        let cli = parse(&["eth0", "talk"]);
        let routine = cli.routine.build(&cli.cue_root);
        match routine.cue {
            Cue::RandomTracked(library) => assert_eq!(
                library.dir(),
                Path::new("/home/verse/unitree_sdk2/example/go2w/zhazha/talking")
            ),
            other => panic!("unexpected cue {other:?}"),
        }

        let cli = parse(&["eth0", "--cue-root", "/tmp/cues", "sing"]);
        let routine = cli.routine.build(&cli.cue_root);
        assert!(matches!(
            routine.cue,
            Cue::Detached(ref p) if p == Path::new("/tmp/cues/minions/shout.wav")
        ));
        assert!(matches!(routine.choreography, Choreography::Lean(_)));
    }

    #[test]
    fn test_overrides_and_turn_side() {
        let cli = parse(&["eth0", "happy", "--clip", "/tmp/yay.wav"]);
        let routine = cli.routine.build(&cli.cue_root);
        assert!(matches!(
            routine.cue,
            Cue::Detached(ref p) if p == Path::new("/tmp/yay.wav")
        ));

        let cli = parse(&["eth0", "turn", "left"]);
        assert_eq!(cli.routine.build(&cli.cue_root).name, "turn-left");
        let cli = parse(&["eth0", "turn"]);
        assert_eq!(cli.routine.build(&cli.cue_root).name, "turn-right");
    }
}
