use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use log::{debug, info};
use velocio::{Command, Frame, SessionConfig, encode_tokens};

mod help;
mod plc_client;

use plc_client::{ClientTarget, OutputStyle, PlcClient};

#[derive(Parser, Debug)]
#[command(name = "ctvelocio")]
#[command(version)]
#[command(about = "Control Things Velocio: send instructions to a Velocio PLC", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Named instruction to send (listed below)
    #[arg(value_name = "INSTRUCTION", conflicts_with = "raw")]
    instruction: Option<String>,

    /// Raw hex tokens to send; a token may be an inclusive range such as [00,04]
    #[arg(long, value_name = "TOKEN", num_args = 1..)]
    raw: Option<Vec<String>>,

    /// Serial device the PLC is attached to
    #[arg(short, long, env = "VELOCIO_PORT", default_value = velocio::DEFAULT_PORT)]
    port: String,

    /// Reach the PLC through a serial-over-TCP bridge instead
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "unix")]
    tcp: Option<String>,

    /// Reach the PLC through a Unix-domain socket bridge instead
    #[arg(long, value_name = "PATH")]
    unix: Option<PathBuf>,

    /// Pause after each write and each read, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Print hex and ASCII views without colour
    #[arg(long)]
    plain: bool,

    /// Print the frames that would be sent without opening the device
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn target(&self) -> ClientTarget {
        if let Some(addr) = &self.tcp {
            ClientTarget::Tcp(addr.clone())
        } else if let Some(path) = &self.unix {
            ClientTarget::Unix(path.clone())
        } else {
            ClientTarget::Serial(self.port.clone())
        }
    }

    fn session_config(&self) -> SessionConfig {
        match self.delay_ms {
            Some(ms) => SessionConfig::new().with_delays(Duration::from_millis(ms)),
            None => SessionConfig::default(),
        }
    }

    fn style(&self) -> OutputStyle {
        if self.plain {
            OutputStyle::Plain
        } else {
            OutputStyle::Colored
        }
    }

    /// Resolves the instruction or raw tokens into frames.
    ///
    /// `None` means nothing was asked for.
    fn frames(&self) -> velocio::Result<Option<Vec<Frame>>> {
        if let Some(tokens) = &self.raw {
            return encode_tokens(tokens).map(Some);
        }
        match &self.instruction {
            Some(name) => Ok(Some(name.parse::<Command>()?.frames())),
            None => Ok(None),
        }
    }
}

fn command() -> clap::Command {
    Cli::command().after_help(help::instruction_help())
}

/// Help goes out with a failing status, like any other usage problem.
fn usage_and_exit() -> ! {
    eprintln!("{}", command().render_help());
    process::exit(1);
}

fn parse_cli() -> Cli {
    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = e.print();
                process::exit(1);
            }
            _ => e.exit(),
        },
    };
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let frames = match cli.frames() {
        Ok(Some(frames)) => frames,
        Ok(None) => usage_and_exit(),
        Err(velocio::Error::UnknownCommand(name)) => {
            eprintln!("unknown instruction: {}", name);
            usage_and_exit()
        }
        Err(e) => return Err(e.into()),
    };
    debug!("resolved {} frame(s)", frames.len());

    let client = PlcClient::new(cli.target(), cli.session_config(), cli.style());
    let sent = if cli.dry_run {
        client.preview(&frames)
    } else {
        client.send(&frames)?
    };
    info!("done: {} frame(s)", sent);
    Ok(())
}

fn main() {
    let cli = parse_cli();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!();
        eprintln!("[!] ERROR");
        eprintln!("[!] MSG: {:#}", e);
        eprintln!();
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let matches = command().try_get_matches_from(args).unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        command().debug_assert();
    }

    #[test]
    fn test_named_instruction() {
        let cli = parse(&["ctvelocio", "play", "--port", "/dev/ttyUSB0"]);
        assert_eq!(cli.target(), ClientTarget::Serial("/dev/ttyUSB0".into()));
        let frames = cli.frames().unwrap().unwrap();
        assert_eq!(frames, Command::Play.frames());
    }

    #[test]
    fn test_raw_tokens_with_range() {
        let cli = parse(&["ctvelocio", "--raw", "56", "[00,04]"]);
        assert_eq!(cli.frames().unwrap().unwrap().len(), 5);
        assert_eq!(cli.style(), OutputStyle::Colored);
    }

    #[test]
    fn test_unknown_instruction() {
        let cli = parse(&["ctvelocio", "launch"]);
        assert!(matches!(cli.frames(), Err(velocio::Error::UnknownCommand(_))));
    }

    #[test]
    fn test_instruction_conflicts_with_raw() {
        let err = command()
            .try_get_matches_from(["ctvelocio", "play", "--raw", "56"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_help_and_empty_invocation() {
        let err = command().try_get_matches_from(["ctvelocio", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = command().try_get_matches_from(["ctvelocio"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
    }

    #[test]
    fn test_bridge_targets_and_delay() {
        let cli = parse(&["ctvelocio", "pause", "--tcp", "10.0.0.5:4001", "--delay-ms", "20", "--plain"]);
        assert_eq!(cli.target(), ClientTarget::Tcp("10.0.0.5:4001".into()));
        assert_eq!(cli.session_config().settle_delay, Duration::from_millis(20));
        assert_eq!(cli.session_config().drain_delay, Duration::from_millis(20));
        assert_eq!(cli.style(), OutputStyle::Plain);

        let cli = parse(&["ctvelocio", "pause", "--unix", "/tmp/plc.sock"]);
        assert_eq!(cli.target(), ClientTarget::Unix(PathBuf::from("/tmp/plc.sock")));
    }
}
