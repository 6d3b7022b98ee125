//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for refbox
#[derive(Parser, Debug)]
#[command(name = "refbox")]
#[command(author, version, about = "Referee decision lights for a single lifting platform")]
#[command(long_about = r#"
refbox turns three referee keypads into decision lights.

Keys 1-6 are the referee keypads: odd keys vote white (good lift), even
keys vote red (no lift), for referees 1, 2 and 3 in turn. As soon as two
referees agree the down signal is given; the lights follow once all
three have voted.

Besides the keypad board, the platform runs a mirrored board for the
athlete and a jury console that sees every vote as it comes in.

Operator commands (one per line, keys may be chained, e.g. "135"):
  1-6   referee keypads        r   reset for the next attempt
  s     start athlete clock    t   stop athlete clock
  b     start a break          h   hide the boards
  ?     help                   q   quit

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./refbox.toml       Project-level config
3. ~/.config/refbox/config.toml   Global config
"#)]
pub struct Cli {
    /// Mirror the keypad board for the athlete instead of the audience
    #[arg(long)]
    pub athlete_facing: bool,

    /// Run the keypad board as a jury console
    #[arg(long)]
    pub jury: bool,

    /// Do not play the down cue
    #[arg(long)]
    pub no_audio: bool,

    /// Start with keypads ignored until the clock starts
    #[arg(long)]
    pub disarmed: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to daily files in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
