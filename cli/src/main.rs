//! CLI entrypoint for refbox
//!
//! This is the main binary that wires together all layers using
//! dependency injection. It runs one platform: the keypad board, a board
//! facing the other way and a jury console, with a loopback field of play
//! standing in for the scoring server.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use refbox_application::{
    AudioCue, AuthorityNotifier, Clock, CompositeAuthority, DecisionAggregator, FieldOfPlay,
    ReportEnvelope, SurfaceCommand, SurfaceConfig, SurfaceDirectory, SurfaceEventSink,
    SurfaceHandle, SurfaceNotice, SurfacePorts, SurfaceRunner,
};
use refbox_domain::{Role, SurfaceId};
use refbox_infrastructure::{
    ChannelAuthority, ConfigLoader, FileConfig, JsonlVoteLog, SystemClock, TerminalBell,
    TokioHideTimer,
};
use refbox_presentation::{Cli, ConsoleDisplay, ConsoleFormatter, HELP, OperatorCommand, parse_line};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const KEYPAD_BOARD: SurfaceId = SurfaceId(1);
const MIRROR_BOARD: SurfaceId = SurfaceId(2);
const JURY_CONSOLE: SurfaceId = SurfaceId(3);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::config_issue(issue));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration has errors");
    }

    info!("Starting refbox");
    println!("{}", ConsoleFormatter::header("refbox"));
    println!("{}\n", HELP);

    // === Dependency Injection ===
    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<ReportEnvelope>();
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel::<SurfaceNotice>();

    let audio: Arc<dyn AudioCue> = Arc::new(TerminalBell::new(
        config.audio.frequency_hz,
        config.audio.duration(),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let events: Arc<dyn SurfaceEventSink> = Arc::new(notice_tx);

    let mut reporters: Vec<Box<dyn AuthorityNotifier>> =
        vec![Box::new(ChannelAuthority::new(report_tx))];
    if let Some(path) = &config.log.vote_report_file {
        match JsonlVoteLog::new(path) {
            Some(log) => {
                info!("Vote reports appended to {}", log.path().display());
                reporters.push(Box::new(log));
            }
            None => warn!("Vote report log disabled"),
        }
    }
    let authority: Arc<dyn AuthorityNotifier> = Arc::new(CompositeAuthority::new(reporters));

    let base_ports = SurfacePorts::default()
        .with_audio(audio.clone())
        .with_authority(authority)
        .with_events(events)
        .with_clock(clock);

    let fop_config = config.field_of_play_config();
    let emit_on_server = fop_config.emit_sounds_on_server;

    let mut keypad_config = config.surface_config(KEYPAD_BOARD);
    if emit_on_server {
        // The loop below rings for the whole platform.
        keypad_config = keypad_config.without_audio();
    }
    let mut mirror_config =
        SurfaceConfig::new(MIRROR_BOARD).with_down_display(keypad_config.down_display);
    if keypad_config.public_facing {
        mirror_config = mirror_config.athlete_facing();
    }
    if !keypad_config.audio_enabled {
        mirror_config = mirror_config.without_audio();
    }
    let jury_config = SurfaceConfig::new(JURY_CONSOLE).jury().without_audio();

    let keypad_label = if keypad_config.jury { "keypad/j" } else { "keypad" };
    let mirror_label = if mirror_config.public_facing { "public" } else { "athlete" };

    let mut field_of_play = FieldOfPlay::new(fop_config);
    let mut directory = SurfaceDirectory::new();
    let mut labels = HashMap::new();
    let mut runners = Vec::new();

    for (surface, label) in [
        (keypad_config, keypad_label),
        (mirror_config, mirror_label),
        (jury_config, "jury"),
    ] {
        let id = surface.id;
        let role = surface.role();
        let (handle, runner) = spawn_surface(surface, label, base_ports.clone());
        directory.insert(handle);
        field_of_play.register(id, role);
        labels.insert(id, label.to_string());
        runners.push(runner);
    }

    let Some(keypad) = directory.get(KEYPAD_BOARD).cloned() else {
        bail!("Keypad board is not registered");
    };

    // === Event loop ===
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    'outer: loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                for command in parse_line(&line) {
                    match command {
                        OperatorCommand::Key(key) => {
                            keypad.send(SurfaceCommand::Key(key));
                        }
                        OperatorCommand::Reset => directory.deliver_all(field_of_play.reset()),
                        OperatorCommand::ClockStart => {
                            directory.deliver_all(field_of_play.clock_started())
                        }
                        OperatorCommand::ClockStop => {
                            directory.deliver_all(field_of_play.clock_stopped())
                        }
                        OperatorCommand::Break => {
                            directory.deliver_all(field_of_play.break_started())
                        }
                        OperatorCommand::Hide => directory.send_all(SurfaceCommand::HideDecisions),
                        OperatorCommand::Help => println!("{}", HELP),
                        OperatorCommand::Quit => break 'outer,
                        OperatorCommand::Unknown(c) => {
                            eprintln!("Unknown command '{}' (? for help)", c)
                        }
                    }
                }
            }
            Some(envelope) = report_rx.recv() => {
                let broadcasts = field_of_play.on_report(envelope.origin, envelope.report);
                let down_given = broadcasts
                    .iter()
                    .any(|b| matches!(b.command, SurfaceCommand::ShowDown { .. }));
                if down_given && emit_on_server
                    && let Some(tone) = audio.acquire()
                {
                    tone.play();
                }
                directory.deliver_all(broadcasts);
            }
            Some(notice) = notice_rx.recv() => {
                let label = labels
                    .get(&notice.surface)
                    .map(String::as_str)
                    .unwrap_or("?");
                println!("{}", ConsoleFormatter::notice(label, &notice));
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
        }
    }

    // === Shutdown ===
    directory.send_all(SurfaceCommand::Shutdown);
    for runner in runners {
        match runner.await {
            Ok(aggregator) => debug!(
                "{} stopped in phase {} ({})",
                aggregator.id(),
                aggregator.phase(),
                aggregator.final_value()
            ),
            Err(e) => warn!("Surface task failed: {}", e),
        }
    }
    info!("Last decision: {}", field_of_play.decision());

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// With a log directory, logs go to a daily rolling file and the returned
/// guard must be held until exit.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "refbox.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Command-line flags win over every configuration file.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if cli.athlete_facing {
        config.surface.public_facing = false;
    }
    if cli.jury {
        config.surface.jury = true;
        // A jury console never takes keypad input.
        config.surface.enabled = false;
    }
    if cli.no_audio {
        config.audio.enabled = false;
    }
    if cli.disarmed {
        config.surface.enabled = false;
    }
}

/// Build one surface and start its event loop.
fn spawn_surface(
    config: SurfaceConfig,
    label: &str,
    ports: SurfacePorts,
) -> (SurfaceHandle, JoinHandle<DecisionAggregator>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let id = config.id;
    let role: Role = config.role();

    let ports = ports
        .with_display(Arc::new(ConsoleDisplay::new(label)))
        .with_timer(Arc::new(TokioHideTimer::new(tx.clone())));
    let aggregator = DecisionAggregator::new(config, ports);
    let runner = tokio::spawn(SurfaceRunner::new(aggregator, rx).run());

    (SurfaceHandle::new(id, role, tx), runner)
}
