//! tmux-switcher - pick a tmux session, window or pane from the terminal

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tmux_switcher::config::{Config, HotkeyGroup, HotkeyId};
use tmux_switcher::switcher::{Completion, TmuxSwitcher};
use tmux_switcher::tmux::{self, Runner, Serialized};
use tmux_switcher::tui::{ConsoleNotifier, TerminalPrompt, TerminalSelector};

#[derive(Parser)]
#[command(name = "tmux-switcher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a pane and switch to it (default)
    Switch,
    /// Rename a session or window
    Rename,
    /// Kill a session, window or pane
    Kill,
    /// Create a detached session
    NewSession,
    /// Create a window in a session
    NewWindow,
    /// Print the tmux inventory
    Ls {
        /// Which level to list
        #[arg(value_enum)]
        level: Level,
        /// Print JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },
    /// List hotkey ids and their bindings
    Hotkeys,
    /// Run the action bound to a hotkey id or key
    Run {
        /// Hotkey id (e.g. tmux-kill) or a bound key (e.g. Ctrl-Shift-T)
        #[arg(value_name = "HOTKEY")]
        hotkey: String,
    },
    /// Bind a key to a hotkey id and save the configuration
    Bind {
        /// Hotkey id, e.g. tmux-kill
        #[arg(value_name = "HOTKEY-ID")]
        hotkey: String,
        /// Key to bind, e.g. Ctrl-Shift-K
        key: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Sessions,
    Windows,
    Panes,
}

fn init_logging() {
    let log_path = tmux_switcher::paths::log_path();
    // Clear log file at startup
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // DEBUG=0 or unset: off, 1: warn, 2: info, 3+: debug
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let directory = log_path
            .parent()
            .map_or_else(std::env::temp_dir, PathBuf::from);
        let file_appender = tracing_appender::rolling::never(directory, "tmux-switcher.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        // `bind` may create the file
        Some(_) => Ok(Config::default()),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(2);
        }
    };

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(Commands::Bind { hotkey, key }) = &cli.command {
        let hotkey = parse_hotkey_id(hotkey)?;
        config.hotkeys.bind(hotkey, key);
        let path = cli.config.clone().unwrap_or_else(Config::default_path);
        config.save_to(&path)?;
        println!("{}", config.hotkeys.help_line(hotkey));
        return Ok(());
    }

    let runner = Serialized::new(config.runner()?);
    tracing::debug!(?config, "Loaded configuration");

    let hotkey = match cli.command.unwrap_or(Commands::Switch) {
        Commands::Ls { level, json } => return cmd_ls(&runner, level, json),
        Commands::Hotkeys => {
            cmd_hotkeys(&config);
            return Ok(());
        }
        Commands::Switch => HotkeyId::TmuxSwitch,
        Commands::Rename => HotkeyId::TmuxRename,
        Commands::Kill => HotkeyId::TmuxKill,
        Commands::NewSession => HotkeyId::TmuxNewSession,
        Commands::NewWindow => HotkeyId::TmuxNewWindow,
        Commands::Run { hotkey } => HotkeyId::parse(&hotkey)
            .or_else(|| config.hotkeys.hotkey_for(&hotkey))
            .with_context(|| format!("Unknown hotkey id or key {hotkey:?}"))?,
        Commands::Bind { .. } => return Ok(()),
    };

    if hotkey.group() == HotkeyGroup::Tabs {
        bail!(
            "{} acts on a host tab tree; the terminal front end only drives tmux",
            hotkey.id()
        );
    }

    let mut switcher =
        TmuxSwitcher::new(&runner, TerminalSelector, TerminalPrompt, ConsoleNotifier);
    match switcher.handle_hotkey(hotkey)? {
        Some(Completion::Unavailable | Completion::Unreadable) => std::process::exit(1),
        Some(Completion::Done | Completion::Cancelled | Completion::Empty) | None => Ok(()),
    }
}

fn parse_hotkey_id(id: &str) -> Result<HotkeyId> {
    HotkeyId::parse(id).with_context(|| format!("Unknown hotkey id {id:?}"))
}

fn cmd_ls<R: Runner>(runner: &R, level: Level, json: bool) -> Result<()> {
    let output = match level {
        Level::Sessions => {
            let sessions = tmux::list_sessions(runner)?;
            if json {
                serde_json::to_string_pretty(&sessions)?
            } else {
                sessions
                    .iter()
                    .map(|s| {
                        let attached = if s.attached { " (attached)" } else { "" };
                        format!("{:<24} {:>3} windows{attached}", s.name, s.window_count)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Level::Windows => {
            let windows = tmux::list_windows(runner)?;
            if json {
                serde_json::to_string_pretty(&windows)?
            } else {
                windows
                    .iter()
                    .map(|w| {
                        let active = if w.active { " *" } else { "" };
                        format!(
                            "{:<24} {:<20} {:>3} panes{active}",
                            format!("{}:{}", w.session, w.index),
                            w.name,
                            w.pane_count
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Level::Panes => {
            let panes = tmux::list_panes(runner)?;
            if json {
                serde_json::to_string_pretty(&panes)?
            } else {
                panes
                    .iter()
                    .map(|p| {
                        let active = if p.active { " *" } else { "" };
                        format!(
                            "{:<24} {:<20} {}{active}",
                            tmux::Target::from(p).address(),
                            p.window_name,
                            p.command
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn cmd_hotkeys(config: &Config) {
    for group in [HotkeyGroup::Tabs, HotkeyGroup::Tmux] {
        println!("{}:", group.title());
        for &hotkey in HotkeyId::ALL.iter().filter(|h| h.group() == group) {
            println!("{}", config.hotkeys.help_line(hotkey));
        }
    }
}
