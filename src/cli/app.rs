//! Main CLI application

use crate::cli::host::ConsoleHost;
use crate::command::{Actor, CommandMap};
use crate::config::{load_config_auto, parse_config_file, validate_config, Config};
use crate::error::CmdError;
use crate::votes::{register_commands, VoteContext};
use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_filter(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

/// CLI application: the vote commands registered in a command table
pub struct App {
    ctx: VoteContext,
    table: CommandMap,
}

impl App {
    /// Build the command table from a configuration
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self, CmdError> {
        validate_config(&config)?;

        let ctx = VoteContext::new(config, config_path);
        let mut table = CommandMap::new();
        register_commands(&ctx, &mut table);

        Ok(App { ctx, table })
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, CmdError> {
        let config = parse_config_file(&path)?;
        Self::new(config, Some(path))
    }

    /// Create app from the discovered configuration
    pub fn discover() -> Result<Self, CmdError> {
        let (config, path) = load_config_auto()?;
        if let Some(path) = &path {
            info!(path = %path.display(), "loaded configuration");
        }
        Self::new(config, path)
    }

    /// Host for a session driven by `session`, printing to stdout
    pub fn host(&self, session: Actor) -> ConsoleHost {
        ConsoleHost::new(self.ctx.settings.clone(), session)
    }

    /// Host printing to `out`
    pub fn host_with_output(&self, session: Actor, out: Box<dyn Write>) -> ConsoleHost {
        ConsoleHost::with_output(self.ctx.settings.clone(), session, out)
    }

    /// The registered commands
    pub fn commands(&self) -> &CommandMap {
        &self.table
    }

    /// Shared vote state and settings
    pub fn context(&self) -> &VoteContext {
        &self.ctx
    }

    /// Dispatch one line; `false` when no command goes by its first word
    ///
    /// A reload performed by the line rebuilds the command table afterwards.
    pub fn dispatch(&mut self, host: &ConsoleHost, line: &str) -> bool {
        let handled = self.table.dispatch(host, host.session(), line);
        if self.ctx.take_rebuild_request() {
            self.rebuild();
        }
        handled
    }

    /// Completions for a partially typed line
    pub fn complete(&self, host: &ConsoleHost, line: &str) -> Vec<String> {
        self.table.complete(host, host.session(), line)
    }

    fn rebuild(&mut self) {
        debug!("rebuilding command table");
        self.table.clear();
        register_commands(&self.ctx, &mut self.table);
    }

    /// Read commands from `input` until it ends or `exit` is typed
    ///
    /// `?<line>` prints completions for `<line>`, `help` lists commands.
    pub fn run_interactive(
        &mut self,
        host: &ConsoleHost,
        input: impl BufRead,
    ) -> Result<(), CmdError> {
        let prompt = io::stdin().is_terminal();
        if prompt {
            print_prompt(host)?;
        }

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();

            match trimmed {
                "" => {}
                "exit" | "quit" => break,
                "help" => self.print_help(host),
                _ => {
                    if let Some(partial) = line.trim_start().strip_prefix('?') {
                        for completion in self.complete(host, partial) {
                            host.print_line(&completion);
                        }
                    } else {
                        let line = trimmed.trim_start_matches('/');
                        if !self.dispatch(host, line) {
                            host.print_line(&unknown_command_message(line));
                        }
                    }
                }
            }

            if prompt {
                print_prompt(host)?;
            }
        }

        Ok(())
    }

    fn print_help(&self, host: &ConsoleHost) {
        for command in self.table.commands() {
            if !command.is_permitted(host, host.session()) {
                continue;
            }
            let mut line = format!("{} {}", command.usage().bold(), command.description());
            if !command.aliases().is_empty() {
                let aliases = format!(" (aliases: {})", command.aliases().join(", "));
                line.push_str(&aliases.dimmed().to_string());
            }
            host.print_line(&line);
        }
    }
}

fn print_prompt(host: &ConsoleHost) -> Result<(), CmdError> {
    let mut stdout = io::stdout();
    write!(stdout, "{}> ", host.session().name())?;
    stdout.flush()?;
    Ok(())
}

fn unknown_command_message(line: &str) -> String {
    let label = line.split_whitespace().next().unwrap_or_default();
    format!("Unknown command '{}'. Type \"help\" for help.", label)
        .red()
        .to_string()
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("cmdtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Console host for the vote tallying commands")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to cmdtree.yml config file")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .value_name("USER")
                .help("Run commands as this user instead of the console"),
        )
        .arg(
            Arg::new("complete")
                .long("complete")
                .help("Print completions for LINE instead of running it")
                .action(ArgAction::SetTrue)
                .requires("line"),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print a shell completion script")
                .value_parser(clap::value_parser!(Shell)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Log nothing")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log dispatch details")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("line")
                .value_name("LINE")
                .help("Command line to run, e.g. `pv givevote alice 5`")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the log subscriber; `RUST_LOG` wins over the verbosity flags
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Actor for the session: the console, or the user named by `--as`
fn session_actor(app: &App, matches: &ArgMatches) -> Actor {
    match matches.get_one::<String>("as") {
        Some(name) => {
            let settings = app.ctx.settings.borrow();
            let canonical = settings
                .config
                .user(name)
                .map(|(canonical, _)| canonical.to_string())
                .unwrap_or_else(|| name.clone());
            Actor::user(canonical)
        }
        None => Actor::Console,
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), CmdError> {
    dotenvy::dotenv().ok();
    let matches = build_command().get_matches();
    init_tracing(get_verbosity(&matches));

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        let mut command = build_command();
        clap_complete::generate(*shell, &mut command, "cmdtree", &mut io::stdout());
        return Ok(());
    }

    let mut app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::discover()?,
    };
    let host = app.host(session_actor(&app, &matches));

    let line = matches
        .get_many::<String>("line")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "));

    match line {
        Some(line) if matches.get_flag("complete") => {
            for completion in app.complete(&host, &line) {
                host.print_line(&completion);
            }
            Ok(())
        }
        Some(line) => {
            let line = line.trim_start_matches('/').to_string();
            if app.dispatch(&host, &line) {
                Ok(())
            } else {
                let label = line.split_whitespace().next().unwrap_or_default();
                Err(CmdError::UnknownCommand(label.to_string()))
            }
        }
        None => app.run_interactive(&host, io::stdin().lock()),
    }
}
