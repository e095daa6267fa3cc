//! # CourseHub CLI Library
//!
//! Argument parsing, startup, and the interactive shell. `main.rs` only
//! calls [`run`].
//!
//! ## Module Organization
//! ```text
//! coursehub_cli/
//! ├── lib.rs          ◄─── You are here (parsing, startup, shell)
//! ├── state.rs        ◄─── AppContext: catalog + AppStore + config
//! ├── config.rs       ◄─── ConfigState from env, currency formatting
//! ├── commands/
//! │   ├── mod.rs      ◄─── Render trait
//! │   ├── catalog.rs  ◄─── courses, course, categories
//! │   ├── cart.rs     ◄─── cart show/add/remove/clear/checkout
//! │   ├── account.rs  ◄─── login, register, logout, whoami
//! │   └── theme.rs    ◄─── theme show/toggle
//! └── error.rs        ◄─── ApiError for every command
//! ```
//!
//! ## Sessions
//! Theme and cart are saved to `state.json` and survive between runs. The
//! signed-in user is not saved, so a one-shot `coursehub login` is forgotten
//! when the process exits. `coursehub shell` keeps one process alive:
//!
//! ```text
//! $ coursehub shell
//! coursehub> login -e ada@example.com -p secret1
//! coursehub> cart add 3
//! coursehub> cart checkout
//! ```
//!
//! `coursehub shell --ephemeral` runs the same loop over an in-memory store:
//! it starts from defaults and leaves nothing on disk.

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coursehub_store::{FileStore, KeyValueStore, MemoryStore};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::account::{self, LoginArgs, RegisterArgs};
use commands::catalog::{self, CoursesArgs};
use commands::{cart, theme, Render};
use config::ConfigState;
use error::ApiError;
use state::AppContext;

const SHELL_PROMPT: &str = "coursehub> ";

// =============================================================================
// Arguments
// =============================================================================

/// Browse courses, manage your cart, and check out.
#[derive(Parser, Debug)]
#[command(name = "coursehub", version, about)]
pub struct Cli {
    /// Print responses and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding state.json (overrides COURSEHUB_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List courses matching the given filters
    Courses(CoursesArgs),

    /// Show one course in detail
    Course {
        id: u32,
    },

    /// List categories, levels and sort orders
    Categories,

    /// Show or change the cart (default: show)
    Cart {
        #[command(subcommand)]
        command: Option<CartCommand>,
    },

    /// Sign in with email and password
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out and empty the cart
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or toggle the color theme (default: show)
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },

    /// Run commands interactively in one session
    Shell {
        /// Keep nothing on disk
        #[arg(long)]
        ephemeral: bool,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    Show,
    /// Add a course by id
    Add { id: u32 },
    /// Remove a course by id
    Remove { id: u32 },
    Clear,
    /// Check out (requires sign-in)
    Checkout,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommand {
    Show,
    Toggle,
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "coursehub", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

// =============================================================================
// Startup
// =============================================================================

/// Parses arguments, opens the data directory and runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments (clap exits on --help or bad usage)                 │
/// │  2. Initialize logging to stderr                                        │
/// │  3. ConfigState::from_env(), then --data-dir                            │
/// │  4. FileStore::in_dir(data_dir) ──► AppStore::open (restores cart/theme)│
/// │     (shell --ephemeral uses a MemoryStore instead)                      │
/// │  5. Execute the command, print the response                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ConfigState::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let json = cli.json;
    let result = match cli.command {
        Command::Shell { ephemeral } => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell(config, json, ephemeral, stdin.lock(), &mut stdout)
        }
        command => open_context(config).and_then(|ctx| {
            let output = execute(&ctx, &command, json)?;
            println!("{output}");
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, json);
            err.exit_code()
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: warnings only, so stdout stays clean for piping
/// - `RUST_LOG=coursehub=debug` - Show every command and persisted key
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_context(config: ConfigState) -> Result<AppContext<FileStore>, ApiError> {
    let dir = config.data_dir.clone().ok_or_else(|| {
        ApiError::storage("Could not determine app data directory; set COURSEHUB_DATA_DIR")
    })?;

    let storage = FileStore::in_dir(&dir)?;
    info!(path = %storage.path().display(), "Using state file");
    Ok(AppContext::new(storage, config))
}

/// Opens the session store and runs the shell over `input`.
fn shell<R: BufRead, W: Write>(
    config: ConfigState,
    json: bool,
    ephemeral: bool,
    input: R,
    out: &mut W,
) -> Result<(), ApiError> {
    let result = if ephemeral {
        info!("Ephemeral shell, nothing is saved");
        run_shell(&AppContext::new(MemoryStore::new(), config), json, input, out)
    } else {
        run_shell(&open_context(config)?, json, input, out)
    };
    result.map_err(|e| ApiError::internal(format!("Shell I/O failed: {e}")))
}

fn report(err: &ApiError, json: bool) {
    if json {
        match serde_json::to_string_pretty(err) {
            Ok(body) => println!("{body}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        eprintln!("{err}");
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command and returns its printable output.
pub fn execute<S: KeyValueStore>(
    ctx: &AppContext<S>,
    command: &Command,
    json: bool,
) -> Result<String, ApiError> {
    match command {
        Command::Courses(args) => emit(ctx, &catalog::list_courses(ctx, args)?, json),
        Command::Course { id } => emit(ctx, &catalog::get_course(ctx, *id)?, json),
        Command::Categories => emit(ctx, &catalog::list_categories(ctx), json),
        Command::Cart { command } => match command.unwrap_or(CartCommand::Show) {
            CartCommand::Show => emit(ctx, &cart::get_cart(ctx), json),
            CartCommand::Add { id } => emit(ctx, &cart::add_to_cart(ctx, id)?, json),
            CartCommand::Remove { id } => emit(ctx, &cart::remove_from_cart(ctx, id), json),
            CartCommand::Clear => emit(ctx, &cart::clear_cart(ctx), json),
            CartCommand::Checkout => emit(ctx, &cart::checkout(ctx)?, json),
        },
        Command::Login(args) => emit(ctx, &account::login(ctx, args)?, json),
        Command::Register(args) => emit(ctx, &account::register(ctx, args)?, json),
        Command::Logout => emit(ctx, &account::logout(ctx), json),
        Command::Whoami => emit(ctx, &account::whoami(ctx), json),
        Command::Theme { command } => match command.unwrap_or(ThemeCommand::Show) {
            ThemeCommand::Show => emit(ctx, &theme::get_theme(ctx), json),
            ThemeCommand::Toggle => emit(ctx, &theme::toggle_theme(ctx), json),
        },
        Command::Shell { .. } => Err(ApiError::validation("Already in a shell")),
    }
}

fn emit<S, T>(ctx: &AppContext<S>, response: &T, json: bool) -> Result<String, ApiError>
where
    S: KeyValueStore,
    T: Serialize + Render,
{
    if json {
        Ok(serde_json::to_string_pretty(response)?)
    } else {
        Ok(response.render(&ctx.config))
    }
}

/// Reads commands line by line until `exit`, `quit` or end of input.
///
/// A failing command prints its error and the shell keeps going.
pub fn run_shell<S, R, W>(ctx: &AppContext<S>, json: bool, input: R, out: &mut W) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    write!(out, "{SHELL_PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if matches!(trimmed, "exit" | "quit") {
            break;
        }

        if !trimmed.is_empty() {
            let output = shell_line(ctx, json, trimmed);
            writeln!(out, "{output}")?;
        }

        write!(out, "{SHELL_PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn shell_line<S: KeyValueStore>(ctx: &AppContext<S>, json: bool, line: &str) -> String {
    let words = match shell_words::split(line) {
        Ok(words) => words,
        Err(e) => return format!("error: {e}"),
    };

    let parsed = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        // Also covers --help, which clap reports as an "error"
        Err(e) => return e.to_string().trim_end().to_string(),
    };

    let json = json || parsed.json;
    debug!(command = ?parsed.command, "shell command");
    match execute(ctx, &parsed.command, json) {
        Ok(output) => output,
        Err(err) if json => serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string()),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::context;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("coursehub").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_courses_filters() {
        let cli = parse(&["courses", "--category", "Design", "--sort", "rating", "--json"]);
        assert!(cli.json);
        match cli.command {
            Command::Courses(args) => {
                assert_eq!(args.category.as_deref(), Some("Design"));
                assert_eq!(args.sort.as_deref(), Some("rating"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bare_cart_shows_cart() {
        let cli = parse(&["cart"]);
        assert_eq!(cli.command, Command::Cart { command: None });

        let ctx = context();
        let output = execute(&ctx, &cli.command, false).unwrap();
        assert!(output.starts_with("Your cart is empty"));
    }

    #[test]
    fn test_execute_json_output() {
        let ctx = context();
        let cli = parse(&["cart", "add", "2"]);
        let output = execute(&ctx, &cli.command, true).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["changed"], true);
        assert_eq!(json["cart"]["items"][0]["id"], 2);
    }

    #[test]
    fn test_execute_error_has_code() {
        let ctx = context();
        let err = execute(&ctx, &parse(&["course", "42"]).command, false).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::NotFound);
    }

    #[test]
    fn test_shell_keeps_session_across_lines() {
        let ctx = context();
        let input = "cart add 3\n\
                     cart checkout\n\
                     login --email ada@example.com --password 'secret 1'\n\
                     cart checkout\n\
                     exit\n\
                     whoami\n";
        let mut out = Vec::new();
        run_shell(&ctx, false, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Added \"UI/UX Design Masterclass\" to your cart."));
        assert!(out.contains("error[UNAUTHORIZED]"));
        assert!(
            out.contains("Checkout for John Doe <ada@example.com>: 1 course(s), total $179.00")
        );
        assert!(!out.contains("Signed in as"));
    }

    #[test]
    fn test_shell_reports_bad_lines_and_continues() {
        let ctx = context();
        let input = "cart add 'unterminated\nfrobnicate\ntheme toggle\n";
        let mut out = Vec::new();
        run_shell(&ctx, false, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: "));
        assert!(out.contains("Theme: dark"));
    }

    #[test]
    fn test_ephemeral_shell_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            data_dir: Some(dir.path().to_path_buf()),
            ..ConfigState::default()
        };
        let cli = parse(&["shell", "--ephemeral"]);
        assert_eq!(cli.command, Command::Shell { ephemeral: true });

        let mut out = Vec::new();
        let input = "cart add 1\ntheme toggle\ncart\n";
        shell(config.clone(), false, true, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Theme: dark"));
        assert!(out.contains("Complete Web Development Bootcamp"));
        assert!(!dir.path().join("state.json").exists());

        // A regular shell over the same directory starts from defaults and saves.
        let mut out = Vec::new();
        shell(config, false, false, "theme\ntheme toggle\n".as_bytes(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Theme: light"));
        assert!(dir.path().join("state.json").exists());
    }

    #[test]
    fn test_shell_rejects_nested_shell() {
        let ctx = context();
        let mut out = Vec::new();
        run_shell(&ctx, false, "shell\n".as_bytes(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Already in a shell"));
    }
}
