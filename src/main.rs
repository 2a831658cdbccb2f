//! ted binary: CLI surface and the render/read control loop.
//!
//! The loop strictly alternates presenting one frame and blocking on one
//! decoded key. Raw mode is held by a guard inside [`Terminal`], so the
//! screen is restored on every exit path before errors are reported.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use ted::editor::Outcome;
use ted::event::{LogLevel, emit_log};
use ted::input::read_key;
use ted::terminal::Terminal;
use ted::{Document, Error, Renderer, Session, Viewport, file};

const HELP_TEXT: &str = "ted - raw-terminal text editor

USAGE:
    ted [FILE]

OPTIONS:
    -h, --help    Print this help message and exit

KEYS:
    Ctrl-S        Save
    Ctrl-Q        Quit without saving
    Arrows, PageUp/PageDown, Home/End navigate; other keys insert.
";

/// Result of CLI parsing.
enum CliCommand {
    /// Open the editor, optionally on a file.
    Run(Option<PathBuf>),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

/// Parse the command line: zero or one positional file path.
fn parse_args<I>(args: I) -> CliCommand
where
    I: IntoIterator<Item = OsString>,
{
    let mut path: Option<PathBuf> = None;
    for arg in args {
        if arg == "-h" || arg == "--help" {
            return CliCommand::Help;
        }
        if arg.to_string_lossy().starts_with('-') {
            return CliCommand::Error(format!("unknown option: {}", arg.to_string_lossy()));
        }
        if path.is_some() {
            return CliCommand::Error("expected at most one file argument".to_string());
        }
        path = Some(PathBuf::from(arg));
    }
    CliCommand::Run(path)
}

fn main() -> ExitCode {
    match parse_args(env::args_os().skip(1)) {
        CliCommand::Help => {
            print!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        CliCommand::Error(msg) => {
            // Usage errors exit before any terminal-mode change.
            eprintln!("ted: {msg}");
            eprintln!("usage: ted [FILE]");
            ExitCode::FAILURE
        }
        CliCommand::Run(path) => match run(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                // The raw-mode guard has already restored the screen.
                eprintln!("ted: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Set up the session and drive the render/read loop until quit.
fn run(path: Option<PathBuf>) -> ted::Result<()> {
    // Load before touching terminal modes: a missing file must leave the
    // terminal exactly as it was.
    let doc = match &path {
        Some(p) => file::load(p)?,
        None => Document::new(),
    };

    let mut term = Terminal::new()?;
    let (cols, rows) = term.size()?;
    if cols < 2 || rows < 2 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    // The last column holds the scrollbar, the last row the status line.
    let view = Viewport::new(cols - 1, rows - 1);
    let mut session = Session::new(doc, path, view);
    let mut renderer = Renderer::new();
    emit_log(LogLevel::Info, "session started");

    loop {
        term.write_frame(renderer.frame(&session))?;
        let key = read_key(&mut term)?;
        if session.apply(key)? == Outcome::Quit {
            break;
        }
    }

    term.clear()?;
    emit_log(LogLevel::Info, "session ended");
    Ok(())
}
