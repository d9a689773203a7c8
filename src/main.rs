use hexedit_core::config::SystemConfig;
use hexedit_core::state::{Addressing, ViewState};
use hexedit_core::Session;
use hexedit_tui::events::{self, Tui};
use hexedit_tui::theme::Theme;
use hexedit_tui::ui_state::UIState;

use anyhow::Result;
use clap::Parser;
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// View and edit files in hexadecimal or in ASCII.
#[derive(Parser)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    /// Format the display to have entire sectors
    #[arg(short, long)]
    sector: bool,

    /// Try to maximize screen usage
    #[arg(short, long)]
    maximize: bool,

    /// Explicitly set the number of bytes to display per line
    #[arg(short = 'l', long = "linelength", value_name = "N")]
    line_length: Option<usize>,

    /// Display colors
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Do not display colors
    #[arg(long = "no-color")]
    no_color: bool,

    /// Open the file read-only
    #[arg(short, long)]
    readonly: bool,

    /// Write a debug log to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_ref())?;

    let mut config = SystemConfig::load();
    if cli.sector {
        config.sector_mode = true;
    }
    if cli.color {
        config.color = true;
    } else if cli.no_color {
        config.color = false;
    }
    let line_length = match cli.line_length {
        Some(0) => {
            eprintln!("Error: line length must be at least 1");
            std::process::exit(1);
        }
        Some(n) => Some(n),
        None => config.bytes_per_line,
    };

    // Geometry is a placeholder until the first frame measures the terminal.
    let view = ViewState::new(
        line_length.unwrap_or(16),
        1,
        config.block_size,
        config.sector_size,
        config.addressing(),
    );
    let mut session = match Session::open(&cli.file, cli.readonly, view) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}: {}", cli.file.display(), e);
            std::process::exit(1);
        }
    };
    if config.addressing() == Addressing::Sector {
        log::info!("Sector mode, {} byte sectors", config.sector_size);
    }

    let theme = Theme::for_color(config.color);
    log::debug!("Using theme {}", theme.name);
    let mut ui_state = UIState::new(theme, line_length);
    ui_state.maximize = cli.maximize;
    if session.is_read_only() && !cli.readonly {
        ui_state.set_status_message("File is read-only!");
    }

    // Setup terminal
    let mut terminal: Tui = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    events::enter_terminal(&mut terminal)?;

    // Run app
    let res = events::run_app(&mut terminal, &mut session, &mut ui_state);

    // Restore terminal
    events::leave_terminal(&mut terminal)?;

    if let Err(err) = res {
        log::error!("{:?}", err);
        eprintln!("{:?}", err);
        std::process::exit(1);
    }

    Ok(())
}
