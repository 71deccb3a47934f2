//! Portfolio TUI Entry Point
//!
//! Shows the portfolio page in the terminal with the command overlay on top.
//!
//! # Usage
//!
//! ```bash
//! # Interactive
//! portfolio-tui --page overlay/core/pages/portfolio.toml
//!
//! # Run commands without a terminal and print the scrollback
//! portfolio-tui --page portfolio.toml --exec aboutme --exec contact
//!
//! # Verbose logging (stderr)
//! RUST_LOG=debug portfolio-tui --page portfolio.toml
//! ```

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overlay_core::{
    default_config_path, load_config_from_path, ConfigOverrides, PortfolioPage, TerminalConfig,
    TerminalController,
};
use portfolio_tui::headless::run_lines;
use portfolio_tui::App;

/// Portfolio TUI - the portfolio page with a terminal overlay
#[derive(Parser, Debug)]
#[command(name = "portfolio-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page file to show (also PORTFOLIO_PAGE)
    #[arg(short = 'p', long, value_name = "FILE")]
    page: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// User part of the prompt
    #[arg(long, value_name = "USER")]
    prompt_user: Option<String>,

    /// Host part of the prompt
    #[arg(long, value_name = "HOST")]
    prompt_host: Option<String>,

    /// Run a command line without a terminal (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "CMD")]
    exec: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --exec output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    let page_path = config
        .page_path
        .clone()
        .context("No page file given; pass --page or set PORTFOLIO_PAGE")?;
    let page = PortfolioPage::load(&page_path)
        .with_context(|| format!("Failed to load page {}", page_path.display()))?;

    if !args.exec.is_empty() {
        let Some(transcript) = run_lines(page, &config, args.exec) else {
            bail!("{} has no [terminal] root", page_path.display());
        };
        println!("{transcript}");
        return Ok(());
    }

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: portfolio-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Use --exec <CMD> to run commands without one.");
        std::process::exit(1);
    }

    let Some(controller) = TerminalController::boot(page, &config) else {
        bail!("{} has no [terminal] root", page_path.display());
    };

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = crossterm::terminal::size()?;
    let mut app = App::new(controller, Some(page_path), size);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

/// Defaults, then file, then env, then command-line flags
fn resolve_config(args: &Args) -> Result<TerminalConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;

    let mut overrides = ConfigOverrides::new();
    if let Some(user) = &args.prompt_user {
        overrides = overrides.with_prompt_user(user.clone());
    }
    if let Some(host) = &args.prompt_host {
        overrides = overrides.with_prompt_host(host.clone());
    }
    if let Some(page) = &args.page {
        overrides = overrides.with_page_path(page.clone());
    }
    overrides
        .apply(&mut config)
        .context("Invalid command-line override")?;

    tracing::debug!(source = %config.source(), prompt = %config.prompt, "Configuration resolved");
    Ok(config)
}
