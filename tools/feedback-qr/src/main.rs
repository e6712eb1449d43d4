//! Feedback-QR: publish a solved challenge and show a QR code linking to it.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive
//! GITHUB_ACCESS_TOKEN=... feedback-qr --challenge two_sum.json --answer-file solution.py
//!
//! # Print the code to stdout and keep an SVG copy
//! feedback-qr --title "Two Sum" --description "..." --answer "..." --plain --svg code.svg
//!
//! # Show what would be written
//! feedback-qr --challenge two_sum.json --answer "..." --dry-run
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use feedback_publisher::{
    Activation, ActivationHandle, Challenge, FeedbackPublisher, GitHubContentStore,
    PresentationState, View,
};
use feedback_qr::ui::widgets::qr::{qr_svg, qr_text, Palette};
use feedback_qr::{dry_run, ui, App, Args};
use feedback_telemetry::{init_telemetry, TelemetryConfig};

/// Log file used while the TUI owns the terminal
const TUI_LOG_FILE: &str = "feedback-qr.log";

type Publisher = FeedbackPublisher<GitHubContentStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let interactive = !args.plain && !args.dry_run;
    let mut telemetry = TelemetryConfig::from_env();
    if interactive && telemetry.log_file.is_none() {
        telemetry = telemetry.with_log_file(TUI_LOG_FILE);
    }
    init_telemetry(&telemetry).context("failed to initialize logging")?;

    let challenge = args.load_challenge()?;
    let answer = args.load_answer()?;
    let config = args.store_config().context("invalid store configuration")?;

    let store = Arc::new(GitHubContentStore::new(config.clone()).context("failed to create store client")?);
    let publisher = Arc::new(FeedbackPublisher::new(store.clone(), &config));

    if args.dry_run {
        println!("{}", dry_run::describe(&store, &publisher, &challenge, &answer));
        return Ok(());
    }

    info!(store = %config.target(), title = %challenge.title, "Publishing feedback");

    if args.plain {
        run_plain(publisher, challenge, answer, args.svg.as_deref()).await
    } else {
        run_tui(publisher, challenge, answer, config.target(), args.svg.as_deref())
    }
}

/// Wait for the activation and print the result to stdout.
async fn run_plain(
    publisher: Arc<Publisher>,
    challenge: Challenge,
    answer: String,
    svg: Option<&Path>,
) -> Result<()> {
    let presentation = Activation::start(publisher, challenge, answer).wait().await;

    match presentation.view() {
        View::Code { payload } => {
            let code = qr_text(&payload, Palette::LightOnDark).context("failed to encode QR code")?;
            println!("{code}");
            println!("{payload}");
            if let Some(path) = svg {
                write_svg(path, &payload)?;
            }
            Ok(())
        }
        View::Failed { reason } => anyhow::bail!("feedback could not be published: {reason}"),
        View::Placeholder { .. } => anyhow::bail!("activation ended before publishing finished"),
    }
}

fn run_tui(
    publisher: Arc<Publisher>,
    challenge: Challenge,
    answer: String,
    store_target: String,
    svg: Option<&Path>,
) -> Result<()> {
    // Restore the terminal if anything panics
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(challenge.title.clone(), store_target);
    let result = run_app(&mut terminal, &mut app, publisher, challenge, answer);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;

    if let (PresentationState::Ready(address), Some(path)) = (app.presentation.state(), svg) {
        write_svg(path, address.as_str())?;
    }
    Ok(())
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    publisher: Arc<Publisher>,
    challenge: Challenge,
    answer: String,
) -> Result<()> {
    let mut handle = start(app, &publisher, &challenge, &answer);

    loop {
        app.update(handle.presentation());
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char(c) => app.handle_key(c),
                        KeyCode::Esc => app.handle_key('q'),
                        _ => {}
                    }
                }
            }
        }

        if app.take_retry() {
            info!(attempt = app.activations + 1, "Retrying publish");
            handle.teardown();
            handle = start(app, &publisher, &challenge, &answer);
        }

        if app.should_quit() {
            // The outcome of an in-flight publish is discarded
            handle.teardown();
            return Ok(());
        }
    }
}

fn start(app: &mut App, publisher: &Arc<Publisher>, challenge: &Challenge, answer: &str) -> ActivationHandle {
    app.activation_started();
    Activation::start(publisher.clone(), challenge.clone(), answer)
}

fn write_svg(path: &Path, payload: &str) -> Result<()> {
    let svg = qr_svg(payload).context("failed to encode QR code")?;
    fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote QR code SVG");
    Ok(())
}
