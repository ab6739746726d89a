use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;

use term_folio::desktop::Desktop;
use term_folio::event_loop::{EventLoop, LoopControl};
use term_folio::i18n::Language;
use term_folio::logbuf::{self, LogHandle};
use term_folio::prefs::{Prefs, PrefsStore};
use term_folio::profile::{Profile, ProfileError};
use term_folio::term::{EventSource, Screen, TerminalEvents, TerminalScreen};
use term_folio::theme::Theme;

/// term-folio - a desktop-style developer portfolio for the terminal
#[derive(Parser)]
#[command(name = "term-folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load portfolio content from this TOML file instead of the built-in one
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Start with this theme, overriding the saved preference
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Start with this language, overriding the saved preference
    #[arg(long, value_enum)]
    language: Option<Language>,

    /// Redraw rate while idle
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=120))]
    fps: u16,

    /// Leave terminal mouse reporting off (re-enable later from the menu)
    #[arg(long)]
    no_mouse: bool,

    /// Mirror the in-app log to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum FolioError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FolioError> {
    logbuf::set_global_log(LogHandle::new_default());
    logbuf::init_default();
    if let Some(path) = &cli.log_file {
        logbuf::set_log_file(path)?;
    }
    logbuf::install_panic_hook();

    let profile = Profile::load(cli.profile.as_deref())?;

    let store = PrefsStore::at_default_location();
    let saved = store.load();
    // Command-line overrides win for this run but are not written back;
    // only an in-app toggle persists.
    let prefs = Prefs {
        theme: cli.theme.unwrap_or(saved.theme),
        language: cli.language.unwrap_or(saved.language),
    };
    let mouse_capture = !cli.no_mouse;
    info!(
        name = profile.personal.name,
        theme = prefs.theme.name(),
        language = prefs.language.tag(),
        fps = cli.fps,
        "starting desktop"
    );

    let mut desktop = Desktop::new(profile, prefs, store, mouse_capture, Instant::now());

    let mut screen = TerminalScreen::new()?;
    screen.enter()?;
    let mut events = TerminalEvents::new();
    events.set_mouse_capture(mouse_capture)?;

    let tick = Duration::from_millis(1000 / u64::from(cli.fps));
    let mut pump = EventLoop::new(events, tick);
    pump.run(|source, event| {
        let now = Instant::now();
        match event {
            Some(ev) => desktop.handle_event(&ev, now),
            None => {
                desktop.tick(now);
                screen.draw(|mut surface| desktop.render(&mut surface))?;
            }
        }
        if let Some(enabled) = desktop.take_capture_request() {
            source.set_mouse_capture(enabled)?;
        }
        if desktop.should_quit() {
            return Ok(LoopControl::Quit);
        }
        Ok(LoopControl::Continue)
    })?;

    screen.leave()?;
    info!("desktop shut down cleanly");
    Ok(())
}
