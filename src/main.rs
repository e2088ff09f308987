use bubbletype::{
    app::{App, TARGET_SENTENCE},
    config::{Config, ConfigStore, FileConfigStore},
    metrics::WordCountMode,
    runtime::{CrosstermEventSource, Exit, Runner},
    session::{MistakePolicy, SessionConfig, TypingSession},
    ui::{SessionView, Theme},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
};

const WINDOW_TITLE: &str = "BubbleType";

/// type one sentence, get your wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// how wrong keystrokes count against accuracy (default: once per position)
    #[clap(long, value_enum)]
    mistakes: Option<MistakePolicy>,

    /// how the sentence length becomes a word count for wpm (default: whole words)
    #[clap(long, value_enum)]
    word_count: Option<WordCountMode>,

    /// config file to read settings from
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// render without colors
    #[clap(long)]
    no_color: bool,

    /// append log output to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn resolve_config(&self, store: &impl ConfigStore) -> Config {
        store.load().with_overrides(self.mistakes, self.word_count)
    }

    fn theme(&self) -> Theme {
        if self.no_color {
            Theme::plain()
        } else {
            Theme::default()
        }
    }
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let store = cli.config_store();
    let config = cli.resolve_config(&store);
    if cli.save_config {
        store.save(&config)?;
        info!("saved config to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let theme = cli.theme();

    enable_raw_mode()?;

    run_then_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            start_tui(&mut terminal, SessionConfig::from(&config), &theme)
        },
        restore_terminal,
    )
}

/// Run `body`, then `restore` no matter how `body` ended. An error from
/// `body` wins over one from `restore`.
fn run_then_restore<T>(
    body: impl FnOnce() -> Result<T, Box<dyn Error>>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, Box<dyn Error>> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    raw
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    config: SessionConfig,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    let session = TypingSession::new(TARGET_SENTENCE, config);
    let app = App::new(session, size.width, size.height);
    info!(
        "starting session ({} mistakes, {} word count)",
        config.mistake_policy, config.word_count
    );

    let runner = Runner::new(CrosstermEventSource::new());
    match runner.run(app, |app| draw(terminal, app, theme))? {
        Exit::Quit => {}
        Exit::Closed(_) => warn!("terminal input closed"),
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App, theme: &Theme) -> io::Result<()> {
    terminal.draw(|f| {
        let area = app.viewport(f.area());
        f.render_widget(SessionView::new(app.session.snapshot(), theme), area);
    })?;
    Ok(())
}
