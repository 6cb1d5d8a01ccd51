use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::cli::ThemeChoice;
use crate::config::AppConfig;
use crate::core::{ServiceStore, TasksService};

mod app;
mod buffer;
mod constants;
mod helpers;
mod logging;
mod theme;

use app::App;
use constants::TICK_RATE;

pub use helpers::resolve_theme;
pub use theme::Palette;

type Backend = CrosstermBackend<Stdout>;

#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    pub theme: Option<ThemeChoice>,
    pub log_filter: Option<String>,
}

pub fn run(config: AppConfig, options: TuiOptions) -> Result<()> {
    logging::init_file_tracing(config.log_path(), options.log_filter.clone())?;

    let first_run = !config.db_path().exists();
    let db_path_str = config.db_path().display().to_string();

    // Ensure the database and schema exist before touching the terminal.
    let service = TasksService::new(config)?;
    let stored_theme = service.theme()?;
    let theme = resolve_theme(options.theme, stored_theme);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("ticklist-store")
        .build()
        .context("failed to start store runtime")?;

    let store = Arc::new(ServiceStore::new(service));
    let mut app = App::new(store, runtime.handle().clone(), theme);
    if first_run {
        app.set_status_info(format!(
            "Initialized ticklist data store\n  database file: {}",
            db_path_str
        ));
    }
    app.start();
    tracing::info!(theme = theme.as_str(), "terminal UI starting");

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    drop(app);
    runtime.shutdown_timeout(Duration::from_secs(2));
    tracing::info!("terminal UI stopped");

    result
}

fn run_app(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        app.sync();
        terminal.draw(|f| app.draw(f))?;
        if app.should_quit() {
            break;
        }

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
