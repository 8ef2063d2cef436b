use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::celebration::CelebrationTrigger;
use crate::io::progress::{KeyedProgress, ProgressStore};
use crate::io::storage::FileStore;
use crate::model::{Catalog, Config, Task};
use crate::ops::session::{Checklist, MutationOutcome};
use crate::telemetry::UsageReporter;

use super::confetti::Confetti;
use super::input;
use super::render;
use super::theme::Theme;

/// Progress persistence as seen by the TUI
pub type DynProgress = Box<dyn ProgressStore>;

/// View name reported once the checklist is on screen
pub const CHECKLIST_VIEW: &str = "checklist";

const DONE_MESSAGE: &str = "All done. Time to ship!";

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Waiting for y/n on "reset all progress?"
    ConfirmReset,
}

/// Main application state
pub struct App {
    pub checklist: Checklist<DynProgress, Confetti>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Index into `task_order()`
    pub cursor: usize,
    /// First visible line of the checklist body
    pub scroll_offset: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Transient status-row message
    pub status_message: Option<String>,
    /// The most recent save failed
    pub unsaved: bool,
}

impl App {
    pub fn new(checklist: Checklist<DynProgress, Confetti>, theme: Theme) -> Self {
        // Progress that loads complete is celebrating already
        let status_message = checklist
            .trigger()
            .is_celebrating()
            .then(|| DONE_MESSAGE.to_string());
        App {
            checklist,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            status_message,
            unsaved: false,
        }
    }

    /// Tasks in display order (grouped by category)
    pub fn task_order(&self) -> Vec<&'static Task> {
        self.checklist
            .view()
            .groups
            .into_iter()
            .flat_map(|g| g.tasks)
            .collect()
    }

    pub fn cursor_task(&self) -> Option<&'static Task> {
        self.task_order().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.task_order().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.task_order().len().saturating_sub(1);
    }

    /// Toggle the task under the cursor
    pub fn toggle_cursor(&mut self) {
        if let Some(task) = self.cursor_task() {
            let outcome = self.checklist.toggle_task(task.id);
            self.after_mutation(outcome);
        }
    }

    pub fn reset_progress(&mut self) {
        let outcome = self.checklist.reset_progress();
        self.after_mutation(outcome);
        if outcome.persisted {
            self.status_message = Some("Progress reset".into());
        }
    }

    fn after_mutation(&mut self, outcome: MutationOutcome) {
        self.status_message = None;
        // Every save writes the whole set, so one success catches up on earlier failures
        self.unsaved = !outcome.persisted;
        if !outcome.persisted {
            self.status_message = Some("Could not save progress (kept for this session)".into());
        }
        if outcome.celebrate {
            self.status_message = Some(DONE_MESSAGE.into());
        }
    }
}

/// Everything needed to start the TUI
pub struct RunOptions {
    pub config: Config,
    /// Overrides `config.storage.path`
    pub store_path: Option<PathBuf>,
    pub reporter: Box<dyn UsageReporter>,
}

/// Build the session the TUI drives
pub fn open_checklist(options: &RunOptions) -> Checklist<DynProgress, Confetti> {
    let store_path = options
        .store_path
        .clone()
        .or_else(|| options.config.storage.path.clone())
        .unwrap_or_else(FileStore::default_path);
    tracing::debug!(path = %store_path.display(), "using store");

    let progress: DynProgress = Box::new(KeyedProgress::new(FileStore::new(store_path)));
    let mut celebration = options.config.celebration.clone();
    if !celebration.enabled {
        celebration.particles = 0;
    }
    Checklist::open(
        Catalog::builtin(),
        progress,
        Confetti::default(),
        CelebrationTrigger::from_config(&celebration),
    )
}

/// Run the TUI application
pub fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let checklist = open_checklist(&options);
    let theme = Theme::from_config(&options.config.ui);
    let mut app = App::new(checklist, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, options.reporter.as_ref());

    // Teardown releases any confetti still on screen
    app.checklist.close();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    reporter: &dyn UsageReporter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mounted = false;
    loop {
        let now = Instant::now();
        app.checklist.tick(now);
        terminal.draw(|frame| render::render(frame, app, now))?;

        // Analytics sees the mount and nothing else, after the first frame is up
        if !mounted {
            mounted = true;
            reporter.page_view(CHECKLIST_VIEW);
        }
        if app.should_quit {
            break;
        }

        // Animate smoothly while confetti is falling
        let poll = if app.checklist.trigger().is_celebrating() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };

        if event::poll(poll)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
    }
    Ok(())
}
