use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::celebration::CelebrationTrigger;
use crate::io::progress::{KeyedProgress, ProgressStore, STORAGE_KEY};
use crate::io::storage::{MemoryStore, StoreError};
use crate::model::{Catalog, CompletionSet, Task};
use crate::ops::session::Checklist;
use crate::tui::app::{App, DynProgress};
use crate::tui::confetti::Confetti;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Three tasks; "c" shares a category with "a" so display order is a, c, b.
pub const ABC: &[Task] = &[
    Task::new("a", "Alpha", "One"),
    Task::new("b", "Bravo", "Two"),
    Task::new("c", "Charlie", "One"),
];

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over `catalog` with `store` behind it.
pub fn app_with_store(catalog: Catalog, store: MemoryStore) -> App {
    app_with_progress_store(catalog, Box::new(KeyedProgress::new(store)))
}

fn app_with_progress_store(catalog: Catalog, progress: DynProgress) -> App {
    let checklist = Checklist::open(
        catalog,
        progress,
        Confetti::seeded(11),
        CelebrationTrigger::new(Duration::from_secs(5), 100),
    );
    App::new(checklist, Theme::default())
}

/// App over the ABC catalog with nothing done yet.
pub fn app_with_abc() -> App {
    app_with_store(Catalog::new(ABC), MemoryStore::new())
}

/// App over the ABC catalog with `done` already saved.
pub fn app_with_progress(done: &[&str]) -> App {
    let saved: CompletionSet = done.iter().copied().collect();
    let raw = serde_json::to_string(&saved).unwrap();
    app_with_store(Catalog::new(ABC), MemoryStore::with_item(STORAGE_KEY, &raw))
}

/// App over the ABC catalog whose store refuses every write.
pub fn app_with_failing_store() -> App {
    let mut store = MemoryStore::new();
    store.fail_writes(true);
    app_with_store(Catalog::new(ABC), store)
}

/// App over the builtin launch checklist.
pub fn app_with_builtin() -> App {
    app_with_store(Catalog::builtin(), MemoryStore::new())
}

/// Progress store whose writes fail while the shared switch is on.
struct SwitchableProgress {
    inner: KeyedProgress<MemoryStore>,
    failing: Rc<Cell<bool>>,
}

impl ProgressStore for SwitchableProgress {
    fn load(&self) -> CompletionSet {
        self.inner.load()
    }

    fn save(&mut self, set: &CompletionSet) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        self.inner.save(set)
    }
}

/// App over the ABC catalog plus a switch that makes saves fail while set.
pub fn app_with_switchable_store() -> (App, Rc<Cell<bool>>) {
    let failing = Rc::new(Cell::new(false));
    let progress = SwitchableProgress {
        inner: KeyedProgress::new(MemoryStore::new()),
        failing: Rc::clone(&failing),
    };
    (app_with_progress_store(Catalog::new(ABC), Box::new(progress)), failing)
}
