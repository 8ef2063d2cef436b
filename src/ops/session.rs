use std::time::Instant;

use crate::celebration::{CelebrationPlayer, CelebrationTrigger};
use crate::io::progress::ProgressStore;
use crate::model::{Catalog, CompletionSet};
use crate::ops::progress::{ViewModel, derive};

/// What an accepted mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The save went through. When false the in-memory set is still current.
    pub persisted: bool,
    /// This mutation completed the checklist and started a celebration
    pub celebrate: bool,
}

/// One checklist session: the working completion set plus the collaborators
/// that persist it and celebrate it.
pub struct Checklist<P, C> {
    catalog: Catalog,
    completion: CompletionSet,
    progress: P,
    player: C,
    trigger: CelebrationTrigger,
}

impl<P: ProgressStore, C: CelebrationPlayer> Checklist<P, C> {
    /// Load saved progress once. Loaded progress that is already complete
    /// celebrates, like any other transition into completion.
    pub fn open(catalog: Catalog, progress: P, player: C, trigger: CelebrationTrigger) -> Self {
        Self::open_at(catalog, progress, player, trigger, Instant::now())
    }

    pub fn open_at(
        catalog: Catalog,
        progress: P,
        player: C,
        trigger: CelebrationTrigger,
        now: Instant,
    ) -> Self {
        if let Err(e) = catalog.check_unique_ids() {
            tracing::warn!(error = %e, "catalog ids are not unique");
        }
        let completion = progress.load();
        let mut checklist = Checklist {
            catalog,
            completion,
            progress,
            player,
            trigger,
        };
        let view = checklist.view();
        checklist
            .trigger
            .observe(view.is_complete(), now, &mut checklist.player);
        tracing::info!(
            completed = view.completed_count,
            total = view.total_count,
            stored = checklist.completion.len(),
            "checklist opened"
        );
        checklist
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn completion(&self) -> &CompletionSet {
        &self.completion
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.completion.contains(id)
    }

    pub fn view(&self) -> ViewModel {
        derive(&self.catalog, &self.completion)
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn player(&self) -> &C {
        &self.player
    }

    pub fn trigger(&self) -> &CelebrationTrigger {
        &self.trigger
    }

    /// Flip one task. Ids outside the catalog are toggled too.
    pub fn toggle_task(&mut self, id: &str) -> MutationOutcome {
        self.toggle_task_at(id, Instant::now())
    }

    pub fn toggle_task_at(&mut self, id: &str, now: Instant) -> MutationOutcome {
        let next = self.completion.toggle(id);
        tracing::debug!(id, done = next.contains(id), "toggled task");
        self.commit(next, now)
    }

    /// Clear all progress. There is no undo.
    pub fn reset_progress(&mut self) -> MutationOutcome {
        self.reset_progress_at(Instant::now())
    }

    pub fn reset_progress_at(&mut self, now: Instant) -> MutationOutcome {
        tracing::info!(cleared = self.completion.len(), "progress reset");
        self.commit(CompletionSet::reset(), now)
    }

    /// Advance the celebration clock
    pub fn tick(&mut self, now: Instant) {
        self.trigger.tick(now, &mut self.player);
    }

    /// Tear down: cancel any running celebration.
    pub fn close(&mut self) {
        self.trigger.cancel(&mut self.player);
    }

    /// Save, then replace the working set, then recompute.
    fn commit(&mut self, next: CompletionSet, now: Instant) -> MutationOutcome {
        let persisted = match self.progress.save(&next) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "could not save progress, keeping it in memory");
                false
            }
        };
        self.completion = next;
        let complete = self.view().is_complete();
        let celebrate = self.trigger.observe(complete, now, &mut self.player);
        MutationOutcome {
            persisted,
            celebrate,
        }
    }
}
