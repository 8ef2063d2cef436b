/// A single checklist entry. Tasks are compiled in and never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    /// Stable identifier, also the value persisted in the completion set
    pub id: &'static str,
    pub title: &'static str,
    /// Grouping label (plain string equality, no separate entity)
    pub category: &'static str,
}

impl Task {
    pub const fn new(id: &'static str, title: &'static str, category: &'static str) -> Self {
        Task {
            id,
            title,
            category,
        }
    }
}

/// Error type for catalog validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate task id in catalog: {0}")]
    DuplicateId(String),
}

/// The ordered, immutable list of tasks shown by the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    tasks: &'static [Task],
}

impl Catalog {
    pub const fn new(tasks: &'static [Task]) -> Self {
        Catalog { tasks }
    }

    /// The launch checklist that ships with the binary
    pub const fn builtin() -> Self {
        Catalog::new(BUILTIN_TASKS)
    }

    pub fn tasks(&self) -> &'static [Task] {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'static Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tasks.iter().map(|t| t.id)
    }

    /// Verify that every task id appears exactly once.
    pub fn check_unique_ids(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for task in self.tasks {
            if !seen.insert(task.id) {
                return Err(CatalogError::DuplicateId(task.id.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

// Catalog order is display order; categories appear in first-seen order, so
// "Post-Launch" entries interleaved with "Launch" still group correctly.
const BUILTIN_TASKS: &[Task] = &[
    // Foundation
    Task::new(
        "foundation-scratchpad",
        "Write down 3 problems you care about",
        "Foundation",
    ),
    Task::new(
        "foundation-validate",
        "Talk to 5\u{2013}10 people who feel that pain",
        "Foundation",
    ),
    Task::new(
        "foundation-icp",
        "Write a quick description of your ideal user (ICP)",
        "Foundation",
    ),
    Task::new(
        "foundation-positioning",
        "Write 1\u{2013}2 lines explaining what your product does and why",
        "Foundation",
    ),
    // Build
    Task::new(
        "product-mvp",
        "Build just enough to solve one real problem (MVP)",
        "Build",
    ),
    Task::new(
        "product-onboarding",
        "Add a simple onboarding flow (1\u{2013}2 steps is fine)",
        "Build",
    ),
    Task::new(
        "product-empty-errors",
        "Handle empty states, errors, and loading screens",
        "Build",
    ),
    Task::new("payments-stripe", "Set up Stripe", "Build"),
    Task::new(
        "legal-pages",
        "Add Privacy Policy and Terms (you need these)",
        "Build",
    ),
    Task::new("tech-hosting", "Deploy your app", "Build"),
    Task::new("tech-analytics", "Set up basic product analytics", "Build"),
    // Launch
    Task::new(
        "launch-waitlist",
        "Ask the early users you talked to to try it with a free trial",
        "Launch",
    ),
    Task::new(
        "post-feedback",
        "Collect feedback (email, DMs, calls)",
        "Post-Launch",
    ),
    Task::new(
        "post-tweaks",
        "Fix obvious issues and ship a few improvements",
        "Post-Launch",
    ),
    Task::new(
        "launch-announce",
        "Post your launch on Twitter/X and indie communities",
        "Launch",
    ),
    Task::new("launch-directory", "List your product on directories", "Launch"),
    // Post-launch
    Task::new(
        "post-testimonials",
        "Ask happy users for short testimonials",
        "Post-Launch",
    ),
    Task::new("post-roadmap", "Share what's coming next", "Post-Launch"),
    Task::new(
        "post-referrals",
        "Add a basic invite or referral system (optional)",
        "Post-Launch",
    ),
];
