use crate::model::{Catalog, CompletionSet, Task};

/// Tasks of one category, in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: &'static str,
    pub tasks: Vec<&'static Task>,
    /// How many of `tasks` are in the completion set
    pub completed: usize,
}

/// Everything the checklist view needs, computed from catalog + completion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Categories in first-seen order
    pub groups: Vec<CategoryGroup>,
    pub total_count: usize,
    /// Catalog tasks present in the completion set (stale ids don't count)
    pub completed_count: usize,
    /// 0..=100
    pub percent: u8,
}

impl ViewModel {
    /// Every task done, on a non-empty catalog
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.completed_count == self.total_count
    }
}

/// Group the catalog by category and compute progress.
pub fn derive(catalog: &Catalog, completion: &CompletionSet) -> ViewModel {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut completed_count = 0;

    for task in catalog.tasks() {
        let done = completion.contains(task.id);
        if done {
            completed_count += 1;
        }
        let group = match groups.iter_mut().position(|g| g.category == task.category) {
            Some(idx) => &mut groups[idx],
            None => {
                groups.push(CategoryGroup {
                    category: task.category,
                    tasks: Vec::new(),
                    completed: 0,
                });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };
        group.tasks.push(task);
        if done {
            group.completed += 1;
        }
    }

    let total_count = catalog.len();
    ViewModel {
        groups,
        total_count,
        completed_count,
        percent: percent_of(completed_count, total_count),
    }
}

/// `round(100 * completed / max(total, 1))`, halves rounding up.
pub fn percent_of(completed: usize, total: usize) -> u8 {
    let total = total.max(1);
    let completed = completed.min(total);
    ((completed * 200 + total) / (total * 2)) as u8
}
