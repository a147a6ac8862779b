//! Two-partition task list kept in step with a [`TaskStore`].
//!
//! The view never re-reads the store after a gesture. Each handler performs
//! the store mutation and applies the returned [`StoreEvent`] to its own
//! rows, so only the touched row moves.

use chrono::NaiveDate;

use crate::error::Result;
use crate::input::parse_input;
use crate::jar::KeyValueStore;
use crate::store::{StoreEvent, TaskStore};
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partition {
    #[default]
    Active,
    Completed,
}

impl Partition {
    pub const ALL: [Partition; 2] = [Partition::Active, Partition::Completed];

    pub fn of(task: &Task) -> Self {
        if task.completed {
            Partition::Completed
        } else {
            Partition::Active
        }
    }

    pub fn other(self) -> Self {
        match self {
            Partition::Active => Partition::Completed,
            Partition::Completed => Partition::Active,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Partition::Active => "Active",
            Partition::Completed => "Completed",
        }
    }
}

/// Label of the toggle control shown next to a task.
pub fn action_label(task: &Task) -> &'static str {
    if task.completed {
        "Undo"
    } else {
        "Complete"
    }
}

#[derive(Debug, Default)]
pub struct TaskListView {
    active: Vec<Task>,
    completed: Vec<Task>,
    visible: Partition,
    selected: usize,
}

impl TaskListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds both partitions from the store, keeping stored order.
    pub fn render_all<S: KeyValueStore>(&mut self, store: &TaskStore<S>) -> Result<()> {
        self.active.clear();
        self.completed.clear();
        for task in store.list()? {
            self.rows_mut(Partition::of(&task)).push(task);
        }
        tracing::debug!(
            active = self.active.len(),
            completed = self.completed.len(),
            "rendered task list"
        );
        self.clamp_selection();
        Ok(())
    }

    /// Handles the input line. Returns `true` when a task was created and
    /// the input should be cleared; blank input is ignored.
    pub fn on_submit<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
        raw: &str,
        today: NaiveDate,
    ) -> Result<bool> {
        let Some(parsed) = parse_input(raw, today) else {
            return Ok(false);
        };
        let event = store.create(&parsed.text, &parsed.date)?;
        self.apply(event);
        Ok(true)
    }

    pub fn on_toggle_request<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
        id: TaskId,
    ) -> Result<()> {
        if let Some(event) = store.toggle_by_id(id)? {
            self.apply(event);
        }
        Ok(())
    }

    pub fn on_delete_request<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
        id: TaskId,
    ) -> Result<()> {
        if let Some(event) = store.remove_by_id(id)? {
            self.apply(event);
        }
        Ok(())
    }

    /// Removes completed tasks from the store and the completed partition.
    pub fn on_clear_completed<S: KeyValueStore>(&mut self, store: &mut TaskStore<S>) -> Result<()> {
        for task in store.clear_completed()? {
            self.apply(StoreEvent::Removed(task));
        }
        Ok(())
    }

    pub fn switch_partition_view(&mut self, which: Partition) {
        if self.visible != which {
            self.visible = which;
            self.selected = 0;
        }
    }

    /// Applies one store change to the rows.
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Created(task) => {
                self.rows_mut(Partition::of(&task)).insert(0, task);
            }
            StoreEvent::Toggled(task) => {
                self.take_row(task.id);
                self.rows_mut(Partition::of(&task)).insert(0, task);
            }
            StoreEvent::Removed(task) => {
                self.take_row(task.id);
            }
        }
        self.clamp_selection();
    }

    pub fn visible(&self) -> Partition {
        self.visible
    }

    pub fn rows(&self, partition: Partition) -> &[Task] {
        match partition {
            Partition::Active => &self.active,
            Partition::Completed => &self.completed,
        }
    }

    pub fn visible_rows(&self) -> &[Task] {
        self.rows(self.visible)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.visible_rows().is_empty()).then_some(self.selected)
    }

    pub fn selected(&self) -> Option<&Task> {
        self.visible_rows().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_rows().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn rows_mut(&mut self, partition: Partition) -> &mut Vec<Task> {
        match partition {
            Partition::Active => &mut self.active,
            Partition::Completed => &mut self.completed,
        }
    }

    fn take_row(&mut self, id: TaskId) -> Option<Task> {
        Partition::ALL.into_iter().find_map(|p| {
            let rows = self.rows_mut(p);
            let index = rows.iter().position(|t| t.id == id)?;
            Some(rows.remove(index))
        })
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
