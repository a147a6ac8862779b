//! The authoritative task list.
//!
//! [`TaskStore`] keeps no copy of its own: every call reads the `tasks` key
//! from the jar, and every mutation writes the whole array back.

use crate::error::Result;
use crate::jar::{default_ttl, KeyValueStore};
use crate::task::{Task, TaskId};

pub const TASKS_KEY: &str = "tasks";

/// What a mutation changed, for the view to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(Task),
    Toggled(Task),
    Removed(Task),
}

impl StoreEvent {
    pub fn task(&self) -> &Task {
        match self {
            StoreEvent::Created(task) | StoreEvent::Toggled(task) | StoreEvent::Removed(task) => task,
        }
    }
}

pub struct TaskStore<S: KeyValueStore> {
    jar: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Wraps `jar` as is. Jars written by other versions may hold records
    /// without ids; use [`TaskStore::open`] for those.
    pub(crate) fn new(jar: S) -> Self {
        Self { jar }
    }

    /// Wraps `jar`, first giving an id to any stored task that lacks one so
    /// ids stay stable across reads.
    pub fn open(jar: S) -> Result<Self> {
        let mut store = Self::new(jar);
        store.assign_missing_ids()?;
        Ok(store)
    }

    fn assign_missing_ids(&mut self) -> Result<()> {
        let Some(raw) = self.jar.get(TASKS_KEY)? else {
            return Ok(());
        };
        let Ok(records) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) else {
            return Ok(());
        };
        if records.iter().all(|r| r.get("id").is_some()) {
            return Ok(());
        }
        // Unparseable lists read as empty but stay untouched in the jar.
        let tasks: Vec<Task> = match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("leaving unreadable task list as is: {e}");
                return Ok(());
            }
        };
        tracing::info!(count = tasks.len(), "assigning ids to stored tasks");
        self.save(&tasks)
    }

    pub fn jar(&self) -> &S {
        &self.jar
    }

    pub fn jar_mut(&mut self) -> &mut S {
        &mut self.jar
    }

    /// All tasks, most recently added first.
    pub fn list(&self) -> Result<Vec<Task>> {
        let Some(raw) = self.jar.get(TASKS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!("discarding malformed task list: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks)?;
        self.jar.set(TASKS_KEY, &raw, default_ttl())
    }

    /// Inserts a new, uncompleted task at the front.
    pub fn create(&mut self, text: &str, date: &str) -> Result<StoreEvent> {
        let task = Task::new(text, date);
        let mut tasks = self.list()?;
        tasks.insert(0, task.clone());
        self.save(&tasks)?;
        tracing::info!(id = %task.id, text = %task.text, date = %task.date, "task created");
        Ok(StoreEvent::Created(task))
    }

    /// Flips `completed` on the first task carrying (text, date).
    pub fn toggle(&mut self, text: &str, date: &str) -> Result<Option<StoreEvent>> {
        self.toggle_where(|t| t.matches(text, date))
    }

    pub fn toggle_by_id(&mut self, id: TaskId) -> Result<Option<StoreEvent>> {
        self.toggle_where(|t| t.id == id)
    }

    /// Deletes the first task carrying (text, date).
    pub fn remove(&mut self, text: &str, date: &str) -> Result<Option<StoreEvent>> {
        self.remove_where(|t| t.matches(text, date))
    }

    pub fn remove_by_id(&mut self, id: TaskId) -> Result<Option<StoreEvent>> {
        self.remove_where(|t| t.id == id)
    }

    /// Deletes every completed task, returning them in stored order.
    pub fn clear_completed(&mut self) -> Result<Vec<Task>> {
        let (done, kept): (Vec<Task>, Vec<Task>) =
            self.list()?.into_iter().partition(|t| t.completed);
        if !done.is_empty() {
            self.save(&kept)?;
            tracing::info!(count = done.len(), "cleared completed tasks");
        }
        Ok(done)
    }

    fn toggle_where(&mut self, pred: impl Fn(&Task) -> bool) -> Result<Option<StoreEvent>> {
        let mut tasks = self.list()?;
        let Some(task) = tasks.iter_mut().find(|t| pred(t)) else {
            tracing::debug!("toggle matched no task");
            return Ok(None);
        };
        task.completed = !task.completed;
        let toggled = task.clone();
        self.save(&tasks)?;
        tracing::info!(id = %toggled.id, completed = toggled.completed, "task toggled");
        Ok(Some(StoreEvent::Toggled(toggled)))
    }

    fn remove_where(&mut self, pred: impl Fn(&Task) -> bool) -> Result<Option<StoreEvent>> {
        let mut tasks = self.list()?;
        let Some(index) = tasks.iter().position(|t| pred(t)) else {
            tracing::debug!("remove matched no task");
            return Ok(None);
        };
        let removed = tasks.remove(index);
        self.save(&tasks)?;
        tracing::info!(id = %removed.id, "task removed");
        Ok(Some(StoreEvent::Removed(removed)))
    }
}
