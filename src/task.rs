use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    // Older jars stored bare {text, date, completed}; those get an id on read.
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
    pub text: String,
    pub date: String, // DD/MM/YYYY unless the user typed something else
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            date: date.into(),
            completed: false,
        }
    }

    /// Whether this task carries the given (text, date) pair.
    pub fn matches(&self, text: &str, date: &str) -> bool {
        self.text == text && self.date == date
    }
}
