//! Quick tasks: lightweight daily items and monthly goals

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub type QuickTaskId = i64;

/// The `type` discriminator of a quick task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuickTaskKind {
    /// A quick task for the day
    Day,
    /// A goal for the month
    Month,
    /// Any tag this crate does not know about
    #[serde(other)]
    Unknown,
}

impl Default for QuickTaskKind {
    fn default() -> Self {
        QuickTaskKind::Unknown
    }
}

impl Display for QuickTaskKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QuickTaskKind::Day => write!(f, "DAY"),
            QuickTaskKind::Month => write!(f, "MONTH"),
            QuickTaskKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickTask {
    id: QuickTaskId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    completed: bool,
    #[serde(rename = "type", default)]
    kind: QuickTaskKind,
    #[serde(default, deserialize_with = "crate::lenient::text")]
    creator: Option<String>,
}

impl QuickTask {
    pub fn new<S: ToString>(id: QuickTaskId, title: S, kind: QuickTaskKind) -> Self {
        Self { id, title: title.to_string(), completed: false, kind, creator: None }
    }

    pub(crate) fn from_new(id: QuickTaskId, new_quick_task: &NewQuickTask) -> Self {
        Self {
            id,
            title: new_quick_task.title.clone(),
            completed: false,
            kind: new_quick_task.kind,
            creator: new_quick_task.creator.clone(),
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn id(&self) -> QuickTaskId         { self.id }
    pub fn title(&self) -> &str             { &self.title }
    pub fn completed(&self) -> bool         { self.completed }
    pub fn kind(&self) -> QuickTaskKind     { self.kind }
    pub fn creator(&self) -> Option<&str>   { self.creator.as_deref() }
}


/// A quick task that does not exist on the server yet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewQuickTask {
    pub title: String,
    /// The user creating it. [`Client`](crate::client::Client) fills it from its session when left empty.
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuickTaskKind,
}

impl NewQuickTask {
    pub fn new<S: ToString>(title: S, kind: QuickTaskKind) -> Self {
        Self { title: title.to_string(), creator: None, kind }
    }

    pub fn goal<S: ToString>(title: S) -> Self {
        Self::new(title, QuickTaskKind::Month)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_quick_tasks() {
        let quick: Vec<QuickTask> = serde_json::from_str(r#"[
            {"id": 1, "title": "Read a book", "completed": true, "type": "MONTH", "creator": 7},
            {"id": 2, "title": "Water plants", "type": "DAY", "creator": "7"},
            {"id": 3, "title": "Mystery", "type": "WEEK"}
        ]"#).unwrap();

        assert_eq!(quick[0].kind(), QuickTaskKind::Month);
        assert!(quick[0].completed());
        assert_eq!(quick[0].creator(), Some("7"));
        assert_eq!(quick[1].kind(), QuickTaskKind::Day);
        assert!(quick[1].completed() == false);
        assert_eq!(quick[1].creator(), Some("7"));
        assert_eq!(quick[2].kind(), QuickTaskKind::Unknown);
    }

    #[test]
    fn encode_new_goal() {
        let mut goal = NewQuickTask::goal("Run 100km");
        goal.creator = Some("7".to_string());
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["type"], "MONTH");
        assert_eq!(value["creator"], "7");
        assert_eq!(value["title"], "Run 100km");
    }
}
