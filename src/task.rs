//! Tasks, as sent by the API

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde_json::{Map, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::category::CategoryId;
use crate::status::TaskStatus;

/// The identifier of a task.
///
/// The server is free to use integers or strings. This keeps whatever it used, so that it can be sent back verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskId::Int(i) => write!(f, "{}", i),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        TaskId::Int(id)
    }
}

impl From<i32> for TaskId {
    fn from(id: i32) -> Self {
        TaskId::Int(id.into())
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId::Text(id.to_string())
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    /// Numeric strings become [`TaskId::Int`], anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(i) => TaskId::Int(i),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}


/// The fields of a task this crate understands, with their wire names
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Fields {
    id: TaskId,
    #[serde(default)]
    title: String,

    /// The day this task is scheduled for.
    /// Tasks with a missing or invalid date are kept, they just do not show on any calendar.
    #[serde(rename = "fecha", alias = "date", alias = "due_date", alias = "dueDate")]
    #[serde(default, deserialize_with = "crate::lenient::date")]
    due_date: Option<NaiveDate>,
    /// Optional time of day
    #[serde(rename = "hora", default, deserialize_with = "crate::lenient::time")]
    time: Option<NaiveTime>,

    #[serde(default, deserialize_with = "crate::lenient::text")]
    location: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::text")]
    description: Option<String>,

    /// The category ("family") this task belongs to. Only used for colors.
    #[serde(rename = "family", default, deserialize_with = "crate::lenient::reference")]
    category: Option<CategoryId>,

    #[serde(default)]
    status: TaskStatus,
    #[serde(rename = "puntosDeExperiencia", default)]
    experience_points: i64,
}

/// Other names the server may use for `fecha`
const DUE_DATE_ALIASES: [&str; 3] = ["date", "due_date", "dueDate"];

/// What the server sent, kept so that it can be sent back without losing anything
#[derive(Debug, PartialEq)]
struct Received {
    payload: Map<String, Value>,
    /// `Fields`, as encoded right after decoding `payload`
    decoded: Map<String, Value>,
}

fn to_object(fields: &Fields) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(fields)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!("A task must encode as an object, not {}", other))),
    }
}


/// A unit of work, with a due date and a status.
///
/// A task decoded from the server remembers its whole payload. Encoding it again only rewrites the fields that have been
/// changed since, so that fields unknown to this crate (or that it could not parse) are sent back untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    fields: Fields,
    received: Option<Arc<Received>>,
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Map::<String, Value>::deserialize(deserializer)?;
        let fields = Fields::deserialize(Value::Object(payload.clone())).map_err(DeError::custom)?;
        let decoded = to_object(&fields).map_err(DeError::custom)?;
        Ok(Self {
            fields,
            received: Some(Arc::new(Received { payload, decoded })),
        })
    }
}

impl Serialize for Task {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let current = to_object(&self.fields).map_err(SerError::custom)?;
        let received = match &self.received {
            None => return current.serialize(serializer),
            Some(received) => received,
        };

        let mut payload = received.payload.clone();
        for (key, value) in current {
            if received.decoded.get(&key) == Some(&value) {
                continue;
            }
            if key == "fecha" {
                for alias in DUE_DATE_ALIASES.iter() {
                    payload.remove(*alias);
                }
            }
            payload.insert(key, value);
        }
        payload.serialize(serializer)
    }
}

impl Task {
    /// Create a task with no date, no category, and the default `TODO` status
    pub fn new<I: Into<TaskId>, S: ToString>(id: I, title: S) -> Self {
        Self::from_fields(Fields {
            id: id.into(),
            title: title.to_string(),
            due_date: None,
            time: None,
            location: None,
            description: None,
            category: None,
            status: TaskStatus::default(),
            experience_points: 0,
        })
    }

    pub(crate) fn from_new(id: TaskId, new_task: &NewTask) -> Self {
        Self::from_fields(Fields {
            id,
            title: new_task.title.clone(),
            due_date: new_task.due_date,
            time: new_task.time,
            location: new_task.location.clone(),
            description: new_task.description.clone(),
            category: new_task.category,
            status: new_task.status,
            experience_points: new_task.experience_points,
        })
    }

    fn from_fields(fields: Fields) -> Self {
        Self { fields, received: None }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self { self.fields.due_date = Some(due_date); self }
    pub fn with_time(mut self, time: NaiveTime) -> Self { self.fields.time = Some(time); self }
    pub fn with_status(mut self, status: TaskStatus) -> Self { self.fields.status = status; self }
    pub fn with_category(mut self, category: CategoryId) -> Self { self.fields.category = Some(category); self }
    pub fn with_location<S: ToString>(mut self, location: S) -> Self { self.fields.location = Some(location.to_string()); self }
    pub fn with_description<S: ToString>(mut self, description: S) -> Self { self.fields.description = Some(description.to_string()); self }

    pub fn id(&self) -> &TaskId                 { &self.fields.id }
    pub fn title(&self) -> &str                 { &self.fields.title }
    pub fn due_date(&self) -> Option<NaiveDate> { self.fields.due_date }
    pub fn time(&self) -> Option<NaiveTime>     { self.fields.time }
    pub fn location(&self) -> Option<&str>      { self.fields.location.as_deref() }
    pub fn description(&self) -> Option<&str>   { self.fields.description.as_deref() }
    pub fn category(&self) -> Option<CategoryId> { self.fields.category }
    pub fn status(&self) -> TaskStatus          { self.fields.status }
    pub fn experience_points(&self) -> i64      { self.fields.experience_points }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.fields.status = status;
    }

    /// Whether this task falls on the given day. The time of day is ignored.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.fields.due_date == Some(date)
    }

    /// The due date combined with the time of day (midnight if there is none)
    pub fn due_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.fields.due_date?;
        match self.fields.time {
            Some(time) => Some(date.and_time(time)),
            None => date.and_hms_opt(0, 0, 0),
        }
    }

    /// The title cut after `max_chars` characters, followed by `...` when it was actually cut
    pub fn short_title(&self, max_chars: usize) -> String {
        let title = &self.fields.title;
        if title.chars().count() > max_chars {
            let cut: String = title.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            title.clone()
        }
    }
}


/// A task that does not exist on the server yet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(rename = "fecha")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "hora")]
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "family")]
    pub category: Option<CategoryId>,
    pub status: TaskStatus,
    #[serde(rename = "puntosDeExperiencia")]
    pub experience_points: i64,
}

impl NewTask {
    pub fn new<S: ToString>(title: S, due_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            due_date: Some(due_date),
            time: None,
            location: None,
            description: None,
            category: None,
            status: TaskStatus::default(),
            experience_points: 0,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_server_payload() {
        let json = r#"[
            {"id": 3, "title": "Dentist", "fecha": "2024-05-02", "hora": "10:30", "location": "Downtown",
             "description": "", "family": "2", "status": "DOING", "puntosDeExperiencia": 15},
            {"id": "b7", "title": "Groceries", "date": "2024-05-03T18:00:00Z", "status": "DONE"},
            {"id": 4, "title": "Someday", "fecha": null, "family": null},
            {"id": 5, "title": "Broken", "fecha": "not a date", "family": "none", "hora": ""}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks[0].id(), &TaskId::Int(3));
        assert_eq!(tasks[0].due_date(), NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(tasks[0].time(), NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(tasks[0].category(), Some(2));
        assert_eq!(tasks[0].description(), None);
        assert_eq!(tasks[0].location(), Some("Downtown"));
        assert_eq!(tasks[0].status(), TaskStatus::Doing);
        assert_eq!(tasks[0].experience_points(), 15);

        assert_eq!(tasks[1].id(), &TaskId::Text("b7".to_string()));
        assert_eq!(tasks[1].due_date(), NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(tasks[1].status(), TaskStatus::Done);

        assert_eq!(tasks[2].due_date(), None);
        assert_eq!(tasks[2].category(), None);
        assert_eq!(tasks[2].status(), TaskStatus::Todo);

        assert_eq!(tasks[3].due_date(), None);
        assert_eq!(tasks[3].category(), None);
        assert_eq!(tasks[3].time(), None);
    }

    #[test]
    fn encode_keeps_server_field_names() {
        let task = Task::new(12, "Run")
            .with_due_date(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
            .with_category(4)
            .with_status(TaskStatus::Paused);
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], 12);
        assert_eq!(value["fecha"], "2024-01-08");
        assert_eq!(value["family"], 4);
        assert_eq!(value["status"], "PAUSED");
        assert!(value.get("due_date").is_none());

        let text_id = serde_json::to_value(&Task::new("abc", "x")).unwrap();
        assert_eq!(text_id["id"], "abc");
    }

    #[test]
    fn encode_sends_back_what_was_received() {
        let received = serde_json::json!({
            "id": 9, "title": "Groceries", "date": "2024-05-03T18:00:00Z", "description": "",
            "family": "none", "user": 7, "tags": ["food"], "status": "TODO"
        });
        let mut task: Task = serde_json::from_value(received.clone()).unwrap();
        assert_eq!(serde_json::to_value(&task).unwrap(), received);

        task.set_status(TaskStatus::Done);
        let sent = serde_json::to_value(&task).unwrap();
        assert_eq!(sent["status"], "DONE");
        assert_eq!(sent["user"], 7);
        assert_eq!(sent["tags"], serde_json::json!(["food"]));
        assert_eq!(sent["date"], "2024-05-03T18:00:00Z");
        assert_eq!(sent["description"], "");
        assert_eq!(sent["family"], "none");
        assert!(sent.get("fecha").is_none());
        assert!(sent.get("location").is_none());

        // A changed due date replaces the original one, whatever its name was
        let moved = task.with_due_date(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        let sent = serde_json::to_value(&moved).unwrap();
        assert_eq!(sent["fecha"], "2024-05-06");
        assert!(sent.get("date").is_none());
        assert_eq!(sent["user"], 7);
    }

    #[test]
    fn due_datetime_and_day_match() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let task = Task::new(1, "Leap").with_due_date(day).with_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());

        assert!(task.is_due_on(day));
        assert!(task.is_due_on(day.succ_opt().unwrap()) == false);
        assert_eq!(task.due_datetime(), Some(day.and_hms_opt(23, 59, 0).unwrap()));

        let untimed = Task::new(2, "Untimed").with_due_date(day);
        assert_eq!(untimed.due_datetime(), Some(day.and_hms_opt(0, 0, 0).unwrap()));
        assert_eq!(Task::new(3, "Undated").due_datetime(), None);
    }

    #[test]
    fn short_titles() {
        assert_eq!(Task::new(1, "Laundry").short_title(5), "Laund...");
        assert_eq!(Task::new(1, "Gym").short_title(5), "Gym");
        assert_eq!(Task::new(1, "Café!").short_title(5), "Café!");
    }

    #[test]
    fn ids_from_strings() {
        assert_eq!("42".parse::<TaskId>().unwrap(), TaskId::Int(42));
        assert_eq!("x-42".parse::<TaskId>().unwrap(), TaskId::Text("x-42".to_string()));
        assert_eq!(TaskId::Int(42).to_string(), "42");
    }
}
