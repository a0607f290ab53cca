use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: Date,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}
