//! Parsing of backend roster records and the agenda form.

use serde::Deserialize;
use thiserror::Error;

use crate::booklet::AbstractEntry;
use crate::models::{SessionKind, SessionSlot, Submission};

/// Errors that can occur while reading input JSON.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// A presentation record as returned by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterRecord {
    pub id: i64,
    pub student_number: i64,
    pub student_name: String,
    pub laboratory_id: i64,
    pub theme: String,
    #[serde(default)]
    pub years_id: Option<i64>,
}

impl From<RosterRecord> for Submission {
    fn from(record: RosterRecord) -> Self {
        Submission {
            id: record.id.to_string(),
            group_id: record.laboratory_id.to_string(),
            student_id: record.student_number,
            display_name: record.student_name,
            title: record.theme,
        }
    }
}

/// One row of the agenda form.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEntry {
    #[serde(rename = "type")]
    pub kind: SessionKind,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub chair: Option<String>,
    #[serde(default)]
    pub timekeeper: Option<String>,
}

/// Parse a JSON array of roster records into submissions.
pub fn parse_roster(json: &str) -> Result<Vec<Submission>, RosterError> {
    let records: Vec<RosterRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Submission::from).collect())
}

/// Parse roster records, keeping only those of one academic year.
pub fn parse_roster_for_year(json: &str, years_id: i64) -> Result<Vec<Submission>, RosterError> {
    let records: Vec<RosterRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .filter(|r| r.years_id == Some(years_id))
        .map(Submission::from)
        .collect())
}

/// Parse the agenda form into slots indexed by their position.
pub fn parse_agenda(json: &str) -> Result<Vec<SessionSlot>, RosterError> {
    let entries: Vec<AgendaEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| SessionSlot {
            index,
            kind: entry.kind,
            start_time: entry.start_time,
            end_time: entry.end_time,
            // Breaks carry no staff
            chair: entry.chair.filter(|_| entry.kind == SessionKind::Presentation),
            timekeeper: entry
                .timekeeper
                .filter(|_| entry.kind == SessionKind::Presentation),
        })
        .collect())
}

/// Parse a JSON array of abstracts (`order`, `title`, `presenter`, `summary`).
pub fn parse_abstracts(json: &str) -> Result<Vec<AbstractEntry>, RosterError> {
    Ok(serde_json::from_str(json)?)
}
