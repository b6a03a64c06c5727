//! Core data types for presentation scheduling.

use chrono::{NaiveTime, Timelike};
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's presentation submission.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[pyo3(get, set)]
    pub id: String,
    /// Laboratory the student belongs to
    #[pyo3(get, set)]
    pub group_id: String,
    /// Student number, the sort key inside groups and sessions
    #[pyo3(get, set)]
    pub student_id: i64,
    #[pyo3(get, set)]
    pub display_name: String,
    #[pyo3(get, set)]
    pub title: String,
}

#[pymethods]
impl Submission {
    #[new]
    #[pyo3(signature = (id, group_id, student_id, display_name=String::new(), title=String::new()))]
    fn new(
        id: String,
        group_id: String,
        student_id: i64,
        display_name: String,
        title: String,
    ) -> Self {
        Self {
            id,
            group_id,
            student_id,
            display_name,
            title,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Submission(id={:?}, group_id={:?}, student_id={})",
            self.id, self.group_id, self.student_id
        )
    }
}

/// Whether an agenda slot holds talks or is a break.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    #[serde(rename = "session")]
    Presentation,
    #[serde(rename = "break")]
    Break,
}

/// One block of the event agenda.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSlot {
    /// Position in the overall agenda (breaks included)
    #[pyo3(get, set)]
    pub index: usize,
    #[pyo3(get, set)]
    pub kind: SessionKind,
    /// Wall-clock start, "HH:MM"
    #[pyo3(get, set)]
    pub start_time: String,
    /// Wall-clock end, "HH:MM"
    #[pyo3(get, set)]
    pub end_time: String,
    #[pyo3(get, set)]
    pub chair: Option<String>,
    #[pyo3(get, set)]
    pub timekeeper: Option<String>,
}

impl SessionSlot {
    /// A presentation slot without chair or timekeeper.
    pub fn presentation(index: usize, start_time: &str, end_time: &str) -> Self {
        Self {
            index,
            kind: SessionKind::Presentation,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            chair: None,
            timekeeper: None,
        }
    }

    pub fn break_slot(index: usize, start_time: &str, end_time: &str) -> Self {
        Self {
            index,
            kind: SessionKind::Break,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            chair: None,
            timekeeper: None,
        }
    }

    pub fn is_presentation(&self) -> bool {
        self.kind == SessionKind::Presentation
    }

    /// Number of presentations that fit, `floor(duration / presentation_minutes)`.
    ///
    /// Breaks, non-positive durations and non-positive presentation lengths
    /// all yield 0.
    pub fn capacity(&self, presentation_minutes: f64) -> usize {
        if !self.is_presentation()
            || presentation_minutes.is_nan()
            || presentation_minutes <= 0.0
        {
            return 0;
        }
        let duration = self.duration_minutes();
        if duration <= 0 {
            return 0;
        }
        (duration as f64 / presentation_minutes).floor() as usize
    }
}

#[pymethods]
impl SessionSlot {
    #[new]
    #[pyo3(signature = (index, kind, start_time, end_time, chair=None, timekeeper=None))]
    fn new(
        index: usize,
        kind: SessionKind,
        start_time: String,
        end_time: String,
        chair: Option<String>,
        timekeeper: Option<String>,
    ) -> Self {
        Self {
            index,
            kind,
            start_time,
            end_time,
            chair,
            timekeeper,
        }
    }

    /// Minutes between start and end. Unparsable times count as 0.
    pub fn duration_minutes(&self) -> i64 {
        match (parse_clock(&self.start_time), parse_clock(&self.end_time)) {
            (Some(start), Some(end)) => end.signed_duration_since(start).num_minutes(),
            _ => 0,
        }
    }

    #[pyo3(name = "capacity")]
    fn py_capacity(&self, presentation_minutes: f64) -> usize {
        self.capacity(presentation_minutes)
    }

    /// Parsed start time, if valid.
    pub fn start_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.start_time)
    }

    /// Parsed end time, if valid.
    pub fn end_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.end_time)
    }

    fn __repr__(&self) -> String {
        format!(
            "SessionSlot(index={}, kind={:?}, {}-{})",
            self.index, self.kind, self.start_time, self.end_time
        )
    }
}

/// Parse an "HH:MM" or "HH:MM:SS" wall-clock string. Seconds are dropped.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(|t| t.with_second(0))
}

/// A submission placed in a session, with its program number.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduledPresentation {
    /// 1-based number across the whole program
    #[pyo3(get)]
    pub order: usize,
    #[pyo3(get)]
    pub submission: Submission,
}

#[pymethods]
impl ScheduledPresentation {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledPresentation(order={}, student_id={})",
            self.order, self.submission.student_id
        )
    }
}

/// The presentations assigned to one presentation slot.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionAssignment {
    #[pyo3(get)]
    pub session_index: usize,
    #[pyo3(get)]
    pub capacity: usize,
    #[pyo3(get)]
    pub presentations: Vec<ScheduledPresentation>,
}

impl SessionAssignment {
    pub fn student_ids(&self) -> Vec<i64> {
        self.presentations
            .iter()
            .map(|p| p.submission.student_id)
            .collect()
    }
}

#[pymethods]
impl SessionAssignment {
    fn __len__(&self) -> usize {
        self.presentations.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "SessionAssignment(session_index={}, assigned={}/{})",
            self.session_index,
            self.presentations.len(),
            self.capacity
        )
    }
}

/// Result of scheduling: one entry per presentation slot, in agenda order.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    #[pyo3(get)]
    pub sessions: Vec<SessionAssignment>,
}

impl Assignment {
    /// Look up the assignment of the slot at `session_index` in the agenda.
    pub fn get(&self, session_index: usize) -> Option<&SessionAssignment> {
        self.sessions
            .iter()
            .find(|s| s.session_index == session_index)
    }

    /// Every scheduled presentation in program order.
    pub fn presentations(&self) -> impl Iterator<Item = &ScheduledPresentation> {
        self.sessions.iter().flat_map(|s| s.presentations.iter())
    }
}

#[pymethods]
impl Assignment {
    pub fn total_assigned(&self) -> usize {
        self.sessions.iter().map(|s| s.presentations.len()).sum()
    }

    #[pyo3(name = "session")]
    fn py_session(&self, session_index: usize) -> Option<SessionAssignment> {
        self.get(session_index).cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "Assignment(sessions={}, presentations={})",
            self.sessions.len(),
            self.total_assigned()
        )
    }
}
