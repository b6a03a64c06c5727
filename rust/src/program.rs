//! Event program: agenda slots joined with their scheduled presentations.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PdfLayout;
use crate::models::{Assignment, ScheduledPresentation, SessionKind, SessionSlot};
use crate::pdf::{wrap_text, Page};

/// Errors that can occur while encoding a program for the backend.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Submission {field} {value:?} is not a numeric id")]
    NonNumericId { field: &'static str, value: String },
    #[error("Failed to encode program: {0}")]
    Json(#[from] serde_json::Error),
}

/// Header information printed at the top of the program.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[pyo3(get, set)]
    pub course_name: String,
    #[pyo3(get, set)]
    pub event_name: String,
    #[pyo3(get, set)]
    pub event_theme: String,
    #[pyo3(get, set)]
    pub date_time: String,
    #[pyo3(get, set)]
    pub venue: String,
}

#[pymethods]
impl EventDetails {
    #[new]
    #[pyo3(signature = (course_name, event_name, event_theme=String::new(), date_time=String::new(), venue=String::new()))]
    fn new(
        course_name: String,
        event_name: String,
        event_theme: String,
        date_time: String,
        venue: String,
    ) -> Self {
        Self {
            course_name,
            event_name,
            event_theme,
            date_time,
            venue,
        }
    }

    fn __repr__(&self) -> String {
        format!("EventDetails(event_name={:?})", self.event_name)
    }
}

/// One agenda slot of the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramSession {
    pub slot: SessionSlot,
    /// 1-based number among presentation slots; `None` for breaks
    pub number: Option<usize>,
    pub presentations: Vec<ScheduledPresentation>,
}

impl ProgramSession {
    pub fn time_range(&self, separator: &str) -> String {
        format!("{}{}{}", self.slot.start_time, separator, self.slot.end_time)
    }
}

/// A complete program ready for rendering.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub details: EventDetails,
    pub sessions: Vec<ProgramSession>,
}

/// Combine the agenda with a schedule. Breaks stay in place; presentation
/// slots without an entry in `assignment` come out empty.
pub fn build_program(
    details: &EventDetails,
    sessions: &[SessionSlot],
    assignment: &Assignment,
) -> Program {
    let mut number = 0;
    let sessions = sessions
        .iter()
        .map(|slot| {
            if !slot.is_presentation() {
                return ProgramSession {
                    slot: slot.clone(),
                    number: None,
                    presentations: Vec::new(),
                };
            }
            number += 1;
            let presentations = assignment
                .get(slot.index)
                .map(|s| s.presentations.clone())
                .unwrap_or_default();
            ProgramSession {
                slot: slot.clone(),
                number: Some(number),
                presentations,
            }
        })
        .collect();

    Program {
        details: details.clone(),
        sessions,
    }
}

impl Program {
    /// Plain-text rendering for the PDF assembler.
    ///
    /// Every page is titled with the event name; body lines are split so no
    /// page exceeds `layout.lines_per_page` lines.
    pub fn to_pages(&self, layout: &PdfLayout) -> Vec<Page> {
        let details = &self.details;
        let mut body: Vec<String> = [
            &details.course_name,
            &details.event_theme,
            &details.date_time,
            &details.venue,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();

        for session in &self.sessions {
            body.push(String::new());
            let Some(number) = session.number else {
                body.push(format!("Break ({})", session.time_range("-")));
                continue;
            };
            body.push(format!(
                "Session {} ({})  Chair: {}, Timekeeper: {}",
                number,
                session.time_range("-"),
                session.slot.chair.as_deref().unwrap_or(""),
                session.slot.timekeeper.as_deref().unwrap_or("")
            ));
            for p in &session.presentations {
                body.extend(wrap_text(
                    &format!(
                        "{}. {} / {}",
                        p.order, p.submission.title, p.submission.display_name
                    ),
                    layout.wrap_width,
                ));
            }
        }

        let per_page = layout.lines_per_page.max(2) - 1;
        if body.is_empty() {
            return vec![Page::from_lines([details.event_name.clone()])];
        }
        body.chunks(per_page)
            .map(|chunk| {
                let mut lines = Vec::with_capacity(chunk.len() + 1);
                lines.push(details.event_name.clone());
                lines.extend(chunk.iter().cloned());
                Page::new(lines)
            })
            .collect()
    }

    /// JSON body for the backend's program endpoint.
    ///
    /// Submission and laboratory ids must be numeric; `years_id` is the
    /// academic year the roster was filtered by.
    pub fn to_json(&self, years_id: i64) -> Result<String, ProgramError> {
        let sessions = self
            .sessions
            .iter()
            .map(|session| ScheduleSession::new(session, years_id))
            .collect::<Result<Vec<_>, _>>()?;

        let data = ScheduleData {
            details: &self.details,
            sessions,
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

#[derive(Serialize)]
struct ScheduleData<'a> {
    #[serde(flatten)]
    details: &'a EventDetails,
    sessions: Vec<ScheduleSession<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleSession<'a> {
    #[serde(rename = "type")]
    kind: SessionKind,
    start_time: &'a str,
    end_time: &'a str,
    chair: Option<&'a str>,
    timekeeper: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presentations: Option<Vec<SchedulePresentation<'a>>>,
}

impl<'a> ScheduleSession<'a> {
    fn new(session: &'a ProgramSession, years_id: i64) -> Result<Self, ProgramError> {
        let presentations = match session.number {
            Some(_) => Some(
                session
                    .presentations
                    .iter()
                    .map(|p| SchedulePresentation::new(p, years_id))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(Self {
            kind: session.slot.kind,
            start_time: &session.slot.start_time,
            end_time: &session.slot.end_time,
            chair: session.slot.chair.as_deref(),
            timekeeper: session.slot.timekeeper.as_deref(),
            presentations,
        })
    }
}

#[derive(Serialize)]
struct SchedulePresentation<'a> {
    id: i64,
    student_number: i64,
    student_name: &'a str,
    laboratory_id: i64,
    theme: &'a str,
    years_id: i64,
}

impl<'a> SchedulePresentation<'a> {
    fn new(presentation: &'a ScheduledPresentation, years_id: i64) -> Result<Self, ProgramError> {
        let submission = &presentation.submission;
        Ok(Self {
            id: numeric_id("id", &submission.id)?,
            student_number: submission.student_id,
            student_name: &submission.display_name,
            laboratory_id: numeric_id("group_id", &submission.group_id)?,
            theme: &submission.title,
            years_id,
        })
    }
}

fn numeric_id(field: &'static str, value: &str) -> Result<i64, ProgramError> {
    value.trim().parse().map_err(|_| ProgramError::NonNumericId {
        field,
        value: value.to_string(),
    })
}

#[pymethods]
impl Program {
    pub fn presentation_count(&self) -> usize {
        self.sessions.iter().map(|s| s.presentations.len()).sum()
    }

    #[pyo3(name = "to_json")]
    fn py_to_json(&self, years_id: i64) -> PyResult<String> {
        self.to_json(years_id)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Program(event_name={:?}, sessions={}, presentations={})",
            self.details.event_name,
            self.sessions.len(),
            self.presentation_count()
        )
    }
}
