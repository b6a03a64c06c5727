//! Contact-time record sheet (コンタクトタイム記録用紙) for one student.

use pyo3::prelude::*;

use crate::latex::escape_latex_single_pass;

/// One supervision meeting on the record sheet.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactTimeEntry {
    /// Short date such as "10/2"
    #[pyo3(get, set)]
    pub date: String,
    #[pyo3(get, set)]
    pub start_time: String,
    #[pyo3(get, set)]
    pub end_time: String,
    /// Minutes excluded from the meeting
    #[pyo3(get, set)]
    pub excluded_minutes: u32,
    /// Minutes counted towards the total
    #[pyo3(get, set)]
    pub duration_minutes: u32,
    #[pyo3(get, set)]
    pub content: String,
}

#[pymethods]
impl ContactTimeEntry {
    #[new]
    #[pyo3(signature = (date, start_time, end_time, duration_minutes, content=String::new(), excluded_minutes=0))]
    fn new(
        date: String,
        start_time: String,
        end_time: String,
        duration_minutes: u32,
        content: String,
        excluded_minutes: u32,
    ) -> Self {
        Self {
            date,
            start_time,
            end_time,
            excluded_minutes,
            duration_minutes,
            content,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ContactTimeEntry(date={:?}, duration_minutes={})",
            self.date, self.duration_minutes
        )
    }
}

/// Header fields of the record sheet.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactTimeSheet {
    #[pyo3(get, set)]
    pub fiscal_year: i32,
    /// Research kind printed in the title, e.g. "卒業"
    #[pyo3(get, set)]
    pub research_kind: String,
    #[pyo3(get, set)]
    pub sheet_number: u32,
    #[pyo3(get, set)]
    pub course_name: String,
    #[pyo3(get, set)]
    pub laboratory_name: String,
    #[pyo3(get, set)]
    pub student_name: String,
}

impl Default for ContactTimeSheet {
    fn default() -> Self {
        Self {
            fiscal_year: 2023,
            research_kind: "卒業".to_string(),
            sheet_number: 1,
            course_name: "情報通信工学コース".to_string(),
            laboratory_name: String::new(),
            student_name: String::new(),
        }
    }
}

#[pymethods]
impl ContactTimeSheet {
    #[new]
    #[pyo3(signature = (laboratory_name, student_name, fiscal_year=None, research_kind=None, sheet_number=None, course_name=None))]
    fn new(
        laboratory_name: String,
        student_name: String,
        fiscal_year: Option<i32>,
        research_kind: Option<String>,
        sheet_number: Option<u32>,
        course_name: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            fiscal_year: fiscal_year.unwrap_or(defaults.fiscal_year),
            research_kind: research_kind.unwrap_or(defaults.research_kind),
            sheet_number: sheet_number.unwrap_or(defaults.sheet_number),
            course_name: course_name.unwrap_or(defaults.course_name),
            laboratory_name,
            student_name,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ContactTimeSheet(laboratory_name={:?}, student_name={:?})",
            self.laboratory_name, self.student_name
        )
    }
}

/// Sum of counted minutes over all entries.
pub fn total_contact_minutes(entries: &[ContactTimeEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.duration_minutes)).sum()
}

/// One `\addLine` row of the sheet.
pub fn contact_time_line(entry: &ContactTimeEntry) -> String {
    format!(
        "\\addLine{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}",
        escape_latex_single_pass(&entry.date),
        escape_latex_single_pass(&entry.start_time),
        escape_latex_single_pass(&entry.end_time),
        entry.excluded_minutes,
        entry.duration_minutes,
        escape_latex_single_pass(&entry.content)
    )
}

const PREAMBLE_HEAD: &str = r"
\documentclass[a4j,12pt]{jarticle}
%!TEX root = output.utf8.tex
\usepackage[a4paper,totalheight=265mm,textwidth=175mm]{geometry}
\pagestyle{empty}
\setlength{\unitlength}{1mm}
\newcommand{\ysize}{192}
\newcommand{\xline}{\line(1,0){175}}%
\newcommand{\yline}{\line(0,1){\ysize}}%
\newcount\x
\newcount\y
\newcommand{\startFrame}{%
 \begin{picture}(175,260)
  \put(0,0){\makebox(175,260){}}
  \put(0,30){
   \thicklines
   \put(0,0){\framebox(175,192){}}
   \put(0,186){\xline}
   \put(66,0){\line(0,-1){6}}%
   \put(90,0){\line(0,-1){6}}%
   \put(66,-6){\line(1,0){24}}%
   \thinlines
   \multiput(0,6)(0,6){30}{\xline}
   \put(16,0){\yline}%
   \put(33,0){\yline}%
   \put(50,0){\yline}%
   \put(66,0){\yline}%
   \put(90,0){\yline}%
   \put(0,186){
    \put(0,0){\makebox(16,6){日付}}%
    \put(16,0){\makebox(17,6){開始時刻}}%
    \put(33,0){\makebox(17,6){終了時刻}}%
    \put(50,0){\makebox(16,6){除外(分)}}%
    \put(66,0){\makebox(24,6){実施時間(分)}}%
    \put(90,0){\makebox(85,6){内容}}%
   }
  }
  \put(0,0){
   \thicklines
   \put(0,0){\framebox(90,18){}}
   \thinlines
   \multiput(0,6)(0,6){2}{\line(1,0){90}}%
   \put(45,0){\line(0,1){18}}%
   \put(0,0){\makebox(45,6){総コンタクトタイム}}%
   \put(0,6){\makebox(45,6){これまでのコンタクトタイム}}%
   \put(0,12){\makebox(45,6){今回のコンタクトタイム}}%
  }
  \put(155,0){\thicklines\framebox(20,20){}}
  \put(140,0){教員の印}%

  \global\y=210
}

\newcommand{\nendoNumber}[3]{%
 \put(0,236){\makebox(175,8){\Large\bf #1年度　#2研究　コンタクトタイム記録用紙}}%
 \put(0,244){\makebox(175,6)[r]{No. #3}}%
}
\newcommand{\courseLaboName}[3]{
\put(0,228){\makebox(175,6){%
#1 \hfil ";

const PREAMBLE_TAIL: &str = r" \hfil #3
}}%
}
\newcommand{\lastFrame}{
 \end{picture}
}

\newcommand{\addLine}[6]{
 \put(0,\y){%
  \put(0,0){\makebox(16,6){#1}}%
  \put(16,0){\makebox(17,6){#2}}%
  \put(33,0){\makebox(17,6){#3}}%
  \put(50,0){\makebox(16,6){#4}}%
  \put(66,0){\makebox(24,6){#5}}%
  \put(91,0){\makebox(83,6)[l]{#6}}%
 }
 \global\advance\y by -6
}

\newcommand{\total}[1]{%
 \put(66,24){\makebox(24,6){#1}}
}

\newcommand{\writeTime}[3]{%
   \put(45,0){\makebox(45,6){#3}}%
   \put(45,6){\makebox(45,6){#2}}%
   \put(45,12){\makebox(45,6){#1}}%
}
";

/// Render the record sheet as a standalone jarticle document.
///
/// Rows are drawn top to bottom in the order given and `\total` carries
/// the sum of their durations.
pub fn contact_time_to_latex(sheet: &ContactTimeSheet, entries: &[ContactTimeEntry]) -> String {
    let laboratory = escape_latex_single_pass(&sheet.laboratory_name);
    let lines: Vec<String> = entries.iter().map(contact_time_line).collect();

    let mut out = String::with_capacity(PREAMBLE_HEAD.len() + PREAMBLE_TAIL.len() + 512);
    out.push_str(PREAMBLE_HEAD);
    // The macro body prints the laboratory itself; its second argument is unused
    out.push_str(&laboratory);
    out.push_str(PREAMBLE_TAIL);
    out.push_str(&format!(
        "\n\\begin{{document}}\n\\startFrame\n\\nendoNumber{{{}}}{{{}}}{{{}}}\n\\courseLaboName{{{}}}{{{}}}{{{}}}\n{}\n\\total{{{}}}\n\\lastFrame\n\\end{{document}}\n",
        sheet.fiscal_year,
        escape_latex_single_pass(&sheet.research_kind),
        sheet.sheet_number,
        escape_latex_single_pass(&sheet.course_name),
        laboratory,
        escape_latex_single_pass(&sheet.student_name),
        lines.join("\n"),
        total_contact_minutes(entries)
    ));
    out
}
