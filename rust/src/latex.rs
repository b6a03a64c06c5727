//! LaTeX escaping and the session program template.

use crate::config::LatexEscapeMode;
use crate::program::{Program, ProgramSession};

/// MIME type of generated `.tex` sources.
pub const LATEX_MIME_TYPE: &str = "application/x-latex";

const SPECIALS: [char; 7] = ['&', '%', '$', '#', '_', '{', '}'];

/// Escape text with the historical chained substitution.
///
/// The passes run in this order:
/// 1. prefix each of `& % $ # _ { }` with a backslash
/// 2. replace every backslash, including those added by pass 1, with
///    `\textbackslash{}`
/// 3. replace `~` and `^` with `\~{}` and `\^{}`
/// 4. replace every `_` with `\_`
///
/// Because pass 2 sees the backslashes from pass 1, `&` becomes
/// `\textbackslash{}&` and `_` becomes `\textbackslash{}\_`. Generated
/// programs rely on this exact output, so it is kept as is; use
/// [`escape_latex_single_pass`] for conventional escaping.
pub fn escape_latex(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut prefixed = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIALS.contains(&c) {
            prefixed.push('\\');
        }
        prefixed.push(c);
    }

    let backslashed = prefixed.replace('\\', "\\textbackslash{}");

    let mut accented = String::with_capacity(backslashed.len());
    for c in backslashed.chars() {
        match c {
            '~' | '^' => {
                accented.push('\\');
                accented.push(c);
                accented.push_str("{}");
            }
            _ => accented.push(c),
        }
    }

    accented.replace('_', "\\_")
}

/// Escape text so each special character is escaped exactly once.
pub fn escape_latex_single_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' | '^' => {
                out.push('\\');
                out.push(c);
                out.push_str("{}");
            }
            c if SPECIALS.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape with the selected mode.
pub fn escape_with(text: &str, mode: LatexEscapeMode) -> String {
    match mode {
        LatexEscapeMode::Observed => escape_latex(text),
        LatexEscapeMode::SinglePass => escape_latex_single_pass(text),
    }
}

fn session_latex(session: &ProgramSession, mode: LatexEscapeMode) -> String {
    let esc = |s: &str| escape_with(s, mode);
    let title = format!(
        "{}〜{}",
        esc(&session.slot.start_time),
        esc(&session.slot.end_time)
    );

    let Some(number) = session.number else {
        return format!("\\section*{{Break（{}）}}\n\\vspace{{0.5cm}}", title);
    };

    let rows: Vec<String> = session
        .presentations
        .iter()
        .map(|p| {
            format!(
                "  {}. & {} & {} \\\\",
                p.order,
                esc(&p.submission.display_name),
                esc(&p.submission.title)
            )
        })
        .collect();

    format!(
        "\n\\section*{{Session {}（{}）{{\\normalsize 座長：{}、タイムキーパー：{}}} }}\n\\begin{{tabular}}{{rlp{{12cm}}}}\n{}\n\\end{{tabular}}\n",
        number,
        title,
        esc(session.slot.chair.as_deref().unwrap_or("")),
        esc(session.slot.timekeeper.as_deref().unwrap_or("")),
        rows.join("\n")
    )
}

/// Render a program as a standalone jsarticle document.
pub fn program_to_latex(program: &Program, mode: LatexEscapeMode) -> String {
    let esc = |s: &str| escape_with(s, mode);
    let details = &program.details;
    let sessions: Vec<String> = program
        .sessions
        .iter()
        .map(|s| session_latex(s, mode))
        .collect();

    format!(
        r"

\documentclass[dvipdfmx,a4j]{{jsarticle}}

\usepackage[top=20truemm,bottom=20truemm,left=25truemm,right=25truemm]{{geometry}}
\begin{{document}}
\title{{{{\normalsize {course}}} \\
{{\LARGE {event}}} \\
{{\Large {theme}}}}}
\date{{\empty}}
\maketitle
\vspace{{-1cm}}
\noindent
\hspace{{5cm}} 日時：{date} \\
\hspace{{5cm}} 会場：{venue}
\vspace{{1cm}}
{sessions}
\end{{document}}
",
        course = esc(&details.course_name),
        event = esc(&details.event_name),
        theme = esc(&details.event_theme),
        date = esc(&details.date_time),
        venue = esc(&details.venue),
        sessions = sessions.join("\n\\vspace{0.5cm}\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, SessionSlot, Submission};
    use crate::program::{build_program, EventDetails};
    use crate::scheduler::schedule;

    #[test]
    fn test_escape_latex_observed_chain() {
        assert_eq!(
            escape_latex("A & B_C $5"),
            "A \\textbackslash{}& B\\textbackslash{}\\_C \\textbackslash{}$5"
        );
        assert_eq!(escape_latex("100%"), "100\\textbackslash{}%");
        assert_eq!(escape_latex("{x}"), "\\textbackslash{}{x\\textbackslash{}}");
    }

    #[test]
    fn test_escape_latex_tilde_caret_not_doubled() {
        // Pass 3 runs after the backslash pass, so its backslashes survive
        assert_eq!(escape_latex("a~b^c"), "a\\~{}b\\^{}c");
    }

    #[test]
    fn test_escape_latex_backslash_and_empty() {
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex(""), "");
        assert_eq!(escape_latex("品川区の分析"), "品川区の分析");
    }

    #[test]
    fn test_escape_latex_reescape() {
        let once = escape_latex("&");
        let twice = escape_latex(&once);
        assert_eq!(once, "\\textbackslash{}&");
        assert_eq!(
            twice,
            "\\textbackslash{}textbackslash\\textbackslash{}{\\textbackslash{}}\\textbackslash{}&"
        );
    }

    #[test]
    fn test_escape_single_pass() {
        let escaped = escape_latex_single_pass("A & B_C $5");
        assert_eq!(escaped, "A \\& B\\_C \\$5");
        for special in ['&', '_', '$'] {
            let idx = escaped.find(special).unwrap();
            assert_eq!(&escaped[idx - 1..idx], "\\");
            assert_ne!(&escaped[idx - 2..idx - 1], "\\");
        }
        assert_eq!(escape_latex_single_pass("a\\b~"), "a\\textbackslash{}b\\~{}");
    }

    #[test]
    fn test_escape_with_mode() {
        assert_eq!(escape_with("#1", LatexEscapeMode::Observed), "\\textbackslash{}#1");
        assert_eq!(escape_with("#1", LatexEscapeMode::SinglePass), "\\#1");
    }

    fn sample_program() -> Program {
        let mut first = SessionSlot::presentation(0, "10:30", "11:00");
        first.chair = Some("橋本".to_string());
        first.timekeeper = Some("笹川".to_string());
        let sessions = vec![
            first,
            SessionSlot::break_slot(1, "11:00", "11:10"),
            SessionSlot::presentation(2, "11:10", "11:40"),
        ];
        let subs: Vec<Submission> = (1..=4)
            .map(|i| Submission {
                id: i.to_string(),
                group_id: if i % 2 == 0 { "2" } else { "1" }.to_string(),
                student_id: 5400 + i,
                display_name: format!("Name{}", i),
                title: format!("Theme_{}", i),
            })
            .collect();
        let assignment = schedule(&subs, &sessions, 15.0).unwrap();
        let details = EventDetails {
            course_name: "Course".to_string(),
            event_name: "Event".to_string(),
            event_theme: "Theme".to_string(),
            date_time: "Aug 1".to_string(),
            venue: "IS-631".to_string(),
        };
        build_program(&details, &sessions, &assignment)
    }

    #[test]
    fn test_program_to_latex_structure() {
        let latex = program_to_latex(&sample_program(), LatexEscapeMode::SinglePass);

        assert!(latex.starts_with(
            "\n\n\\documentclass[dvipdfmx,a4j]{jsarticle}\n\n\\usepackage[top=20truemm,"
        ));
        assert!(latex.contains("\\title{{\\normalsize Course} \\\\\n{\\LARGE Event} \\\\\n{\\Large Theme}}"));
        assert!(latex.contains("\\hspace{5cm} 会場：IS-631\n"));
        assert!(latex.contains(
            "\\section*{Session 1（10:30〜11:00）{\\normalsize 座長：橋本、タイムキーパー：笹川} }"
        ));
        assert!(latex.contains("\\section*{Break（11:00〜11:10）}\n\\vspace{0.5cm}"));
        assert!(latex.contains("\\section*{Session 2（11:10〜11:40）"));
        assert!(latex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_program_to_latex_numbering_continues() {
        let latex = program_to_latex(&sample_program(), LatexEscapeMode::SinglePass);

        assert!(latex.contains("  1. & Name1 & Theme\\_1 \\\\"));
        assert!(latex.contains("  2. & Name2 & Theme\\_2 \\\\"));
        assert!(latex.contains("  3. & Name3 & Theme\\_3 \\\\"));
        assert!(latex.contains("  4. & Name4 & Theme\\_4 \\\\"));
        let first = latex.find("Session 1").unwrap();
        let second = latex.find("Session 2").unwrap();
        let third_row = latex.find("  3. &").unwrap();
        assert!(first < second && second < third_row);
    }

    #[test]
    fn test_program_to_latex_observed_escaping() {
        let latex = program_to_latex(&sample_program(), LatexEscapeMode::Observed);
        assert!(latex.contains("  1. & Name1 & Theme\\textbackslash{}\\_1 \\\\"));
    }

    #[test]
    fn test_empty_program_renders() {
        let program = build_program(&EventDetails::default(), &[], &Assignment::default());
        let latex = program_to_latex(&program, LatexEscapeMode::Observed);
        assert!(latex.contains("\\begin{document}"));
        assert!(latex.contains("\\end{document}"));
    }
}
