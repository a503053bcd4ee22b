//! Hint context: progressive nudges that must not repeat earlier ones.

use std::fmt::Write;

use super::list_or;
use crate::domain::problem::Problem;
use crate::domain::profile::Profile;

/// How many leading lines of the student's code snapshot are included.
const CODE_SNAPSHOT_LINES: usize = 30;

/// Renders the hint-agent prompt.
///
/// Every previously given hint is listed verbatim under an explicit
/// DO-NOT-REPEAT instruction; the model is asked for one new hint that
/// progresses beyond them. If a code snapshot is supplied, only its first
/// 30 lines are shown to keep the context bounded.
pub fn render_hint_context(
    problem: &Problem,
    profile: &Profile,
    previous_hints: &[String],
    current_code: Option<&str>,
) -> String {
    let hints_block = if previous_hints.is_empty() {
        "  None given yet.".to_string()
    } else {
        previous_hints
            .iter()
            .enumerate()
            .map(|(i, hint)| format!("  {}. {hint}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut out = String::new();
    writeln!(out, "## PERSONALISATION PROFILE").unwrap();
    writeln!(out, "Experience Level:   {}", profile.experience_level).unwrap();
    writeln!(out, "Thinking Style:     {}", profile.thinking_style).unwrap();
    writeln!(out, "Known Gaps:         {}", list_or(&profile.gaps, "None")).unwrap();
    writeln!(
        out,
        "Mistake Patterns:   {}",
        list_or(&profile.mistake_patterns, "None")
    )
    .unwrap();
    writeln!(
        out,
        "Recent Weaknesses:  {}",
        list_or(&profile.recent_weaknesses, "None")
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## PROBLEM").unwrap();
    writeln!(out, "Title:       {}", problem.title).unwrap();
    writeln!(out, "Description: {}", problem.description).unwrap();
    writeln!(out, "Concepts:    {}", list_or(&problem.concept_ids, "None")).unwrap();
    writeln!(
        out,
        "Constraints: {}",
        if problem.constraints.is_empty() {
            "None".to_string()
        } else {
            problem.constraints.join("; ")
        }
    )
    .unwrap();

    if let Some(code) = current_code {
        let snapshot: Vec<&str> = code.trim().lines().take(CODE_SNAPSHOT_LINES).collect();
        writeln!(out).unwrap();
        writeln!(out, "## STUDENT'S CURRENT CODE SNAPSHOT").unwrap();
        writeln!(out, "```").unwrap();
        writeln!(out, "{}", snapshot.join("\n")).unwrap();
        writeln!(out, "```").unwrap();
        writeln!(
            out,
            "(calibrate the hint to what they've already written; don't restate what is already correct)"
        )
        .unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "## PREVIOUS HINTS (DO NOT REPEAT OR PARAPHRASE ANY OF THESE)").unwrap();
    writeln!(out, "{hints_block}").unwrap();
    writeln!(out).unwrap();
    write!(out, "Generate ONE new Socratic hint that progresses beyond the above.").unwrap();

    out
}
