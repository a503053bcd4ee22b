//! Tutor context: Socratic dialogue prompt with conversation continuity.

use std::fmt::Write;

use super::{list_or, set_or, text_or, ChatTurn};
use crate::domain::problem::Problem;
use crate::domain::profile::Profile;

/// How many trailing conversation turns (3 exchanges) are included.
const HISTORY_WINDOW: usize = 6;

/// Renders the tutor-agent prompt for one student question.
///
/// Adds a session-depth bucket derived from the hint count and the last three
/// exchanges of conversation history, role-tagged and in chronological order.
pub fn render_tutor_context(
    question: &str,
    problem: &Problem,
    profile: &Profile,
    history: &[ChatTurn],
) -> String {
    let window_start = history.len().saturating_sub(HISTORY_WINDOW);
    let history_block = if history.is_empty() {
        "None yet.".to_string()
    } else {
        history[window_start..]
            .iter()
            .map(|turn| format!("  [{}]: {}", turn.role.tag(), turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut out = String::new();
    writeln!(out, "## PERSONALISATION PROFILE").unwrap();
    writeln!(out, "Experience Level:   {}", profile.experience_level).unwrap();
    writeln!(out, "Preferred Style:    {}", profile.preferred_style).unwrap();
    writeln!(out, "Thinking Style:     {}", profile.thinking_style).unwrap();
    writeln!(
        out,
        "Background:         {}",
        text_or(&profile.background, "Not specified")
    )
    .unwrap();
    writeln!(
        out,
        "Goal:               {}",
        text_or(&profile.goal, "General DSA mastery")
    )
    .unwrap();
    writeln!(out, "Learning Velocity:  {}", profile.learning_velocity()).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Known Strengths:    {}", list_or(&profile.strengths, "None yet")).unwrap();
    writeln!(out, "Known Gaps:         {}", list_or(&profile.gaps, "None yet")).unwrap();
    writeln!(
        out,
        "Mistake Patterns:   {}",
        list_or(&profile.mistake_patterns, "None yet")
    )
    .unwrap();
    writeln!(
        out,
        "Recent Weaknesses:  {}",
        list_or(&profile.recent_weaknesses, "None yet")
    )
    .unwrap();
    writeln!(
        out,
        "Known Concepts:     {}",
        set_or(&profile.known_concepts, "Not specified")
    )
    .unwrap();
    writeln!(
        out,
        "Session Depth:      {} (hints given this problem: {})",
        profile.session_depth(),
        profile.recent_hints.len()
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## PROBLEM CONTEXT").unwrap();
    writeln!(out, "Title:       {}", problem.title).unwrap();
    writeln!(out, "Description: {}", problem.description).unwrap();
    writeln!(out, "Concepts:    {}", list_or(&problem.concept_ids, "None listed")).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## CONVERSATION HISTORY (last exchanges)").unwrap();
    writeln!(out, "{history_block}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## STUDENT'S CURRENT QUESTION").unwrap();
    writeln!(out, "{question}").unwrap();
    writeln!(out).unwrap();
    write!(
        out,
        "Respond as a Socratic tutor. Guide, never answer. End with exactly ONE question."
    )
    .unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProblemId, Timestamp, UserId};

    fn test_profile() -> Profile {
        Profile::empty(
            UserId::new("student-1").unwrap(),
            Timestamp::from_unix_secs(1_704_326_400),
        )
    }

    fn test_problem() -> Problem {
        Problem::new(
            ProblemId::new("max-subarray").unwrap(),
            "Maximum Subarray",
            "Find the contiguous subarray with the largest sum.",
            2,
            vec!["Arrays".to_string(), "Dynamic Programming".to_string()],
        )
    }

    #[test]
    fn identical_inputs_render_identically() {
        let profile = test_profile();
        let problem = test_problem();
        let history = vec![ChatTurn::student("Where do I start?")];

        let a = render_tutor_context("Why a running sum?", &problem, &profile, &history);
        let b = render_tutor_context("Why a running sum?", &problem, &profile, &history);
        assert_eq!(a, b);
    }

    #[test]
    fn history_limited_to_last_six_turns_chronological() {
        let profile = test_profile();
        let problem = test_problem();
        let history: Vec<ChatTurn> = (0..9)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::student(format!("q{i}"))
                } else {
                    ChatTurn::tutor(format!("a{i}"))
                }
            })
            .collect();

        let context = render_tutor_context("next?", &problem, &profile, &history);

        assert!(!context.contains("[STUDENT]: q2"));
        assert!(context.contains("[TUTOR]: a3"));
        assert!(context.contains("[STUDENT]: q8"));
        // Chronological: a3 appears before q8
        assert!(context.find("a3").unwrap() < context.find("q8").unwrap());
    }

    #[test]
    fn empty_history_renders_placeholder() {
        let context = render_tutor_context("help", &test_problem(), &test_profile(), &[]);
        assert!(context.contains("## CONVERSATION HISTORY (last exchanges)\nNone yet."));
    }

    #[test]
    fn session_depth_reflects_hint_count() {
        let mut profile = test_profile();
        profile.recent_hints = vec!["h1".to_string(), "h2".to_string(), "h3".to_string()];

        let context = render_tutor_context("help", &test_problem(), &profile, &[]);
        assert!(context.contains("Session Depth:      mid (hints given this problem: 3)"));
    }

    #[test]
    fn ends_with_single_question_instruction() {
        let context = render_tutor_context("help", &test_problem(), &test_profile(), &[]);
        assert!(context.ends_with("End with exactly ONE question."));
    }
}
