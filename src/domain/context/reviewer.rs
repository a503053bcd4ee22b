//! Reviewer context: the richest personalization block in the system.

use std::fmt::Write;

use super::{list_or, set_or, text_or};
use crate::domain::problem::Problem;
use crate::domain::profile::Profile;

/// Renders the review-agent prompt for one submission.
///
/// Includes the top 8 skill scores, a derived learning-velocity bucket, the
/// full gap/strength/mistake lists, the target problem, and the submitted
/// code fenced with its language tag.
pub fn render_reviewer_context(
    problem: &Problem,
    code: &str,
    profile: &Profile,
    language: &str,
) -> String {
    let top_skills = profile.top_skills(8);
    let top_skills_line = if top_skills.is_empty() {
        "None yet".to_string()
    } else {
        top_skills
            .iter()
            .map(|(name, score)| format!("{name}: {score:.2}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    writeln!(out, "## PERSONALISATION PROFILE").unwrap();
    writeln!(out, "Experience Level:    {}", profile.experience_level).unwrap();
    writeln!(
        out,
        "Learning Velocity:   {} ({} submissions so far)",
        profile.learning_velocity(),
        profile.submissions_count
    )
    .unwrap();
    writeln!(out, "Preferred Style:     {}", profile.preferred_style).unwrap();
    writeln!(
        out,
        "Background:          {}",
        text_or(&profile.background, "Not specified")
    )
    .unwrap();
    writeln!(
        out,
        "Goal:                {}",
        text_or(&profile.goal, "General DSA mastery")
    )
    .unwrap();
    writeln!(out, "Prior Thinking Style: {}", profile.thinking_style).unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "Known Strengths:     {}",
        list_or(&profile.strengths, "None identified yet")
    )
    .unwrap();
    writeln!(
        out,
        "Known Gaps:          {}",
        list_or(&profile.gaps, "None identified yet")
    )
    .unwrap();
    writeln!(
        out,
        "Recurring Mistakes:  {}",
        list_or(&profile.mistake_patterns, "None identified yet")
    )
    .unwrap();
    writeln!(
        out,
        "Recent Weaknesses:   {}",
        list_or(&profile.recent_weaknesses, "None identified yet")
    )
    .unwrap();
    writeln!(
        out,
        "Known Concepts:      {}",
        set_or(&profile.known_concepts, "Not specified")
    )
    .unwrap();
    writeln!(out, "Top Skill Scores:    {top_skills_line}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## PROBLEM").unwrap();
    writeln!(out, "Title:       {}", problem.title).unwrap();
    writeln!(out, "Description: {}", problem.description).unwrap();
    writeln!(out, "Difficulty:  {}", problem.difficulty).unwrap();
    writeln!(out, "Concepts:    {}", list_or(&problem.concept_ids, "None listed")).unwrap();
    writeln!(
        out,
        "Constraints: {}",
        if problem.constraints.is_empty() {
            "None listed".to_string()
        } else {
            problem.constraints.join("; ")
        }
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## STUDENT SUBMISSION ({language})").unwrap();
    writeln!(out, "```{language}").unwrap();
    writeln!(out, "{code}").unwrap();
    writeln!(out, "```").unwrap();
    writeln!(out).unwrap();
    write!(
        out,
        "Perform your full internal analysis and return ONLY the JSON review object."
    )
    .unwrap();

    out
}
