//! Trend-analysis context for the background summarizer.

use std::fmt::Write;

use crate::domain::profile::Profile;
use crate::domain::review::Review;

/// Renders the summarizer prompt over the most recent reviews (newest first).
///
/// Each review contributes its problem title, strengths, concept gaps,
/// weaknesses, and proposed mistake patterns.
pub fn render_trend_context(profile: &Profile, reviews: &[Review]) -> String {
    let mut out = String::new();
    writeln!(out, "## Student Profile").unwrap();
    writeln!(out, "Level: {}", profile.experience_level).unwrap();
    writeln!(
        out,
        "Current Skills: {}",
        if profile.skills.is_empty() {
            "none".to_string()
        } else {
            profile
                .skills
                .iter()
                .map(|(name, score)| format!("{name}={score:.2}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    )
    .unwrap();
    writeln!(
        out,
        "Current Gaps: {}",
        if profile.gaps.is_empty() {
            "none".to_string()
        } else {
            profile.gaps.join(", ")
        }
    )
    .unwrap();
    writeln!(out, "Total Submissions: {}", profile.submissions_count).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "## Last Reviews").unwrap();

    for (i, review) in reviews.iter().enumerate() {
        writeln!(
            out,
            "=== Review {} (Problem: {}) ===",
            i + 1,
            review.problem_title
        )
        .unwrap();
        writeln!(out, "Strengths: {}", review.analysis.strengths.join(", ")).unwrap();
        writeln!(out, "Gaps: {}", review.analysis.concept_gaps.join(", ")).unwrap();
        writeln!(out, "Weaknesses: {}", review.analysis.weaknesses.join(", ")).unwrap();
        writeln!(
            out,
            "Mistake Patterns: {}",
            review.analysis.profile_updates.mistake_patterns.join(", ")
        )
        .unwrap();
        writeln!(out).unwrap();
    }

    write!(out, "Generate the learning insights JSON.").unwrap();
    out
}
