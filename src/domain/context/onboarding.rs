//! Onboarding context: numbered Q/A pairs for initial profile inference.

use std::fmt::Write;

/// Renders the onboarding-inference prompt from question/answer pairs.
pub fn render_onboarding_context(answers: &[(String, String)]) -> String {
    let mut out = String::new();
    writeln!(out, "Student onboarding answers:").unwrap();
    for (i, (question, answer)) in answers.iter().enumerate() {
        writeln!(out, "Q{}: {question}", i + 1).unwrap();
        writeln!(out, "A{}: {answer}", i + 1).unwrap();
    }
    writeln!(out).unwrap();
    write!(out, "Analyze and return the JSON profile inference.").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_question_answer_pairs() {
        let answers = vec![
            ("Experience level?".to_string(), "Beginner".to_string()),
            ("Main goal?".to_string(), "Interviews".to_string()),
        ];
        let context = render_onboarding_context(&answers);

        assert!(context.contains("Q1: Experience level?\nA1: Beginner"));
        assert!(context.contains("Q2: Main goal?\nA2: Interviews"));
    }

    #[test]
    fn deterministic_render() {
        let answers = vec![("Q".to_string(), "A".to_string())];
        assert_eq!(
            render_onboarding_context(&answers),
            render_onboarding_context(&answers)
        );
    }
}
