//! Plain-text output helpers.

use quiz_core::{Feedback, ProgressSummary};

use crate::store::HighScores;

/// Regional-indicator flag for a two-letter code, or the bracketed code otherwise.
pub fn flag_emoji(code: &str) -> String {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return format!("[{code}]");
    }
    code.chars()
        .map(|c| c.to_ascii_uppercase() as u32 - 'A' as u32 + 0x1F1E6)
        .filter_map(char::from_u32)
        .collect()
}

pub fn feedback_line(feedback: &Feedback) -> String {
    match &feedback.answer {
        Some(answer) => format!("{} {answer}", feedback.text),
        None => feedback.text.clone(),
    }
}

pub fn summary_lines(summary: &ProgressSummary, scores: &HighScores) -> Vec<String> {
    let mut lines = vec![
        format!("Flags:          {}", summary.total),
        format!("Mastered:       {}", summary.mastered),
        format!("Learning:       {}", summary.learning),
        format!("Needs practice: {}", summary.needs_practice),
        format!("Set aside:      {}", summary.leeches),
        format!("Longest chain:  {}", scores.longest_route_high_score),
    ];
    if let Some(best) = &summary.best_known {
        lines.push(format!("Best known:     {best}"));
    }
    if let Some(worst) = &summary.worst_known {
        lines.push(format!("Worst known:    {worst}"));
    }
    lines
}

/// The journey behind a chain: where it starts, how far it goes, and the
/// countries in order.
pub fn chain_summary_lines(route: &[String], distance_km: f64) -> Vec<String> {
    let start = route.first().map(String::as_str).unwrap_or("-");
    vec![
        format!("Starting country:  {start}"),
        format!("Countries visited: {}", route.len()),
        format!("Total distance:    {} km", distance_km.round() as u64),
        format!("Route:             {}", route.join(" \u{2192} ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quiz_core::FeedbackKind;

    #[test]
    fn flags_from_country_codes() {
        assert_eq!(flag_emoji("fr"), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(flag_emoji("GB"), "\u{1F1EC}\u{1F1E7}");
        assert_eq!(flag_emoji("GB-SCT"), "[GB-SCT]");
    }

    #[test]
    fn misses_reveal_the_answer() {
        let feedback = Feedback::new(FeedbackKind::Skipped, Some("Chad"));
        assert_eq!(feedback_line(&feedback), "Skipped. The answer was: Chad");
        let feedback = Feedback::new(FeedbackKind::Correct, Some("Chad"));
        assert_eq!(feedback_line(&feedback), "Correct!");
    }

    #[test]
    fn summary_skips_missing_extremes() {
        let lines = summary_lines(&ProgressSummary::default(), &HighScores::default());
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Flags:          0");
        assert_eq!(lines[5], "Longest chain:  0");
    }

    #[test]
    fn chain_summary_rounds_distance() {
        let route = ["Portugal", "Spain", "France"].map(String::from);
        let lines = chain_summary_lines(&route, 1234.6);
        assert_eq!(
            lines,
            vec![
                "Starting country:  Portugal",
                "Countries visited: 3",
                "Total distance:    1235 km",
                "Route:             Portugal \u{2192} Spain \u{2192} France",
            ]
        );
    }
}
