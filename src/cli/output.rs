//! Output formatting utilities for CLI.

use super::CliError;
use capquiz::{CityList, GeoPoint, Outcome, SessionSummary};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON-serializable distance check.
#[derive(Debug, Serialize)]
pub(super) struct JsonDistance {
    /// First point.
    pub(super) from: GeoPoint,
    /// Second point.
    pub(super) to: GeoPoint,
    /// Rounded great-circle distance.
    pub(super) distance_km: u32,
    /// Threshold the classification used.
    pub(super) threshold_km: u32,
    /// Correct or missed.
    pub(super) outcome: Outcome,
}

/// Format a session summary as human-readable text.
pub(super) fn format_summary_text(summary: &SessionSummary) -> String {
    let mut output = String::new();

    let status = if summary.finished { "Game over" } else { "Game abandoned" };
    output.push_str(&format!("{status}\n"));
    output.push_str(&format!(
        "  Cities placed: {}/{}\n",
        summary.cities_completed, summary.cities_total
    ));
    output.push_str(&format!(
        "  Correct: {} ({:.0}%)\n",
        summary.correct,
        summary.accuracy() * 100.0
    ));
    output.push_str(&format!(
        "  Kilometers left: {} of {}\n",
        summary.budget_left_km, summary.initial_budget_km
    ));

    if let Some(worst) = summary.worst_round()
        && worst.outcome == Outcome::Missed
    {
        output.push_str(&format!(
            "  Worst miss: {} by {} km\n",
            worst.city, worst.distance_km
        ));
    }

    if !summary.rounds.is_empty() {
        output.push('\n');
        for (i, round) in summary.rounds.iter().enumerate() {
            let verdict = match round.outcome {
                Outcome::Correct => "correct".to_string(),
                Outcome::Missed => format!("missed by {} km", round.distance_km),
            };
            output.push_str(&format!(
                "  {:>3}. {:<24} {verdict:<20} {} km left\n",
                i + 1,
                round.city,
                round.budget_after_km
            ));
        }
    }

    output
}

/// Format a city list as a numbered table.
pub(super) fn format_city_list_text(cities: &CityList) -> String {
    let mut output = String::new();

    for (i, city) in cities.iter().enumerate() {
        let country = city.country.as_deref().unwrap_or("-");
        output.push_str(&format!(
            "{:>4}. {:<24} {:<28} {}\n",
            i + 1,
            city.name,
            country,
            city.location()
        ));
    }
    output.push_str(&format!("\n{} cities\n", cities.len()));

    output
}

/// Write a session summary as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub(super) fn write_summary(path: &Path, summary: &SessionSummary) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)
        .map_err(|e| CliError::new(format!("Failed to save summary to {}: {e}", path.display())))
}
