//! Distance check command.

use super::output::JsonDistance;
use super::{resolve_config, CliError, OutputFormat};
use capquiz::{rounded_distance_km, GeoPoint, Outcome};

/// Execute the distance command.
///
/// # Errors
///
/// Returns an error if the threshold is invalid or JSON output fails.
pub(crate) fn execute(
    from: GeoPoint,
    to: GeoPoint,
    threshold: Option<u32>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = resolve_config(None, None, threshold)?;
    let distance_km = rounded_distance_km(Some(from), Some(to));
    let outcome = Outcome::classify(distance_km, config.correct_threshold_km);

    match format {
        OutputFormat::Text => {
            println!("From:     {from}");
            println!("To:       {to}");
            println!("Distance: {distance_km} km");
            match outcome {
                Outcome::Correct => println!(
                    "Verdict:  correct (under {} km)",
                    config.correct_threshold_km
                ),
                Outcome::Missed => println!(
                    "Verdict:  missed (threshold {} km)",
                    config.correct_threshold_km
                ),
            }
        }
        OutputFormat::Json => {
            let result = JsonDistance {
                from,
                to,
                distance_km,
                threshold_km: config.correct_threshold_km,
                outcome,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
