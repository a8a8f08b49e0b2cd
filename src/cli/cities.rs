//! Dataset listing and validation command.

use super::output::format_city_list_text;
use super::{CliError, OutputFormat};
use capquiz::CityList;
use std::path::PathBuf;

/// Execute the cities command.
///
/// Loading the list runs every dataset check, so a successful listing
/// doubles as validation of a custom file.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or is invalid.
pub(crate) fn execute(file: Option<PathBuf>, format: OutputFormat) -> Result<(), CliError> {
    let cities = match &file {
        Some(path) => CityList::load(path)
            .map_err(|e| CliError::new(format!("Invalid dataset {}: {e}", path.display())))?,
        None => CityList::bundled()?,
    };

    match format {
        OutputFormat::Text => print!("{}", format_city_list_text(&cities)),
        OutputFormat::Json => println!("{}", cities.to_json()?),
    }

    Ok(())
}
