use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::audiences::AudienceFields;
use crate::ConfigError;

/// Contents of the audiences seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub audiences: Vec<AudienceFields>,
}

/// Load and validate the audience seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed_file(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seed_file: SeedFile = serde_yaml::from_str(&content)?;

    validate_seed(&seed_file)?;

    Ok(seed_file)
}

fn validate_seed(seed_file: &SeedFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for (index, audience) in seed_file.audiences.iter().enumerate() {
        audience.validate().map_err(|e| {
            ConfigError::Validation(format!("audience #{} ('{}'): {e}", index + 1, audience.name))
        })?;

        let lower_name = audience.name.trim().to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate audience name: '{}'",
                audience.name
            )));
        }
    }

    Ok(())
}
