pub mod stdin;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a typed input from `--input <file>` or, failing that, piped stdin.
/// Returns `None` when neither source is present.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return from_file(Path::new(path)).map(Some);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}

/// Parse a JSON file. Relative paths resolve against the working directory
/// through the OS; directories and missing files are reported by name.
fn from_file<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    if !path.is_file() {
        let kind = if path.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{kind}: {}", path.display()).into());
    }

    let contents = fs::read_to_string(path)?;
    let parsed = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid JSON in {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "loaded input file");
    Ok(parsed)
}
