use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON document from stdin when it is piped.
/// Interactive terminals and empty pipes yield `None`.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "read JSON from stdin");
    Ok(Some(serde_json::from_str(trimmed)?))
}
