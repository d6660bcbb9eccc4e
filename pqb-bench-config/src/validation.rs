//! Custom validation functions for configuration.

use std::borrow::Cow;

use validator::ValidationError;

use crate::ManifestConfig;

/// Node counts must be non-empty and every count at least one node.
pub fn validate_node_counts(counts: &[usize]) -> Result<(), ValidationError> {
    if counts.is_empty() {
        return Err(ValidationError::new("empty_node_counts"));
    }
    if counts.contains(&0) {
        return Err(ValidationError::new("zero_node_count")
            .with_message(Cow::Borrowed("node counts must be at least 1")));
    }
    if let Some((i, count)) = counts
        .iter()
        .enumerate()
        .find(|(i, count)| counts[..*i].contains(count))
    {
        return Err(ValidationError::new("duplicate_node_count").with_message(Cow::Owned(
            format!("node count {} is listed again at position {}", count, i),
        )));
    }
    Ok(())
}

/// Resource budgets must be finite and positive.
pub fn validate_budget(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_budget")
            .with_message(Cow::Owned(format!("{} is not a positive amount", value))))
    }
}

/// The gateway has to be routable inside the declared subnet.
pub fn validate_gateway_in_subnet(manifest: &ManifestConfig) -> Result<(), ValidationError> {
    if manifest.subnet.contains(manifest.gateway) {
        Ok(())
    } else {
        Err(ValidationError::new("gateway_outside_subnet").with_message(Cow::Owned(format!(
            "gateway {} is not inside {}",
            manifest.gateway, manifest.subnet
        ))))
    }
}

/// Log level must be one `tracing` understands.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error", "off"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
