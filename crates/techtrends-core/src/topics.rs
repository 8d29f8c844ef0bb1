use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A search topic: a human label and the query expression sent to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub label: String,
    pub query: String,
}

impl Topic {
    #[must_use]
    pub fn new(label: &str, query: &str) -> Self {
        Self {
            label: label.to_string(),
            query: query.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicsFile {
    pub topics: Vec<Topic>,
}

/// The built-in topic map, in collection order.
#[must_use]
pub fn default_topics() -> Vec<Topic> {
    vec![
        Topic::new("AI/ML", r#"AI OR "Artificial Intelligence" min_faves:100"#),
        Topic::new("Web Development", "WebDev min_faves:50"),
        Topic::new("Cloud Computing", "AWS OR Azure min_faves:50"),
        Topic::new("Cybersecurity", "Cybersecurity min_faves:50"),
    ]
}

/// Load and validate a topic map from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_topics(path: &Path) -> Result<Vec<Topic>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TopicsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_topics(&content)
}

/// Parse and validate a topic map from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::TopicsFileParse`] on malformed YAML and
/// [`ConfigError::Validation`] on empty or duplicate entries.
pub fn parse_topics(content: &str) -> Result<Vec<Topic>, ConfigError> {
    let file: TopicsFile = serde_yaml::from_str(content)?;
    validate_topics(&file.topics)?;
    Ok(file.topics)
}

fn validate_topics(topics: &[Topic]) -> Result<(), ConfigError> {
    if topics.is_empty() {
        return Err(ConfigError::Validation(
            "at least one topic is required".to_string(),
        ));
    }

    let mut seen_labels = HashSet::new();

    for topic in topics {
        if topic.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "topic label must be non-empty".to_string(),
            ));
        }

        if topic.query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "topic '{}' has an empty query",
                topic.label
            )));
        }

        if !seen_labels.insert(topic.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate topic label: '{}'",
                topic.label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "topics_test.rs"]
mod tests;
