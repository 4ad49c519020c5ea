use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    Json,
    Yaml,
    Flat,
}

/// Pattern paired with the exact value of a flat body.
pub const DEFAULT_MATCH_PATTERN: &str = ".*";

/// Returns the canonical text of the body when it parses as the classifier's format.
pub type Classifier = fn(&[u8]) -> Option<String>;

/// Structured formats tried in order; the first one that parses wins.
pub const SNIFFING_ORDER: [(BodyFormat, Classifier); 2] = [
    (BodyFormat::Json, canonical_json as Classifier),
    (BodyFormat::Yaml, canonical_yaml as Classifier),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniffedBody {
    Structured { format: BodyFormat, canonical: String },
    Flat(String),
}

impl SniffedBody {
    pub fn format(&self) -> BodyFormat {
        match self {
            SniffedBody::Structured { format, .. } => *format,
            SniffedBody::Flat(_) => BodyFormat::Flat,
        }
    }
}

/// Re-serializes a JSON object with two-space indentation.
pub fn canonical_json(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(object @ serde_json::Value::Object(_)) => Some(
            serde_json::to_string_pretty(&object)
                .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()),
        ),
        _ => None,
    }
}

/// Re-serializes a YAML mapping.
pub fn canonical_yaml(body: &[u8]) -> Option<String> {
    match serde_yaml::from_slice::<serde_yaml::Value>(body) {
        Ok(mapping @ serde_yaml::Value::Mapping(_)) => Some(
            serde_yaml::to_string(&mapping)
                .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()),
        ),
        _ => None,
    }
}

pub fn sniff(body: &[u8]) -> SniffedBody {
    for (format, classifier) in SNIFFING_ORDER.iter() {
        if let Some(canonical) = classifier(body) {
            trace!(?format, "body format detected");
            return SniffedBody::Structured {
                format: *format,
                canonical,
            };
        }
    }

    trace!("body is flat");
    SniffedBody::Flat(String::from_utf8_lossy(body).into_owned())
}
