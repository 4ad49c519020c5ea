use crate::{
    data::ResponseCapture,
    sniffer::{self, BodyFormat, SniffedBody, DEFAULT_MATCH_PATTERN},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Expectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<MeasureStatusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<MeasureHeaders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MeasureBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeasureStatusCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_equal_to: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeasureHeaders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_total: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MeasureHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeasureHeader {
    pub name: String,
    pub is_equal_to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MeasureBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_format: Option<BodyFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_equal_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_with: Option<String>,
}

impl From<SniffedBody> for MeasureBody {
    fn from(sniffed: SniffedBody) -> Self {
        match sniffed {
            SniffedBody::Structured { format, canonical } => MeasureBody {
                has_format: Some(format),
                includes: Some(canonical),
                ..MeasureBody::default()
            },
            SniffedBody::Flat(text) => MeasureBody {
                has_format: Some(BodyFormat::Flat),
                is_equal_to: Some(text),
                match_with: Some(String::from(DEFAULT_MATCH_PATTERN)),
                ..MeasureBody::default()
            },
        }
    }
}

/// Builds the assertions a captured response satisfies.
///
/// `has-total` counts header names, while only single-valued headers are itemized:
/// a multi-valued header has no single value to compare with.
pub fn generate_expectation(response: &ResponseCapture) -> Expectation {
    let status_code = Some(MeasureStatusCode {
        is_equal_to: Some(response.status_code()),
    });

    let headers = if response.headers().is_empty() {
        None
    } else {
        let items = response
            .headers()
            .iter()
            .filter_map(|(name, values)| match values.as_slice() {
                [value] => Some(MeasureHeader {
                    name: name.clone(),
                    is_equal_to: value.clone(),
                }),
                _ => None,
            })
            .collect();

        Some(MeasureHeaders {
            has_total: Some(response.headers().len()),
            items,
        })
    };

    let body = Some(MeasureBody::from(sniffer::sniff(response.body())));

    Expectation {
        status_code,
        headers,
        body,
    }
}
