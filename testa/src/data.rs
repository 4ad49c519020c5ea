use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HttpHeader {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, value: S2) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declarative description of a single request, as it appears in a test case document.
///
/// Either `url` or an endpoint root (`pdp`, falling back to the configured one) joined with
/// `path` must resolve to an absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub pdp: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_pdp<S: Into<String>>(mut self, pdp: S) -> Self {
        self.pdp = Some(pdp.into());
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.push(HttpHeader::new(name, value));
        self
    }

    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Returns the value only when it is present and not empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_unset(value: &Option<String>) -> bool {
    non_empty(value).is_none()
}

/// A fully drained HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCapture {
    version: String,
    status: String,
    status_code: u16,
    headers: IndexMap<String, Vec<String>>,
    body: Vec<u8>,
}

impl ResponseCapture {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        version: S1,
        status: S2,
        status_code: u16,
        headers: IndexMap<String, Vec<String>>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            version: version.into(),
            status: status.into(),
            status_code,
            headers,
            body,
        }
    }

    /// Protocol version, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Status line without the protocol, e.g. `200 OK`.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &IndexMap<String, Vec<String>> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
