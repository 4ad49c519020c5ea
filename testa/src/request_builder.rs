use crate::{
    configuration::InvokerConfiguration,
    data::{non_empty, RequestDescriptor},
    error::{Error, Result},
    util,
};
use reqwest::{header::HeaderMap, Method, Url};
use tracing::trace;

/// A request ready to be sent: method and URL resolved, headers validated.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl PreparedRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Joins an endpoint root and a path with exactly one `/` between them.
pub fn url_join<S1: AsRef<str>, S2: AsRef<str>>(root: S1, path: S2) -> String {
    format!(
        "{}/{}",
        root.as_ref().trim_end_matches('/'),
        path.as_ref().trim_start_matches('/')
    )
}

pub fn resolve_url(
    descriptor: &RequestDescriptor,
    configuration: &InvokerConfiguration,
) -> Result<Url> {
    let url = match non_empty(&descriptor.url) {
        Some(url) => String::from(url),
        None => {
            let pdp = non_empty(&descriptor.pdp).unwrap_or_else(|| configuration.pdp());
            let path =
                non_empty(&descriptor.path).unwrap_or_else(|| configuration.default_path());
            url_join(pdp, path)
        }
    };

    let parsed = Url::parse(&url)
        .map_err(|e| Error::MalformedRequest(format!("cannot parse url [{}]: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::MalformedRequest(format!(
            "unsupported scheme [{}] in url [{}]",
            scheme, url
        ))),
    }
}

pub fn resolve_method(descriptor: &RequestDescriptor) -> Result<Method> {
    let method = non_empty(&descriptor.method).unwrap_or("GET");

    Method::from_bytes(method.as_bytes())
        .map_err(|e| Error::MalformedRequest(format!("invalid method [{}]: {}", method, e)))
}

pub fn build_request(
    descriptor: &RequestDescriptor,
    configuration: &InvokerConfiguration,
) -> Result<PreparedRequest> {
    let method = resolve_method(descriptor)?;
    let url = resolve_url(descriptor, configuration)?;

    let mut headers = HeaderMap::new();
    util::put_headers(
        &mut headers,
        descriptor
            .headers
            .iter()
            .filter(|header| !header.name.is_empty() && !header.value.is_empty())
            .map(|header| (header.name.as_str(), header.value.as_str())),
    )?;

    let body = non_empty(&descriptor.body).map(String::from);

    trace!(%method, %url, headers = headers.len(), has_body = body.is_some(), "request built");

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}
