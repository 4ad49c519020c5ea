use crate::error::Error;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Spells a header name the conventional way: `content-type` becomes `Content-Type`.
///
/// Names holding anything other than token characters are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return String::from(name);
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let c = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            c
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Groups the values of a header map by canonical name, keeping the order names were first seen.
pub fn extract_headers(header_map: &HeaderMap) -> IndexMap<String, Vec<String>> {
    let mut headers: IndexMap<String, Vec<String>> = IndexMap::new();

    // opaque values are decoded lossily rather than dropped
    for (key, value) in header_map {
        headers
            .entry(canonical_header_name(key.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    headers
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a str, &'a str)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}
