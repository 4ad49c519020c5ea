//! Line oriented transcripts of a call: `>` for the request, `<` for the response.

use crate::{data::ResponseCapture, request_builder::PreparedRequest, util};
use reqwest::{header::USER_AGENT, Url};
use std::io::{self, Write};

const REQUEST_PROTOCOL: &str = "HTTP/1.1";

fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => String::from(url.path()),
    }
}

fn host(url: &Url) -> Option<String> {
    url.host_str().map(|host| match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => String::from(host),
    })
}

/// `default_user_agent` is shown when the request does not carry its own `User-Agent`.
pub fn render_request<W: Write + ?Sized>(
    w: &mut W,
    request: &PreparedRequest,
    default_user_agent: &str,
) -> io::Result<()> {
    let mut line = vec![String::from(">"), request.method().to_string()];
    let uri = request_uri(request.url());
    if !uri.is_empty() {
        line.push(uri);
    }
    line.push(String::from(REQUEST_PROTOCOL));
    writeln!(w, "{}", line.join(" "))?;

    if let Some(host) = host(request.url()) {
        writeln!(w, "> Host: {}", host)?;
    }

    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_else(|| String::from(default_user_agent));
    if !user_agent.is_empty() {
        writeln!(w, "> User-Agent: {}", user_agent)?;
    }

    for (key, value) in request.headers() {
        if key == USER_AGENT {
            continue;
        }
        writeln!(
            w,
            "> {}: {}",
            util::canonical_header_name(key.as_str()),
            String::from_utf8_lossy(value.as_bytes())
        )?;
    }

    writeln!(w, ">")
}

pub fn render_response<W: Write + ?Sized>(w: &mut W, response: &ResponseCapture) -> io::Result<()> {
    let mut line = vec![String::from("<")];
    if !response.version().is_empty() {
        line.push(String::from(response.version()));
    }
    if !response.status().is_empty() {
        line.push(String::from(response.status()));
    } else {
        line.push(response.status_code().to_string());
    }
    writeln!(w, "{}", line.join(" "))?;

    for (key, values) in response.headers() {
        for value in values {
            writeln!(w, "< {}: {}", key, value)?;
        }
    }
    writeln!(w, "<")?;

    writeln!(w, "{}", response.body_text())
}
