use crate::{
    configuration::InvokerConfiguration, data::ResponseCapture, error::Error,
    request_builder::PreparedRequest, util,
};
use reqwest::blocking::Client;
use std::fmt::Debug;
use tracing::debug;

pub trait HttpClient: Debug {
    /// Performs exactly one call and drains the whole response body.
    fn execute(
        &self,
        request: &PreparedRequest,
        configuration: &InvokerConfiguration,
    ) -> Result<ResponseCapture, Error>;
}

/// Transport backed by a blocking reqwest client created for every call.
#[derive(Debug)]
pub struct ReqwestHttpClient {}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {}
    }

    fn build_client(configuration: &InvokerConfiguration) -> Result<Client, Error> {
        Ok(Client::builder()
            .timeout(configuration.timeout())
            .user_agent(configuration.user_agent())
            .pool_max_idle_per_host(0)
            .build()?)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &PreparedRequest,
        configuration: &InvokerConfiguration,
    ) -> Result<ResponseCapture, Error> {
        let client = Self::build_client(configuration)?;

        let mut request_builder = client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        if let Some(body) = request.body() {
            request_builder = request_builder.body(String::from(body));
        }

        let response = request_builder.send()?;

        let version = format!("{:?}", response.version());
        let status = response.status();
        let status_line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        let headers = util::extract_headers(response.headers());

        // consumes the response, so the connection is released even when draining fails
        let body = response.bytes()?;

        debug!(
            status = status.as_u16(),
            headers = headers.len(),
            body_length = body.len(),
            "response drained"
        );

        Ok(ResponseCapture::new(
            version,
            status_line,
            status.as_u16(),
            headers,
            body.to_vec(),
        ))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}
