use crate::{
    configuration::InvokerConfiguration,
    data::{RequestDescriptor, ResponseCapture},
    error::Result,
    http_client::{HttpClient, ReqwestHttpClient},
    interceptor::{self, Interceptor},
    request_builder,
};
use tracing::{debug, warn};

/// Sends one request per call and lets the interceptors observe it.
#[derive(Debug)]
pub struct Invoker {
    configuration: InvokerConfiguration,
    http_client: Box<dyn HttpClient>,
}

impl Invoker {
    pub fn new(configuration: InvokerConfiguration) -> Self {
        Self::with_http_client(configuration, Box::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(
        configuration: InvokerConfiguration,
        http_client: Box<dyn HttpClient>,
    ) -> Self {
        Self {
            configuration,
            http_client,
        }
    }

    pub fn configuration(&self) -> &InvokerConfiguration {
        &self.configuration
    }

    /// Builds the request, sends it, and dispatches it to `interceptors` in order.
    ///
    /// Nothing is sent when the request is malformed. A transport failure is
    /// reported to the interceptors' error sinks and returned; no snapshot is
    /// generated in that case. A failing interceptor sink never fails the call.
    pub fn invoke(
        &self,
        descriptor: &RequestDescriptor,
        interceptors: &mut [&mut dyn Interceptor],
    ) -> Result<ResponseCapture> {
        let request = request_builder::build_request(descriptor, &self.configuration)?;
        debug!(method = %request.method(), url = %request.url(), "invoking");

        interceptor::dispatch_pre_call(interceptors, &request, self.configuration.user_agent());

        let response = match self.http_client.execute(&request, &self.configuration) {
            Ok(response) => response,
            Err(error) => {
                warn!(url = %request.url(), %error, "request failed");
                interceptor::dispatch_failure(interceptors, &error);
                return Err(error);
            }
        };
        debug!(status = response.status_code(), "response captured");

        interceptor::dispatch_post_call(
            interceptors,
            descriptor,
            &response,
            self.configuration.version(),
        );

        Ok(response)
    }
}
