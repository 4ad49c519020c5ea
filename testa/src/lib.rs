mod configuration;
mod data;
mod error;
mod expectation;
mod http_client;
mod interceptor;
mod invoker;
mod labels;
mod render;
mod request_builder;
mod snapshot;
mod sniffer;
mod util;

pub use configuration::{
    InvokerConfiguration, DEFAULT_PATH, DEFAULT_PDP, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use data::{HttpHeader, RequestDescriptor, ResponseCapture};
pub use error::{Error, Result};
pub use expectation::{
    generate_expectation, Expectation, MeasureBody, MeasureHeader, MeasureHeaders,
    MeasureStatusCode,
};
pub use http_client::{HttpClient, ReqwestHttpClient};
pub use interceptor::{
    ConsoleExplainer, ExplainAndSnapshot, ExplanationWriter, Interceptor, SnapshotCollector,
    SnapshotGenerator,
};
pub use invoker::Invoker;
pub use labels::{standardize_tag_label, standardize_version};
pub use render::{render_request, render_response};
pub use request_builder::{build_request, url_join, PreparedRequest};
pub use snapshot::{
    render_snapshot, synthesize_test_case, write_snapshot, GeneratedSnapshot, TestCase,
    GENERATED_TITLE,
};
pub use sniffer::{sniff, BodyFormat, SniffedBody, DEFAULT_MATCH_PATTERN, SNIFFING_ORDER};
