use crate::{
    data::{RequestDescriptor, ResponseCapture},
    error::{Error, Result},
    expectation::{self, Expectation},
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::warn;

pub const GENERATED_TITLE: &str = "<Generated testcase>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub request: RequestDescriptor,
    pub expectation: Expectation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSnapshot {
    #[serde(rename = "testcase-snapshot")]
    pub test_cases: Vec<TestCase>,
}

pub fn synthesize_test_case(
    version: Option<&str>,
    request: &RequestDescriptor,
    response: &ResponseCapture,
) -> TestCase {
    TestCase {
        title: String::from(GENERATED_TITLE),
        version: version.map(String::from),
        request: request.clone(),
        expectation: expectation::generate_expectation(response),
    }
}

pub fn render_snapshot(test_case: TestCase) -> Result<String> {
    let snapshot = GeneratedSnapshot {
        test_cases: vec![test_case],
    };

    serde_yaml::to_string(&snapshot).map_err(Error::SerializationError)
}

/// Writes the generated document for one call, preceded by an empty line.
///
/// A serialization failure is reported to `w` as well as returned.
pub fn write_snapshot<W: Write + ?Sized>(
    w: &mut W,
    version: Option<&str>,
    request: &RequestDescriptor,
    response: &ResponseCapture,
) -> Result<()> {
    write_document(
        w,
        render_snapshot(synthesize_test_case(version, request, response)),
    )
}

fn write_document<W: Write + ?Sized>(w: &mut W, rendered: Result<String>) -> Result<()> {
    match rendered {
        Ok(script) => {
            writeln!(w)?;
            writeln!(w, "{}", script)?;
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "cannot marshal generated testcase");
            if let Err(write_error) = writeln!(w, "Cannot marshal generated testcase, error: {}", e)
            {
                warn!(error = %write_error, "cannot report marshalling failure");
            }
            Err(e)
        }
    }
}
