//! Observers attached to an invocation.
//!
//! An [`Interceptor`] exposes any subset of two capabilities: an [`ExplanationWriter`]
//! renders human readable transcripts, a [`SnapshotGenerator`] receives a generated
//! test case document. Capabilities are queried at every dispatch point, so an
//! interceptor exposing none of them is simply skipped.

use crate::{
    data::{RequestDescriptor, ResponseCapture},
    error::Error,
    render,
    request_builder::PreparedRequest,
    snapshot,
};
use std::io::{self, Stderr, Stdout, Write};
use tracing::{trace, warn};

pub trait ExplanationWriter {
    fn console_out(&mut self) -> Option<&mut dyn Write>;
    fn console_err(&mut self) -> Option<&mut dyn Write>;
}

pub trait SnapshotGenerator {
    fn target_writer(&mut self) -> Option<&mut dyn Write>;
}

pub trait Interceptor {
    fn explanation_writer(&mut self) -> Option<&mut dyn ExplanationWriter> {
        None
    }

    fn snapshot_generator(&mut self) -> Option<&mut dyn SnapshotGenerator> {
        None
    }
}

/// Renders the request and the response to `out`, failures to `err`.
#[derive(Debug)]
pub struct ConsoleExplainer<O, E> {
    out: Option<O>,
    err: Option<E>,
}

impl ConsoleExplainer<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleExplainer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self::with_sinks(Some(out), Some(err))
    }

    pub fn with_sinks(out: Option<O>, err: Option<E>) -> Self {
        Self { out, err }
    }

    pub fn out(&self) -> Option<&O> {
        self.out.as_ref()
    }

    pub fn err(&self) -> Option<&E> {
        self.err.as_ref()
    }

    pub fn into_sinks(self) -> (Option<O>, Option<E>) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> ExplanationWriter for ConsoleExplainer<O, E> {
    fn console_out(&mut self) -> Option<&mut dyn Write> {
        self.out.as_mut().map(|out| out as &mut dyn Write)
    }

    fn console_err(&mut self) -> Option<&mut dyn Write> {
        self.err.as_mut().map(|err| err as &mut dyn Write)
    }
}

impl<O: Write, E: Write> Interceptor for ConsoleExplainer<O, E> {
    fn explanation_writer(&mut self) -> Option<&mut dyn ExplanationWriter> {
        Some(self)
    }
}

/// Receives the generated test case document.
#[derive(Debug)]
pub struct SnapshotCollector<W> {
    target: Option<W>,
}

impl<W: Write> SnapshotCollector<W> {
    pub fn new(target: W) -> Self {
        Self::with_target(Some(target))
    }

    pub fn with_target(target: Option<W>) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Option<&W> {
        self.target.as_ref()
    }

    pub fn into_target(self) -> Option<W> {
        self.target
    }
}

impl<W: Write> SnapshotGenerator for SnapshotCollector<W> {
    fn target_writer(&mut self) -> Option<&mut dyn Write> {
        self.target.as_mut().map(|target| target as &mut dyn Write)
    }
}

impl<W: Write> Interceptor for SnapshotCollector<W> {
    fn snapshot_generator(&mut self) -> Option<&mut dyn SnapshotGenerator> {
        Some(self)
    }
}

/// Both capabilities in one interceptor.
#[derive(Debug)]
pub struct ExplainAndSnapshot<O, E, W> {
    pub explainer: ConsoleExplainer<O, E>,
    pub snapshot: SnapshotCollector<W>,
}

impl<O: Write, E: Write, W: Write> ExplainAndSnapshot<O, E, W> {
    pub fn new(explainer: ConsoleExplainer<O, E>, snapshot: SnapshotCollector<W>) -> Self {
        Self {
            explainer,
            snapshot,
        }
    }
}

impl<O: Write, E: Write, W: Write> Interceptor for ExplainAndSnapshot<O, E, W> {
    fn explanation_writer(&mut self) -> Option<&mut dyn ExplanationWriter> {
        Some(&mut self.explainer)
    }

    fn snapshot_generator(&mut self) -> Option<&mut dyn SnapshotGenerator> {
        Some(&mut self.snapshot)
    }
}

/// Writes `< error: ...` to the interceptor's error sink, if it has one.
fn report_failure(interceptor: &mut dyn Interceptor, error: &Error) {
    if let Some(explainer) = interceptor.explanation_writer() {
        if let Some(err) = explainer.console_err() {
            if let Err(e) = writeln!(err, "< error: {}", error) {
                warn!(error = %e, "cannot report failure to interceptor");
            }
        }
    }
}

/// Runs after the request is built and before it is sent.
///
/// A sink that fails is reported to its own interceptor and does not stop the others.
pub(crate) fn dispatch_pre_call(
    interceptors: &mut [&mut dyn Interceptor],
    request: &PreparedRequest,
    default_user_agent: &str,
) {
    for (index, interceptor) in interceptors.iter_mut().enumerate() {
        let rendered = match interceptor.explanation_writer() {
            Some(explainer) => match explainer.console_out() {
                Some(out) => {
                    trace!(index, "rendering request");
                    Some(render::render_request(out, request, default_user_agent))
                }
                None => None,
            },
            None => None,
        };

        if let Some(Err(e)) = rendered {
            warn!(index, error = %e, "cannot render request");
            report_failure(&mut **interceptor, &Error::from(e));
        }
    }
}

/// Runs once the response is fully captured.
///
/// Every interceptor gets its turn: render and snapshot failures are logged and
/// reported to that interceptor's error sink.
pub(crate) fn dispatch_post_call(
    interceptors: &mut [&mut dyn Interceptor],
    descriptor: &RequestDescriptor,
    response: &ResponseCapture,
    version: Option<&str>,
) {
    for (index, interceptor) in interceptors.iter_mut().enumerate() {
        let rendered = match interceptor.explanation_writer() {
            Some(explainer) => match explainer.console_out() {
                Some(out) => {
                    trace!(index, "rendering response");
                    Some(render::render_response(out, response))
                }
                None => None,
            },
            None => None,
        };
        if let Some(Err(e)) = rendered {
            warn!(index, error = %e, "cannot render response");
            report_failure(&mut **interceptor, &Error::from(e));
        }

        let written = match interceptor.snapshot_generator() {
            Some(generator) => match generator.target_writer() {
                Some(target) => {
                    trace!(index, "generating snapshot");
                    Some(snapshot::write_snapshot(target, version, descriptor, response))
                }
                None => None,
            },
            None => None,
        };
        if let Some(Err(e)) = written {
            warn!(index, error = %e, "cannot write snapshot");
            report_failure(&mut **interceptor, &e);
        }
    }
}

/// Reports a failed call to every error sink; the failure itself is returned by the caller.
pub(crate) fn dispatch_failure(interceptors: &mut [&mut dyn Interceptor], error: &Error) {
    for interceptor in interceptors.iter_mut() {
        report_failure(&mut **interceptor, error);
    }
}
