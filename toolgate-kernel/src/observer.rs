//! Hooks notified after every dispatch.

use std::sync::Arc;
use std::time::Duration;

use toolgate_primitives::CallId;
use tracing::{debug, warn};

use crate::error::DispatchError;

/// Summary of one finished dispatch.
#[derive(Debug, Clone, Copy)]
pub struct DispatchReport<'a> {
    /// Identifier of the call.
    pub call_id: CallId,
    /// Tool name requested by the caller.
    pub tool: &'a str,
    /// Time from the start of dispatch to the outcome.
    pub elapsed: Duration,
    /// Failure, if the call did not succeed.
    pub error: Option<&'a DispatchError>,
}

/// Observer invoked whenever a dispatch finishes.
pub trait DispatchObserver: Send + Sync {
    /// Records the outcome of a call.
    fn on_dispatch(&self, report: &DispatchReport<'_>);
}

/// Observer that emits outcomes to the tracing system.
#[derive(Debug, Default)]
pub struct TracingDispatchObserver;

impl DispatchObserver for TracingDispatchObserver {
    fn on_dispatch(&self, report: &DispatchReport<'_>) {
        let elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX);
        match report.error {
            None => {
                debug!(call_id = %report.call_id, tool = report.tool, elapsed_ms, "tool call completed");
            }
            Some(err @ DispatchError::Handler { source, .. }) => {
                warn!(
                    call_id = %report.call_id,
                    tool = report.tool,
                    elapsed_ms,
                    upstream_status = ?source.upstream_status(),
                    error = %err,
                    "tool handler failed"
                );
            }
            Some(err) => {
                warn!(
                    call_id = %report.call_id,
                    tool = report.tool,
                    kind = err.kind(),
                    error = %err,
                    "tool call rejected"
                );
            }
        }
    }
}

/// Observer that forwards reports to a collection of observers.
#[derive(Default)]
pub struct CompositeDispatchObserver {
    observers: Vec<Arc<dyn DispatchObserver>>,
}

impl CompositeDispatchObserver {
    /// Creates a composite from the supplied observers.
    #[must_use]
    pub fn new<I>(observers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn DispatchObserver>>,
    {
        Self {
            observers: observers.into_iter().collect(),
        }
    }

    /// Adds an observer.
    pub fn push(&mut self, observer: Arc<dyn DispatchObserver>) {
        self.observers.push(observer);
    }
}

impl DispatchObserver for CompositeDispatchObserver {
    fn on_dispatch(&self, report: &DispatchReport<'_>) {
        for observer in &self.observers {
            observer.on_dispatch(report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        tools: Mutex<Vec<String>>,
    }

    impl DispatchObserver for Recorder {
        fn on_dispatch(&self, report: &DispatchReport<'_>) {
            self.tools.lock().unwrap().push(report.tool.to_owned());
        }
    }

    #[test]
    fn composite_forwards_to_every_observer() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut composite = CompositeDispatchObserver::new([first.clone() as Arc<dyn DispatchObserver>]);
        composite.push(second.clone());

        let err = DispatchError::UnknownTool {
            name: "missing".into(),
        };
        composite.on_dispatch(&DispatchReport {
            call_id: CallId::random(),
            tool: "get_me",
            elapsed: Duration::from_millis(3),
            error: None,
        });
        composite.on_dispatch(&DispatchReport {
            call_id: CallId::random(),
            tool: "missing",
            elapsed: Duration::ZERO,
            error: Some(&err),
        });

        assert_eq!(*first.tools.lock().unwrap(), ["get_me", "missing"]);
        assert_eq!(*second.tools.lock().unwrap(), ["get_me", "missing"]);
    }
}
