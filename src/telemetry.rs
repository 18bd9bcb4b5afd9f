//! Client telemetry events and sinks.
//!
//! Events describe how list views are kept fresh: how long fetches take and
//! how often a late response is thrown away. Nothing is transmitted; the
//! only real sink writes JSON lines to stderr when `--telemetry` is set.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by litshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A list view applied a fetched data set.
    ViewFetched {
        /// View name (e.g. `books`).
        view: String,
        /// Number of items returned by the API before client-side filtering.
        item_count: usize,
        /// Time between issuing the request and applying it.
        latency_ms: u64,
    },
    /// A response arrived for parameters that are no longer current.
    StaleResponseDiscarded {
        /// View name.
        view: String,
        /// Identifier of the superseded request.
        request_id: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Drains and returns the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingTelemetrySink, TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingTelemetrySink::default();
        sink.record(TelemetryEvent::StaleResponseDiscarded {
            view: "books".to_owned(),
            request_id: 3,
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::StaleResponseDiscarded {
                view: "books".to_owned(),
                request_id: 3,
            }]
        );
        assert!(sink.take().is_empty());
    }

    #[test]
    fn events_serialise_with_snake_case_tag() {
        let event = TelemetryEvent::ViewFetched {
            view: "transactions".to_owned(),
            item_count: 12,
            latency_ms: 40,
        };
        let json = serde_json::to_value(&event).expect("event should serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "view_fetched",
                "view": "transactions",
                "item_count": 12,
                "latency_ms": 40
            })
        );
    }
}
