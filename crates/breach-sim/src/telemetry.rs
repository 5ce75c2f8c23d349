//! Telemetry hub and sinks.
//!
//! The engine reports through a [`Telemetry`] hub which stamps each event
//! with session context and fans it out to every registered sink. A sink
//! failure is logged and dropped; it never reaches gameplay code.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use breach_core::constants::{BREADCRUMB_TRAIL_LEN, MAX_BREADCRUMBS};
use breach_core::enums::TelemetryLevel;
use breach_core::error::SinkError;
use breach_core::events::{TelemetryEvent, TelemetryRecord};
use breach_core::types::SimTime;

/// Destination for telemetry records.
pub trait TelemetrySink {
    /// Short name used when reporting this sink's own failures.
    fn name(&self) -> &'static str;

    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), SinkError>;
}

/// Routes records to the `log` facade at the matching level.
#[derive(Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        let fields = serde_json::to_string(&record.event)
            .map_err(|err| SinkError::new(self.name(), err.to_string()))?;
        let level = match record.level {
            TelemetryLevel::Debug => log::Level::Debug,
            TelemetryLevel::Info => log::Level::Info,
            TelemetryLevel::Warn => log::Level::Warn,
            TelemetryLevel::Error => log::Level::Error,
        };
        log::log!(
            target: "breach::telemetry",
            level,
            "[{}] tick={} session={} level={} {} {}",
            record.module,
            record.tick,
            record.session_id,
            record.level_name,
            record.event.name(),
            fields
        );
        Ok(())
    }
}

/// Keeps every record in a shared buffer.
///
/// Clone the sink before registering it to keep a handle on the buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<TelemetryRecord>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records.borrow().clone()
    }

    /// Recorded events, without their context.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.event.clone())
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), SinkError> {
        self.records
            .try_borrow_mut()
            .map_err(|err| SinkError::new(self.name(), err.to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Session-scoped telemetry fan-out.
pub struct Telemetry {
    session_id: String,
    level_name: String,
    breadcrumbs: VecDeque<String>,
    sinks: Vec<Box<dyn TelemetrySink>>,
    failures: u64,
}

impl Telemetry {
    pub fn new(session_id: impl Into<String>, level_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            level_name: level_name.into(),
            breadcrumbs: VecDeque::with_capacity(MAX_BREADCRUMBS),
            sinks: Vec::new(),
            failures: 0,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn TelemetrySink>) {
        self.sinks.push(sink);
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Sink deliveries that failed so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Remember a notable moment for the context of later records.
    pub fn breadcrumb(&mut self, crumb: impl Into<String>) {
        if self.breadcrumbs.len() == MAX_BREADCRUMBS {
            self.breadcrumbs.pop_front();
        }
        self.breadcrumbs.push_back(crumb.into());
    }

    /// Stamp `event` with session context and deliver it to every sink.
    pub fn emit(
        &mut self,
        level: TelemetryLevel,
        module: &'static str,
        time: &SimTime,
        event: TelemetryEvent,
    ) {
        let skip = self.breadcrumbs.len().saturating_sub(BREADCRUMB_TRAIL_LEN);
        let record = TelemetryRecord {
            level,
            module,
            tick: time.tick,
            elapsed_secs: time.elapsed_secs,
            session_id: self.session_id.clone(),
            level_name: self.level_name.clone(),
            breadcrumbs: self.breadcrumbs.iter().skip(skip).cloned().collect(),
            event,
        };

        for sink in &mut self.sinks {
            if let Err(err) = sink.emit(&record) {
                self.failures += 1;
                log::warn!("dropping telemetry `{}`: {err}", record.event.name());
            }
        }
    }
}

/// Session id derived from a random draw, so seeded runs are reproducible.
pub fn session_id_from(bits: u64) -> String {
    format!("session-{bits:016x}")
}
