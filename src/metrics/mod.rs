use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated across stack operations.
#[derive(Debug, Default, Clone)]
pub struct StackMetrics {
    pushes: u64,
    pops: u64,
    tab_switches: u64,
    tab_clears: u64,
    snapshot_saves: u64,
    snapshot_restores: u64,
    dropped_entries: u64,
}

impl StackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_push(&mut self) {
        self.pushes = self.pushes.saturating_add(1);
    }

    pub fn record_pop(&mut self) {
        self.pops = self.pops.saturating_add(1);
    }

    pub fn record_tab_switch(&mut self) {
        self.tab_switches = self.tab_switches.saturating_add(1);
    }

    pub fn record_tab_clear(&mut self) {
        self.tab_clears = self.tab_clears.saturating_add(1);
    }

    pub fn record_save(&mut self) {
        self.snapshot_saves = self.snapshot_saves.saturating_add(1);
    }

    pub fn record_restore(&mut self, dropped: usize) {
        self.snapshot_restores = self.snapshot_restores.saturating_add(1);
        self.dropped_entries = self.dropped_entries.saturating_add(dropped as u64);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            pushes: self.pushes,
            pops: self.pops,
            tab_switches: self.tab_switches,
            tab_clears: self.tab_clears,
            snapshot_saves: self.snapshot_saves,
            snapshot_restores: self.snapshot_restores,
            dropped_entries: self.dropped_entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub pushes: u64,
    pub pops: u64,
    pub tab_switches: u64,
    pub tab_clears: u64,
    pub snapshot_saves: u64,
    pub snapshot_restores: u64,
    pub dropped_entries: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("pushes".to_string(), json!(self.pushes));
        map.insert("pops".to_string(), json!(self.pops));
        map.insert("tab_switches".to_string(), json!(self.tab_switches));
        map.insert("tab_clears".to_string(), json!(self.tab_clears));
        map.insert("snapshot_saves".to_string(), json!(self.snapshot_saves));
        map.insert(
            "snapshot_restores".to_string(),
            json!(self.snapshot_restores),
        );
        map.insert("dropped_entries".to_string(), json!(self.dropped_entries));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut event = LogEvent::new(LogLevel::Info, target, "stack_metrics");
        event.fields = self.as_fields();
        event
    }
}
