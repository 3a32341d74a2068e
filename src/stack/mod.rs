use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{Result, StackError};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::StackMetrics;
use crate::registry::ScreenRegistry;
use crate::screen::{DismissReason, PresentReason, Screen};
use crate::snapshot::{Snapshot, TabSnapshot};
use crate::surface::{SurfaceHost, ViewStateStore};
use crate::transition::TransitionSpec;

pub mod entry;

pub use entry::{PushMode, StackEntry};

/// Name of an independently addressable navigation stack.
pub type TabId = String;

/// Configuration knobs for a [`StackManager`].
#[derive(Clone)]
pub struct StackConfig {
    /// Optional structured logger for stack operations.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the embedding application.
    pub metrics: Option<Arc<Mutex<StackMetrics>>>,
    /// Target field stamped on emitted log events.
    pub log_target: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "tabstack::stack".to_string(),
        }
    }
}

impl StackConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(StackMetrics::new())));
        }
    }

    /// Disable metrics collection.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<StackMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Result of [`StackManager::switch_to_tab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested tab was already active; nothing changed.
    AlreadyActive,
    /// The tab's stack came back with at least one screen on it.
    Restored,
    /// The tab has no screens yet; the caller should push a root screen.
    Empty,
}

impl SwitchOutcome {
    /// Collapses to the boolean shape of the operation: only an empty tab
    /// reports `false`.
    pub fn as_bool(&self) -> bool {
        !matches!(self, SwitchOutcome::Empty)
    }
}

/// Manager for several navigation stacks sharing one display surface.
///
/// Each stack is keyed by a tab id; unknown ids spring into existence empty on
/// first use. At most one stack is materialized at a time: the active tab's
/// segment from its highest replace-mode entry to its top. All operations are
/// synchronous and must be driven from a single event source.
pub struct StackManager {
    current_tab: TabId,
    stacks: HashMap<TabId, Vec<StackEntry>>,
    registry: ScreenRegistry,
    host: Box<dyn SurfaceHost>,
    views: Box<dyn ViewStateStore>,
    config: StackConfig,
}

impl StackManager {
    pub fn new(
        registry: ScreenRegistry,
        host: Box<dyn SurfaceHost>,
        views: Box<dyn ViewStateStore>,
    ) -> Self {
        Self::with_config(registry, host, views, StackConfig::default())
    }

    pub fn with_config(
        registry: ScreenRegistry,
        host: Box<dyn SurfaceHost>,
        views: Box<dyn ViewStateStore>,
        config: StackConfig,
    ) -> Self {
        Self {
            current_tab: TabId::new(),
            stacks: HashMap::new(),
            registry,
            host,
            views,
            config,
        }
    }

    pub fn config_mut(&mut self) -> &mut StackConfig {
        &mut self.config
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScreenRegistry {
        &mut self.registry
    }

    /// Id of the active tab.
    pub fn current_tab_id(&self) -> &str {
        &self.current_tab
    }

    /// Number of entries stacked on the active tab.
    pub fn current_tab_size(&self) -> usize {
        self.tab_size(&self.current_tab)
    }

    /// Number of entries stacked on `tab`.
    pub fn tab_size(&self, tab: &str) -> usize {
        self.stacks.get(tab).map_or(0, Vec::len)
    }

    /// Every tab id seen so far, sorted.
    pub fn tab_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.stacks.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The screen on top of the active tab's stack.
    pub fn top_screen(&self) -> Option<&dyn Screen> {
        self.top_screen_in(&self.current_tab)
    }

    /// The screen on top of `tab`'s stack.
    pub fn top_screen_in(&self, tab: &str) -> Option<&dyn Screen> {
        self.stacks
            .get(tab)
            .and_then(|stack| stack.last())
            .map(StackEntry::screen)
    }

    /// Make `tab` the active stack. The outgoing tab's materialized screens
    /// are dismissed with [`DismissReason::LeavingStack`] and torn down (their
    /// view state is retained); the incoming stack is rebuilt exactly as it
    /// was last shown. When the incoming tab is empty the caller is expected
    /// to push a root screen next.
    pub fn switch_to_tab(&mut self, tab: &str) -> SwitchOutcome {
        if tab == self.current_tab {
            self.log_stack_event(
                LogLevel::Debug,
                "tab_switch_noop",
                [json_str("tab", tab)],
            );
            return SwitchOutcome::AlreadyActive;
        }

        self.teardown_active(DismissReason::LeavingStack);
        let from = std::mem::replace(&mut self.current_tab, tab.to_string());
        let restored = self.materialize_active(PresentReason::RestoringStack);

        self.record_metric(|metrics| metrics.record_tab_switch());
        self.log_stack_event(
            LogLevel::Info,
            "tab_switched",
            [
                json_str("from", from),
                json_str("to", tab),
                json_kv("restored", restored),
            ],
        );

        if restored > 0 {
            SwitchOutcome::Restored
        } else {
            SwitchOutcome::Empty
        }
    }

    /// Put a screen on the active tab's stack.
    ///
    /// The screen must carry the lifecycle capability; pushing one that does
    /// not is a programming error and leaves the stack untouched. On an empty
    /// stack the mode is forced to [`PushMode::Replace`] and the transition
    /// dropped, there being nothing to transition from.
    pub fn push(
        &mut self,
        mut screen: Box<dyn Screen>,
        transition: Option<TransitionSpec>,
        mode: PushMode,
    ) -> Result<()> {
        if screen.lifecycle().is_none() {
            return Err(StackError::LifecycleRequired(screen.kind().to_string()));
        }

        let was_empty = self.current_tab_size() == 0;
        let (mode, transition) = if was_empty {
            (PushMode::Replace, None)
        } else {
            (mode, transition)
        };
        let legs = transition.as_ref().and_then(TransitionSpec::push_legs);

        match mode {
            PushMode::Replace => {
                if let Some(stack) = self.stacks.get_mut(&self.current_tab) {
                    if !stack.is_empty() {
                        // The swap tears down every mounted surface while the
                        // entries stay on the stack; retain their view state.
                        let base = segment_start(stack);
                        for entry in &mut stack[base..] {
                            if let Some(state) = self.views.capture(entry.screen()) {
                                entry.set_saved_view(state);
                            }
                        }
                        if let Some(top) = stack.last_mut() {
                            top.dismiss(DismissReason::Replaced);
                        }
                    }
                }
                self.host.replace(screen.as_mut(), legs.as_ref());
            }
            PushMode::Add => {
                if let Some(top) = self
                    .stacks
                    .get_mut(&self.current_tab)
                    .and_then(|stack| stack.last_mut())
                {
                    // Stays mounted underneath; only loses the front position.
                    top.dismiss(DismissReason::Overlapped);
                }
                self.host.add(screen.as_mut(), legs.as_ref());
            }
        }

        let kind = screen.kind().to_string();
        let size = {
            let stack = self.stacks.entry(self.current_tab.clone()).or_default();
            stack.push(StackEntry::new(screen, mode, transition));
            if let Some(top) = stack.last_mut() {
                top.present(PresentReason::NewScreen);
            }
            stack.len()
        };

        self.record_metric(|metrics| metrics.record_push());
        self.log_stack_event(
            LogLevel::Info,
            "screen_pushed",
            [
                json_str("tab", self.current_tab.clone()),
                json_str("kind", kind),
                json_str("mode", mode.as_str()),
                json_kv("size", size),
            ],
        );
        Ok(())
    }

    /// Pop one entry off the active tab in response to the back control.
    /// Returns `false` when only the root is left; the host then applies its
    /// default back behavior.
    pub fn on_back_pressed(&mut self) -> bool {
        self.pop_one(DismissReason::Back, PresentReason::Back, false)
    }

    /// Pop up to `count` entries, stopping at the root. Returns how many were
    /// actually popped.
    pub fn pop_count(&mut self, count: usize, instant: bool) -> usize {
        let mut popped = 0;
        while popped < count && self.pop_one(DismissReason::Pop, PresentReason::Pop, instant) {
            popped += 1;
        }
        popped
    }

    /// Pop everything above the active tab's root entry.
    pub fn pop_to_top(&mut self, instant: bool) -> usize {
        let size = self.current_tab_size();
        if size > 1 {
            self.pop_count(size - 1, instant)
        } else {
            0
        }
    }

    /// Dismiss and destroy every entry of the active tab, root included.
    pub fn clear_active_tab(&mut self) {
        let removed = {
            let Some(stack) = self.stacks.get_mut(&self.current_tab) else {
                return;
            };
            let base = segment_start(stack);
            for entry in stack.iter_mut().rev() {
                entry.dismiss(DismissReason::ClearingStack);
            }
            for entry in stack[base..].iter_mut().rev() {
                self.host.remove(entry.screen_mut(), None);
            }
            let removed = stack.len();
            stack.clear();
            removed
        };

        self.record_metric(|metrics| metrics.record_tab_clear());
        self.log_stack_event(
            LogLevel::Info,
            "tab_cleared",
            [
                json_str("tab", self.current_tab.clone()),
                json_kv("removed", removed),
            ],
        );
    }

    /// Record the whole structure, view state included, into a snapshot that
    /// [`StackManager::restore`] can rebuild from.
    pub fn save(&self) -> Snapshot {
        let mut tab_ids: Vec<&String> = self.stacks.keys().collect();
        tab_ids.sort();

        let mut tabs = Vec::with_capacity(tab_ids.len());
        for id in tab_ids {
            let stack = &self.stacks[id];
            let base = segment_start(stack);
            let mounted_tab = *id == self.current_tab;
            let entries = stack
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    // Mounted entries are captured fresh; torn-down ones carry
                    // their last-known blob.
                    let fresh = (mounted_tab && index >= base)
                        .then(|| self.views.capture(entry.screen()))
                        .flatten();
                    entry.encode(fresh)
                })
                .collect();
            tabs.push(TabSnapshot {
                id: id.clone(),
                entries,
            });
        }

        let snapshot = Snapshot::new(self.current_tab.clone(), tabs).seal();

        self.record_metric(|metrics| metrics.record_save());
        self.log_stack_event(
            LogLevel::Info,
            "snapshot_saved",
            [
                json_str("active_tab", self.current_tab.clone()),
                json_kv("tabs", snapshot.tabs.len()),
            ],
        );
        snapshot
    }

    /// Rebuild the manager from a snapshot: every recorded screen is
    /// re-instantiated through the registry and fed its exported state, then
    /// the active tab is materialized. Inactive tabs stay unmounted until
    /// switched to.
    ///
    /// Entries whose screen kind has no registered factory are dropped with a
    /// logged error; the rest of the structure is restored.
    pub fn restore(&mut self, snapshot: Snapshot) {
        if !snapshot.verify() {
            self.log_stack_event(
                LogLevel::Warn,
                "snapshot_checksum_mismatch",
                [json_str("active_tab", snapshot.active_tab_id.clone())],
            );
        }

        let Snapshot {
            active_tab_id,
            tabs,
            ..
        } = snapshot;
        self.current_tab = active_tab_id;
        self.stacks.clear();

        let mut dropped = 0usize;
        let tab_count = tabs.len();
        for tab in tabs {
            let mut stack: Vec<StackEntry> = Vec::with_capacity(tab.entries.len());
            let mut dropped_replace_pending = false;
            let mut integrity_warned = false;
            for record in tab.entries {
                let kind = record.screen_type.clone();
                let mode = record.push_mode;
                match StackEntry::decode(record, &self.registry) {
                    Ok(entry) => {
                        if dropped_replace_pending
                            && mode == PushMode::Add
                            && !integrity_warned
                        {
                            // The add now heads a truncated segment; it will
                            // materialize as its segment's base.
                            integrity_warned = true;
                            self.log_stack_event(
                                LogLevel::Warn,
                                "restore_integrity",
                                [
                                    json_str("tab", tab.id.clone()),
                                    json_str("kind", kind),
                                ],
                            );
                        }
                        if mode == PushMode::Replace {
                            dropped_replace_pending = false;
                        }
                        stack.push(entry);
                    }
                    Err(err) => {
                        dropped += 1;
                        if mode == PushMode::Replace {
                            dropped_replace_pending = true;
                        }
                        self.log_stack_event(
                            LogLevel::Error,
                            "screen_restore_failed",
                            [
                                json_str("tab", tab.id.clone()),
                                json_str("kind", kind),
                                json_str("error", err.to_string()),
                            ],
                        );
                    }
                }
            }
            self.stacks.insert(tab.id, stack);
        }

        let restored = self.materialize_active(PresentReason::RestoringStack);

        self.record_metric(|metrics| metrics.record_restore(dropped));
        self.log_stack_event(
            LogLevel::Info,
            "snapshot_restored",
            [
                json_str("active_tab", self.current_tab.clone()),
                json_kv("tabs", tab_count),
                json_kv("dropped", dropped),
                json_kv("active_size", restored),
            ],
        );
    }

    /// Pop the top entry of the active stack. The root entry is never popped
    /// through here.
    fn pop_one(&mut self, dismiss: DismissReason, present: PresentReason, instant: bool) -> bool {
        let (popped_kind, remaining) = {
            let Some(stack) = self.stacks.get_mut(&self.current_tab) else {
                return false;
            };
            if stack.len() <= 1 {
                return false;
            }

            let top_index = stack.len() - 1;
            let legs = if instant {
                None
            } else {
                stack[top_index]
                    .transition()
                    .and_then(TransitionSpec::pop_legs)
            };

            if stack[top_index].mode() == PushMode::Add {
                // The entry underneath is still mounted and simply becomes
                // frontmost again.
                let top = &mut stack[top_index];
                self.host.remove(top.screen_mut(), legs.as_ref());
                top.dismiss(dismiss);
            } else {
                // Replace entries partition the stack into segments. Mount
                // the nearest earlier replace entry, then re-layer every add
                // between it and the outgoing top, in stack order.
                let mut anchor = top_index - 1;
                while anchor >= 1 && stack[anchor].mode() != PushMode::Replace {
                    anchor -= 1;
                }

                {
                    let entry = &mut stack[anchor];
                    self.host.replace(entry.screen_mut(), legs.as_ref());
                    if let Some(state) = entry.take_saved_view() {
                        self.views.apply(entry.screen_mut(), &state);
                    }
                }
                stack[top_index].dismiss(dismiss);
                for index in anchor + 1..top_index {
                    let entry = &mut stack[index];
                    self.host.add(entry.screen_mut(), legs.as_ref());
                    if let Some(state) = entry.take_saved_view() {
                        self.views.apply(entry.screen_mut(), &state);
                    }
                }
            }

            let popped = stack.pop();
            if let Some(new_top) = stack.last_mut() {
                new_top.present(present);
            }
            (
                popped.map_or_else(String::new, |entry| entry.screen().kind().to_string()),
                stack.len(),
            )
        };

        self.record_metric(|metrics| metrics.record_pop());
        self.log_stack_event(
            LogLevel::Info,
            "screen_popped",
            [
                json_str("tab", self.current_tab.clone()),
                json_str("kind", popped_kind),
                json_str("reason", dismiss.as_str()),
                json_kv("remaining", remaining),
            ],
        );
        true
    }

    /// Dismiss every entry of the active tab, top to bottom, then unmount the
    /// materialized segment, retaining each entry's view state for the next
    /// mount. Mirrors the present-all sweep in [`StackManager::materialize_active`].
    fn teardown_active(&mut self, reason: DismissReason) {
        let Some(stack) = self.stacks.get_mut(&self.current_tab) else {
            return;
        };
        if stack.is_empty() {
            return;
        }

        for entry in stack.iter_mut().rev() {
            entry.dismiss(reason);
        }
        let base = segment_start(stack);
        for entry in stack[base..].iter_mut().rev() {
            if let Some(state) = self.views.capture(entry.screen()) {
                entry.set_saved_view(state);
            }
            self.host.remove(entry.screen_mut(), None);
        }
    }

    /// Rebuild the active tab's materialized segment: notify every entry that
    /// its stack is being restored, swap-mount the highest replace entry, then
    /// re-layer the adds above it. Always instant.
    fn materialize_active(&mut self, reason: PresentReason) -> usize {
        let Some(stack) = self.stacks.get_mut(&self.current_tab) else {
            return 0;
        };
        if stack.is_empty() {
            return 0;
        }

        for entry in stack.iter_mut() {
            entry.present(reason);
        }

        let base = segment_start(stack);
        {
            let entry = &mut stack[base];
            self.host.replace(entry.screen_mut(), None);
            if let Some(state) = entry.take_saved_view() {
                self.views.apply(entry.screen_mut(), &state);
            }
        }
        for entry in &mut stack[base + 1..] {
            self.host.add(entry.screen_mut(), None);
            if let Some(state) = entry.take_saved_view() {
                self.views.apply(entry.screen_mut(), &state);
            }
        }
        stack.len()
    }

    fn record_metric(&self, update: impl FnOnce(&mut StackMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn log_stack_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

/// Index of the entry anchoring the materialized segment: the highest
/// replace-mode entry, falling back to the root.
fn segment_start(stack: &[StackEntry]) -> usize {
    stack
        .iter()
        .rposition(|entry| entry.mode() == PushMode::Replace)
        .unwrap_or(0)
}
