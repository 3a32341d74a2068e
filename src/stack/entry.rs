use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::registry::ScreenRegistry;
use crate::screen::{DismissReason, PresentReason, Screen};
use crate::snapshot::EntrySnapshot;
use crate::transition::TransitionSpec;

/// How a screen was put on its stack.
///
/// `Replace` supersedes the previously visible entry (its surface is torn
/// down, though it stays on the stack); `Add` layers above it, leaving it
/// mounted underneath. Serialized as the bare variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushMode {
    Replace,
    Add,
}

impl PushMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushMode::Replace => "replace",
            PushMode::Add => "add",
        }
    }
}

/// One stacked screen together with its push mode, transition spec and the
/// last view-state blob captured while its surface was torn down.
///
/// The blob lives from teardown-while-retained (tab switched away, covered by
/// a replace push, snapshot restore) until the next mount consumes it.
#[derive(Debug)]
pub struct StackEntry {
    screen: Box<dyn Screen>,
    mode: PushMode,
    transition: Option<TransitionSpec>,
    saved_view: Option<Value>,
}

impl StackEntry {
    pub fn new(screen: Box<dyn Screen>, mode: PushMode, transition: Option<TransitionSpec>) -> Self {
        Self {
            screen,
            mode,
            transition,
            saved_view: None,
        }
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> &mut dyn Screen {
        self.screen.as_mut()
    }

    pub fn mode(&self) -> PushMode {
        self.mode
    }

    pub fn transition(&self) -> Option<&TransitionSpec> {
        self.transition.as_ref()
    }

    pub fn saved_view(&self) -> Option<&Value> {
        self.saved_view.as_ref()
    }

    pub fn set_saved_view(&mut self, state: Value) {
        self.saved_view = Some(state);
    }

    pub fn take_saved_view(&mut self) -> Option<Value> {
        self.saved_view.take()
    }

    /// Forward a presented notification to the screen's lifecycle, if any.
    pub fn present(&mut self, reason: PresentReason) {
        if let Some(lifecycle) = self.screen.lifecycle_mut() {
            lifecycle.on_presented(reason);
        }
    }

    /// Forward a dismissed notification to the screen's lifecycle, if any.
    pub fn dismiss(&mut self, reason: DismissReason) {
        if let Some(lifecycle) = self.screen.lifecycle_mut() {
            lifecycle.on_dismissed(reason);
        }
    }

    /// Record this entry for a snapshot. `fresh_view` is the view state just
    /// captured from a mounted surface; an unmounted entry carries whatever
    /// blob it last saved.
    pub fn encode(&self, fresh_view: Option<Value>) -> EntrySnapshot {
        EntrySnapshot {
            screen_type: self.screen.kind().to_string(),
            screen_args: self.screen.args(),
            screen_state: self
                .screen
                .lifecycle()
                .and_then(|lifecycle| lifecycle.export_state()),
            push_mode: self.mode,
            transition: self.transition.clone(),
            view_state: fresh_view.or_else(|| self.saved_view.clone()),
        }
    }

    /// Rebuild an entry from its snapshot record: instantiate the screen
    /// through the registry, replay its exported state, and retain the stored
    /// view blob for the next mount.
    pub fn decode(snapshot: EntrySnapshot, registry: &ScreenRegistry) -> Result<Self> {
        let mut screen = registry.instantiate(&snapshot.screen_type, &snapshot.screen_args)?;
        if let Some(state) = snapshot.screen_state {
            if let Some(lifecycle) = screen.lifecycle_mut() {
                lifecycle.import_state(state);
            }
        }
        Ok(Self {
            screen,
            mode: snapshot.push_mode,
            transition: snapshot.transition,
            saved_view: snapshot.view_state,
        })
    }
}
