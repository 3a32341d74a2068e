use serde_json::Value;

/// Why a screen is being brought to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentReason {
    /// The screen was just pushed.
    NewScreen,
    /// Its stack is being restored (tab switch or snapshot restore).
    RestoringStack,
    /// The user navigated back.
    Back,
    /// The caller popped screens programmatically.
    Pop,
}

impl PresentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentReason::NewScreen => "new_screen",
            PresentReason::RestoringStack => "restoring_stack",
            PresentReason::Back => "back",
            PresentReason::Pop => "pop",
        }
    }
}

/// Why a screen is no longer the frontmost, interactive one. Only
/// [`DismissReason::Overlapped`] leaves the screen's surface mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Superseded by a replace-mode push; its surface is torn down.
    Replaced,
    /// Covered by an add-mode push; it stays mounted underneath.
    Overlapped,
    /// The active tab is switching away.
    LeavingStack,
    /// The user navigated back.
    Back,
    /// Its stack is being cleared.
    ClearingStack,
    /// The caller popped screens programmatically.
    Pop,
}

impl DismissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissReason::Replaced => "replaced",
            DismissReason::Overlapped => "overlapped",
            DismissReason::LeavingStack => "leaving_stack",
            DismissReason::Back => "back",
            DismissReason::ClearingStack => "clearing_stack",
            DismissReason::Pop => "pop",
        }
    }
}

/// A navigable unit of content. At rest a screen is identified by its `kind`
/// tag plus an `args` payload; together they must be enough for a registered
/// factory to rebuild it (see [`crate::registry::ScreenRegistry`]).
///
/// Capabilities are optional and queried dynamically: a screen that wants
/// lifecycle notifications and durable state returns itself from the
/// `lifecycle` accessors, one that exposes transition anchors returns itself
/// from `shared_element_source`.
pub trait Screen: Send {
    /// Stable type tag used to look up the screen's factory on restore.
    fn kind(&self) -> &str;

    /// Constructor arguments, replayed into the factory on restore.
    fn args(&self) -> Value;

    fn lifecycle(&self) -> Option<&dyn ScreenLifecycle> {
        None
    }

    fn lifecycle_mut(&mut self) -> Option<&mut dyn ScreenLifecycle> {
        None
    }

    fn shared_element_source(&self) -> Option<&dyn SharedElementSource> {
        None
    }
}

impl std::fmt::Debug for dyn Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("dyn Screen").field("kind", &self.kind()).finish()
    }
}

/// Lifecycle capability. Required for every pushed screen.
pub trait ScreenLifecycle {
    fn on_presented(&mut self, reason: PresentReason);

    fn on_dismissed(&mut self, reason: DismissReason);

    /// Export dynamic state for the snapshot. `None` means there is nothing
    /// worth persisting beyond the constructor arguments.
    fn export_state(&self) -> Option<Value> {
        None
    }

    /// Re-import state previously returned by [`ScreenLifecycle::export_state`].
    fn import_state(&mut self, _state: Value) {}
}

/// A transition anchor exposed by a screen: `anchor` names an element of the
/// outgoing screen, `target` the transition name it maps to on the incoming
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedElement {
    pub anchor: String,
    pub target: String,
}

impl SharedElement {
    pub fn new(anchor: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            target: target.into(),
        }
    }
}

/// Shared-element capability. Hosts query the frontmost screen for anchors
/// when building a transition; the stack manager itself never consumes them.
pub trait SharedElementSource {
    fn shared_elements(&self) -> Vec<SharedElement>;
}
