use serde_json::Value;

use crate::screen::Screen;
use crate::transition::TransitionLegs;

/// The display surface the stack manager drives. Implementations own the
/// actual mounting machinery (window, terminal region, fragment holder); the
/// manager only tells them what to do and in which order.
///
/// Contract, matching the stack invariants:
/// - `replace` is an atomic swap: every surface currently mounted is torn down
///   and `screen` becomes the sole occupant.
/// - `add` layers `screen` above whatever is mounted, leaving it alive.
/// - `remove` tears down `screen`'s surface only.
///
/// Calls are synchronous and infallible from the manager's point of view; a
/// host that animates does so after the fact.
pub trait SurfaceHost: Send {
    fn replace(&mut self, screen: &mut dyn Screen, transition: Option<&TransitionLegs>);

    fn add(&mut self, screen: &mut dyn Screen, transition: Option<&TransitionLegs>);

    fn remove(&mut self, screen: &mut dyn Screen, transition: Option<&TransitionLegs>);
}

/// Captures and reapplies opaque per-surface view state (scroll offsets, input
/// contents, ...). The blob is never inspected by the manager; it is carried
/// through teardown and snapshots and handed back on the next mount.
pub trait ViewStateStore: Send {
    /// Capture the current view state of a mounted screen. `None` when there
    /// is nothing to record.
    fn capture(&self, screen: &dyn Screen) -> Option<Value>;

    /// Reapply a previously captured blob to a freshly mounted screen.
    fn apply(&mut self, screen: &mut dyn Screen, state: &Value);
}

/// Surface host that drops every call. Useful for tests and headless tooling.
#[derive(Debug, Default)]
pub struct NullSurfaceHost;

impl SurfaceHost for NullSurfaceHost {
    fn replace(&mut self, _screen: &mut dyn Screen, _transition: Option<&TransitionLegs>) {}

    fn add(&mut self, _screen: &mut dyn Screen, _transition: Option<&TransitionLegs>) {}

    fn remove(&mut self, _screen: &mut dyn Screen, _transition: Option<&TransitionLegs>) {}
}

/// View-state store that records nothing.
#[derive(Debug, Default)]
pub struct NullViewStateStore;

impl ViewStateStore for NullViewStateStore {
    fn capture(&self, _screen: &dyn Screen) -> Option<Value> {
        None
    }

    fn apply(&mut self, _screen: &mut dyn Screen, _state: &Value) {}
}
