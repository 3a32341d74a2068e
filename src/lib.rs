//! Multi-stack screen navigation behind a single display surface.
//!
//! Each tab owns an independent stack of screens; pushes either replace the
//! visible screen or layer on top of it, tab switches tear the outgoing stack
//! down without losing state, and the whole structure snapshots to JSON and
//! rebuilds after a restart. Rendering and screen content stay behind the
//! [`SurfaceHost`] and [`Screen`] boundaries.

pub mod error;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod screen;
pub mod snapshot;
pub mod stack;
pub mod surface;
pub mod transition;

pub use error::{Result, StackError};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, StackMetrics};
pub use registry::{ScreenFactory, ScreenRegistry};
pub use screen::{
    DismissReason, PresentReason, Screen, ScreenLifecycle, SharedElement, SharedElementSource,
};
pub use snapshot::{EntrySnapshot, Snapshot, TabSnapshot};
pub use stack::{PushMode, StackConfig, StackEntry, StackManager, SwitchOutcome, TabId};
pub use surface::{NullSurfaceHost, NullViewStateStore, SurfaceHost, ViewStateStore};
pub use transition::{TransitionLegs, TransitionSpec};
