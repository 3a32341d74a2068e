mod core;

pub use self::core::{ScreenFactory, ScreenRegistry};
