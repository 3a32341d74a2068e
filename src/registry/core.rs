use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Result, StackError};
use crate::screen::Screen;

/// Factory responsible for rebuilding a screen of one kind from its recorded
/// constructor arguments.
pub type ScreenFactory = Arc<dyn Fn(&Value) -> Result<Box<dyn Screen>> + Send + Sync>;

/// Maps screen kind tags to factories. Snapshot restore resolves every
/// recorded `screenType` through this table; an unregistered tag fails closed
/// with [`StackError::UnknownKind`].
#[derive(Clone, Default)]
pub struct ScreenRegistry {
    factories: HashMap<String, ScreenFactory>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<Box<dyn Screen>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn instantiate(&self, kind: &str, args: &Value) -> Result<Box<dyn Screen>> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| StackError::UnknownKind(kind.to_string()))?;
        factory(args)
    }
}
