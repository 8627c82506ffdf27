//! Named, typed variable storage.
//!
//! Writes are last-writer-wins for scalar kinds and cumulative for string
//! lists. Resolution does not write slots directly: it works on a
//! [`Staged`] snapshot and commits only when every layer applied cleanly.

pub mod var;

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::config::ConfigError;
use crate::value::{Kind, Value};

pub use var::Var;
use var::Cell;

/// A registered name, its shared storage, and its default.
#[derive(Debug)]
struct Slot {
    cell: Cell,
    default: Value,
}

/// Outcome of setting a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Set,
    /// The name is not registered; the write was dropped.
    Ignored,
}

/// Registered slots in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    slots: IndexMap<String, Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` holding `default`. Fails if the name is taken.
    pub(crate) fn register(&mut self, name: &str, default: Value) -> Result<Cell, ConfigError> {
        if self.slots.contains_key(name) {
            return Err(ConfigError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        let cell = Arc::new(RwLock::new(default.clone()));
        self.slots.insert(
            name.to_string(),
            Slot {
                cell: Arc::clone(&cell),
                default,
            },
        );
        Ok(cell)
    }

    /// Parse `raw` into the slot's kind and store it.
    pub fn set(&self, name: &str, raw: &str) -> Result<(), ConfigError> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| ConfigError::NotRegistered {
                name: name.to_string(),
            })?;
        let mut value = var::read(&slot.cell);
        apply(name, &mut value, raw)?;
        var::write(&slot.cell, value);
        Ok(())
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.slots.get(name).map(|slot| var::read(&slot.cell))
    }

    /// Current value of `name` in its canonical text form.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }

    /// Registered default of `name`.
    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).map(|slot| &slot.default)
    }

    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.slots.get(name).map(|slot| slot.default.kind())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// `(name, current value)` pairs, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.slots
            .iter()
            .map(|(name, slot)| (name.as_str(), var::read(&slot.cell)))
    }

    /// Snapshot current values for a resolution pass.
    pub(crate) fn stage(&self) -> Staged {
        Staged {
            values: self
                .slots
                .iter()
                .map(|(name, slot)| (name.clone(), var::read(&slot.cell)))
                .collect(),
        }
    }

    /// Publish staged values to the shared slots.
    pub(crate) fn commit(&self, staged: Staged) {
        for (name, value) in staged.values {
            if let Some(slot) = self.slots.get(&name) {
                var::write(&slot.cell, value);
            }
        }
    }
}

/// Uncommitted copy of every slot's value.
#[derive(Debug)]
pub(crate) struct Staged {
    values: IndexMap<String, Value>,
}

impl Staged {
    /// Set a staged value; unregistered names are ignored.
    pub(crate) fn set(&mut self, name: &str, raw: &str) -> Result<Applied, ConfigError> {
        match self.values.get_mut(name) {
            Some(value) => {
                apply(name, value, raw)?;
                Ok(Applied::Set)
            }
            None => Ok(Applied::Ignored),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

fn apply(name: &str, value: &mut Value, raw: &str) -> Result<(), ConfigError> {
    let kind = value.kind();
    value.set(raw).map_err(|source| ConfigError::InvalidValue {
        name: name.to_string(),
        kind,
        value: raw.to_string(),
        source,
    })
}
