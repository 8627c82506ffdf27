//! Caller-held handles to registered slots.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use crate::value::{Kind, Typed, Value};

/// Shared storage behind one registered name.
pub(crate) type Cell = Arc<RwLock<Value>>;

pub(crate) fn read(cell: &Cell) -> Value {
    cell.read().unwrap_or_else(PoisonError::into_inner).clone()
}

pub(crate) fn write(cell: &Cell, value: Value) {
    *cell.write().unwrap_or_else(PoisonError::into_inner) = value;
}

/// Typed handle returned by registration.
///
/// Holds the default until the owning set is resolved, then the resolved
/// value. Cloning is cheap and every clone observes the same storage, so a
/// handle can be read from any thread once resolution has finished.
pub struct Var<T> {
    name: Arc<str>,
    cell: Cell,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Typed> Var<T> {
    pub(crate) fn new(name: &str, cell: Cell) -> Self {
        Self {
            name: Arc::from(name),
            cell,
            _kind: PhantomData,
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        let value = read(&self.cell);
        match T::from_value(&value) {
            Some(v) => v,
            None => unreachable!("slot {} holds {} instead of {}", self.name, value.kind(), T::KIND),
        }
    }

    /// Current value in its untyped form.
    pub fn value(&self) -> Value {
        read(&self.cell)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        T::KIND
    }
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            cell: Arc::clone(&self.cell),
            _kind: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("name", &self.name)
            .field("value", &read(&self.cell))
            .finish()
    }
}
