//! Access to the variables a pass reads and, for secret mode, briefly writes.
//!
//! The resolver never talks to `std::env` directly. It goes through the
//! [`Environment`] trait so the same pass can run against the real process
//! environment ([`ProcessEnv`]) or an in-memory map ([`MemoryEnv`]).
//!
//! Variables the resolver synthesizes or consumes are registered with a
//! [`ScopedVars`] guard, which removes them when it drops. The environment is
//! therefore restored on every exit path of a field's resolution, including
//! early returns through `?`.

use std::collections::BTreeMap;
use std::env::VarError;

use crate::error::EnvsecError;

/// A readable and writable set of environment variables.
///
/// A variable is *set* when it exists, even if its value is empty or not
/// valid UTF-8. Reading a value that is not valid UTF-8 fails with
/// [`EnvsecError::InvalidUnicode`] instead of being rewritten.
pub trait Environment {
    fn is_set(&self, name: &str) -> bool;
    fn var(&self, name: &str) -> Result<Option<String>, EnvsecError>;
    fn set_var(&mut self, name: &str, value: &str);
    fn remove_var(&mut self, name: &str);
}

/// The process environment.
///
/// Mutating the process environment is not thread-safe. Passes that use
/// `ProcessEnv` must not run concurrently with each other or with any other
/// code reading or writing the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn is_set(&self, name: &str) -> bool {
        std::env::var_os(name).is_some()
    }

    fn var(&self, name: &str) -> Result<Option<String>, EnvsecError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvsecError::InvalidUnicode {
                var: name.to_string(),
            }),
        }
    }

    fn set_var(&mut self, name: &str, value: &str) {
        // SAFETY: callers serialize resolution passes; see the type docs.
        unsafe { std::env::set_var(name, value) }
    }

    fn remove_var(&mut self, name: &str) {
        // SAFETY: as for `set_var`.
        unsafe { std::env::remove_var(name) }
    }
}

/// An in-memory environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MemoryEnv {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for MemoryEnv {
    fn is_set(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn var(&self, name: &str) -> Result<Option<String>, EnvsecError> {
        Ok(self.vars.get(name).cloned())
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

/// Removes every variable registered through [`set`](Self::set) or
/// [`clear_on_drop`](Self::clear_on_drop) when dropped.
pub(crate) struct ScopedVars<'e, E: Environment + ?Sized> {
    env: &'e mut E,
    owned: Vec<String>,
}

impl<'e, E: Environment + ?Sized> ScopedVars<'e, E> {
    pub fn new(env: &'e mut E) -> Self {
        ScopedVars {
            env,
            owned: Vec::new(),
        }
    }

    pub fn var(&self, name: &str) -> Result<Option<String>, EnvsecError> {
        self.env.var(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.env.is_set(name)
    }

    /// Set `name` for the lifetime of this guard.
    pub fn set(&mut self, name: &str, value: &str) {
        self.env.set_var(name, value);
        self.clear_on_drop(name);
    }

    /// Remove an already-present `name` when this guard drops.
    pub fn clear_on_drop(&mut self, name: &str) {
        if !self.owned.iter().any(|n| n == name) {
            self.owned.push(name.to_string());
        }
    }
}

impl<E: Environment + ?Sized> Drop for ScopedVars<'_, E> {
    fn drop(&mut self) {
        for name in self.owned.drain(..) {
            tracing::debug!(var = %name, "clearing consumed variable");
            self.env.remove_var(&name);
        }
    }
}
