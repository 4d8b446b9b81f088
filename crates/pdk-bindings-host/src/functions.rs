//! Host functions callable by name.
//!
//! Host functions receive the raw argument bytes staged by the guest and the
//! host's long-lived [`HostState`], and return the result bytes, or `None` to
//! hand the guest a null handle.
//!
//! [`register_all`] installs the functions the test schema imports:
//! - `eatAFruit`: fruit name in, JSON `bool` out
//! - `kv_read`: raw key in, raw stored bytes out
//! - `kv_write`: JSON `{"key": ..., "value": [...]}` in, nothing out

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use pdk_bindings_common::ConfigFile;

/// State that outlives individual calls.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Key/value store backing `kv_read` and `kv_write`.
    pub kv: BTreeMap<String, Vec<u8>>,

    /// Fruits left for `eatAFruit`.
    pub pantry: Vec<String>,
}

impl HostState {
    /// Seed the state from a configuration file.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            kv: config
                .kv
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().into_bytes()))
                .collect(),
            pantry: config.pantry.clone(),
        }
    }
}

/// A host function.
pub type HostFn = Box<dyn Fn(&mut HostState, &[u8]) -> Option<Vec<u8>> + Send + Sync>;

/// Registry of host functions, keyed by import name.
#[derive(Default)]
pub struct HostFunctions {
    functions: HashMap<String, HostFn>,
}

impl HostFunctions {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `name`, replacing any previous function.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut HostState, &[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(f));
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&HostFn> {
        self.functions.get(name)
    }

    /// Names of all registered functions, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for HostFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunctions")
            .field("functions", &self.names())
            .finish()
    }
}

/// Register every standard host function.
pub fn register_all(functions: &mut HostFunctions) {
    register_eat_a_fruit(functions);
    register_kv_read(functions);
    register_kv_write(functions);
}

/// Register `eatAFruit`.
///
/// The argument is a bare fruit name. Returns JSON `true` and removes the
/// fruit from the pantry if it was there, `false` otherwise. An empty or
/// non-UTF-8 argument yields a null handle.
pub fn register_eat_a_fruit(functions: &mut HostFunctions) {
    functions.register("eatAFruit", |state, argument| {
        let fruit = std::str::from_utf8(argument).ok().filter(|s| !s.is_empty())?;
        let eaten = match state.pantry.iter().position(|f| f == fruit) {
            Some(index) => {
                state.pantry.remove(index);
                true
            }
            None => false,
        };
        debug!(fruit, eaten, "eatAFruit");
        Some(if eaten { b"true".to_vec() } else { b"false".to_vec() })
    });
}

/// Register `kv_read`.
///
/// The argument is the raw key. Returns the stored bytes, or a null handle
/// when the key is absent or not UTF-8.
pub fn register_kv_read(functions: &mut HostFunctions) {
    functions.register("kv_read", |state, argument| {
        let key = std::str::from_utf8(argument).ok()?;
        let value = state.kv.get(key).cloned();
        debug!(key, found = value.is_some(), "kv_read");
        value
    });
}

#[derive(Deserialize)]
struct WriteRequest {
    key: String,
    value: Vec<u8>,
}

/// Register `kv_write`.
///
/// The argument is a JSON write request. Malformed requests are logged and
/// dropped; the function never returns anything.
pub fn register_kv_write(functions: &mut HostFunctions) {
    functions.register("kv_write", |state, argument| {
        match serde_json::from_slice::<WriteRequest>(argument) {
            Ok(request) => {
                debug!(key = %request.key, bytes = request.value.len(), "kv_write");
                state.kv.insert(request.key, request.value);
            }
            Err(e) => warn!(error = %e, "kv_write: dropping malformed request"),
        }
        None
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> (HostFunctions, HostState) {
        let mut functions = HostFunctions::new();
        register_all(&mut functions);
        let state = HostState::from_config(&ConfigFile::default());
        (functions, state)
    }

    fn call(functions: &HostFunctions, state: &mut HostState, name: &str, arg: &[u8]) -> Option<Vec<u8>> {
        (functions.get(name).unwrap())(state, arg)
    }

    #[test]
    fn test_register_all() {
        let (functions, _) = standard();
        assert_eq!(functions.names(), ["eatAFruit", "kv_read", "kv_write"]);
        assert!(functions.get("missing").is_none());
    }

    #[test]
    fn test_eat_a_fruit_consumes() {
        let (functions, mut state) = standard();

        assert_eq!(
            call(&functions, &mut state, "eatAFruit", b"banana"),
            Some(b"true".to_vec())
        );
        assert_eq!(
            call(&functions, &mut state, "eatAFruit", b"banana"),
            Some(b"false".to_vec())
        );
        assert_eq!(state.pantry, ["apple", "orange", "strawberry"]);
    }

    #[test]
    fn test_eat_a_fruit_empty_argument() {
        let (functions, mut state) = standard();
        assert_eq!(call(&functions, &mut state, "eatAFruit", b""), None);
    }

    #[test]
    fn test_kv_round_trip() {
        let (functions, mut state) = standard();

        assert_eq!(call(&functions, &mut state, "kv_read", b"key"), None);

        let request = br#"{"key":"key","value":[118,97,108,117,101]}"#;
        assert_eq!(call(&functions, &mut state, "kv_write", request), None);

        assert_eq!(
            call(&functions, &mut state, "kv_read", b"key"),
            Some(b"value".to_vec())
        );
    }

    #[test]
    fn test_kv_write_malformed_is_dropped() {
        let (functions, mut state) = standard();

        assert_eq!(call(&functions, &mut state, "kv_write", b"{oops"), None);
        assert!(state.kv.is_empty());
    }

    #[test]
    fn test_state_from_config() {
        let mut config = ConfigFile::default();
        config.kv.insert("greeting".into(), "hello".into());
        config.pantry = vec!["apple".into()];

        let state = HostState::from_config(&config);
        assert_eq!(state.kv["greeting"], b"hello");
        assert_eq!(state.pantry, ["apple"]);
    }

    #[test]
    fn test_register_replaces() {
        let mut functions = HostFunctions::new();
        functions.register("f", |_, _| Some(b"1".to_vec()));
        functions.register("f", |_, _| Some(b"2".to_vec()));

        let mut state = HostState::default();
        assert_eq!(call(&functions, &mut state, "f", b""), Some(b"2".to_vec()));
    }
}
