//! Export wrappers.
//!
//! Each wrapper decodes the call input, runs the matching [`Plugin`] method,
//! and encodes its result, returning the status code for the host.

use pdk_bindings_core::Host;
use pdk_bindings_core::export::{export_fallible, export_total, export_unit};

use crate::types::Fruit;
use crate::{Imports, Plugin};

/// Export names, as seen by the host.
pub mod names {
    pub const REFERENCE_TYPES: &str = "referenceTypes";
    pub const TOP_LEVEL_PRIMITIVES: &str = "topLevelPrimitives";
    pub const VOID_FUNC: &str = "voidFunc";
}

/// Every export, in schema order.
pub const EXPORTS: [&str; 3] = [
    names::REFERENCE_TYPES,
    names::TOP_LEVEL_PRIMITIVES,
    names::VOID_FUNC,
];

/// Serve `referenceTypes`.
pub fn reference_types<H: Host + ?Sized, P: Plugin>(host: &H, plugin: &P) -> i32 {
    let imports = Imports::new(host);
    export_fallible(host, names::REFERENCE_TYPES, |input: Fruit| {
        plugin.reference_types(&imports, input)
    })
}

/// Serve `topLevelPrimitives`.
pub fn top_level_primitives<H: Host + ?Sized, P: Plugin>(host: &H, plugin: &P) -> i32 {
    let imports = Imports::new(host);
    export_total(host, names::TOP_LEVEL_PRIMITIVES, |input: String| {
        plugin.top_level_primitives(&imports, input)
    })
}

/// Serve `voidFunc`.
pub fn void_func<H: Host + ?Sized, P: Plugin>(host: &H, plugin: &P) -> i32 {
    let imports = Imports::new(host);
    export_unit(host, names::VOID_FUNC, || plugin.void_func(&imports))
}

/// Serve the export called `name`; `None` if there is no such export.
pub fn dispatch<H: Host + ?Sized, P: Plugin>(name: &str, host: &H, plugin: &P) -> Option<i32> {
    match name {
        names::REFERENCE_TYPES => Some(reference_types(host, plugin)),
        names::TOP_LEVEL_PRIMITIVES => Some(top_level_primitives(host, plugin)),
        names::VOID_FUNC => Some(void_func(host, plugin)),
        _ => None,
    }
}
