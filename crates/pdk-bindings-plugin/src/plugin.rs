//! Implementation layer.

use pdk_bindings_core::Host;

use crate::Imports;
use crate::types::{ComplexObject, Fruit, GhostGang, WriteParams};

/// The functions a plugin implements for the schema's exports.
///
/// Each method receives the host imports so it can call back out to the
/// host while it runs.
pub trait Plugin {
    /// `referenceTypes`: build a [`ComplexObject`] for a fruit.
    ///
    /// Returning `None` reports a failed call to the host.
    fn reference_types<H: Host + ?Sized>(
        &self,
        imports: &Imports<'_, H>,
        input: Fruit,
    ) -> Option<ComplexObject>;

    /// `topLevelPrimitives`: map a string to two flags.
    fn top_level_primitives<H: Host + ?Sized>(
        &self,
        imports: &Imports<'_, H>,
        input: String,
    ) -> [bool; 2];

    /// `voidFunc`: no input, no output.
    fn void_func<H: Host + ?Sized>(&self, imports: &Imports<'_, H>);
}

/// Hand-written stub implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stubs;

impl Plugin for Stubs {
    fn reference_types<H: Host + ?Sized>(
        &self,
        _imports: &Imports<'_, H>,
        _input: Fruit,
    ) -> Option<ComplexObject> {
        Some(ComplexObject {
            write_params: WriteParams {
                key: "key".into(),
                value: b"value".to_vec(),
            },
            a_string: "string".into(),
            an_optional_date: Some("date".into()),
            ghost: GhostGang::Blinky,
            an_int: 60,
            a_boolean: true,
        })
    }

    fn top_level_primitives<H: Host + ?Sized>(
        &self,
        _imports: &Imports<'_, H>,
        input: String,
    ) -> [bool; 2] {
        if input == "hello" {
            [true, true]
        } else {
            [false, false]
        }
    }

    fn void_func<H: Host + ?Sized>(&self, _imports: &Imports<'_, H>) {}
}
