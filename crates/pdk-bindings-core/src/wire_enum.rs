//! Enum name tables for the wire.
//!
//! Enums cross the boundary as their symbolic name. Instead of looking names
//! up by reflection at runtime, [`wire_enum!`](crate::wire_enum) generates the
//! enum and its name table from one declaration:
//!
//! - `name()` is an exhaustive `match`, so a variant without a name does not compile.
//! - Duplicate names are rejected by a `const` assertion.
//! - `Serialize`, `Deserialize`, `Display` and `FromStr` all go through the table.

use thiserror::Error;

/// An enum with a fixed, generated mapping to wire names.
pub trait WireEnum: Copy + Sized + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Every wire name, in the same order as [`VARIANTS`](WireEnum::VARIANTS).
    const NAMES: &'static [&'static str];

    /// The wire name of this variant.
    fn name(self) -> &'static str;

    /// Look up a variant by wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

/// A wire name that matches no variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} variant '{name}'")]
pub struct UnknownVariant {
    /// Name of the enum type.
    pub kind: &'static str,
    /// The name that failed to match.
    pub name: String,
}

/// Returns `false` if any two names are equal.
#[doc(hidden)]
pub const fn names_are_unique(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if str_eq(names[i], names[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Declare an enum together with its wire name table.
///
/// # Example
///
/// ```
/// use pdk_bindings_core::{wire_enum, WireEnum};
///
/// wire_enum! {
///     /// Primary colours.
///     pub enum Colour {
///         Red => "red",
///         Green => "green",
///     }
/// }
///
/// assert_eq!(Colour::Green.name(), "green");
/// assert_eq!("red".parse::<Colour>().unwrap(), Colour::Red);
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        const _: () = assert!(
            $crate::wire_enum::names_are_unique(&[$($wire),+]),
            concat!("duplicate wire name in ", stringify!($name)),
        );

        impl $crate::WireEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];
            const NAMES: &'static [&'static str] = &[$($wire),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::WireEnum::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::WireEnum>::from_name(s).ok_or_else(|| $crate::UnknownVariant {
                    kind: stringify!($name),
                    name: s.to_string(),
                })
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::WireEnum::name(*self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let name = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <Self as $crate::WireEnum>::from_name(&name).ok_or_else(|| {
                    <D::Error as $crate::__private::serde::de::Error>::unknown_variant(
                        &name,
                        <Self as $crate::WireEnum>::NAMES,
                    )
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::wire_enum! {
        enum Direction {
            North => "north",
            South => "south",
            /// Renamed on the wire.
            East => "sunrise",
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Direction::North.name(), "north");
        assert_eq!(Direction::East.name(), "sunrise");
        assert_eq!(Direction::NAMES, ["north", "south", "sunrise"]);
        assert_eq!(Direction::VARIANTS.len(), Direction::NAMES.len());
    }

    #[test]
    fn test_table_round_trip() {
        for (variant, name) in Direction::VARIANTS.iter().zip(Direction::NAMES) {
            assert_eq!(variant.name(), *name);
            assert_eq!(Direction::from_name(name), Some(*variant));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("south".parse::<Direction>(), Ok(Direction::South));
        let err = "East".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown Direction variant 'East'");
    }

    #[test]
    fn test_serde() {
        assert_eq!(
            serde_json::to_string(&Direction::East).unwrap(),
            r#""sunrise""#
        );
        let parsed: Direction = serde_json::from_str(r#""north""#).unwrap();
        assert_eq!(parsed, Direction::North);

        let err = serde_json::from_str::<Direction>(r#""west""#).unwrap_err();
        assert!(err.to_string().contains("unknown variant `west`"));
    }

    #[test]
    fn test_names_are_unique() {
        assert!(names_are_unique(&["a", "b", "ab"]));
        assert!(!names_are_unique(&["a", "b", "a"]));
        assert!(names_are_unique(&[]));
    }
}
