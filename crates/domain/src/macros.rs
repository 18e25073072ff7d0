//! Macro for implementing wire-name conversions on unit enums
//!
//! Salt identifies eauth backends and execution clients by short lowercase
//! names (`pam`, `local_async`, ...). This macro maps enum variants to those
//! names once and derives `as_str`, `Display`, `FromStr` and string-based
//! serde impls from the mapping.
//!
//! # Example
//!
//! ```rust
//! use salt_netapi_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Backend {
//!     Pam,
//!     Ldap,
//! }
//!
//! impl_wire_name_conversions!(Backend {
//!     Pam => "pam",
//!     Ldap => "ldap",
//! });
//!
//! assert_eq!(Backend::Pam.as_str(), "pam");
//! assert_eq!("LDAP".parse::<Backend>().unwrap(), Backend::Ldap);
//! ```

/// Implements `as_str`, `Display`, `FromStr`, `Serialize` and `Deserialize`
/// for a unit enum from a variant → wire name mapping.
///
/// Parsing is case-insensitive; output always uses the mapped name. Crates
/// invoking the macro need `serde` as a dependency.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Name of this variant on the wire.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}
