// ABOUTME: Bidirectional mapping between domain enumerations and API wire tokens
// ABOUTME: Declaration macro, lookup trait and the validated process-wide registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Wire Enumerations
//!
//! The API documents its enumerations as closed sets of string tokens. Each
//! domain enum is declared once with [`wire_enum!`](crate::wire_enum!), which
//! produces:
//!
//! - the Rust enum itself,
//! - a static `(variant, token)` table,
//! - an exhaustive `to_token` match, so a variant without a token is a compile error.
//!
//! The [`WireEnumRegistry`] collects every table used by the protocol and
//! checks the bijection once at startup: non-empty tokens, no token shared by
//! two variants, no variant listed twice, and `to_token` agreeing with the
//! table. After construction it is read-only.
//!
//! ```rust
//! use canvas_core::wire_enum;
//! use canvas_core::wire_enum::WireEnum;
//!
//! wire_enum! {
//!     /// Visibility of a page
//!     pub enum Visibility as "Visibility" {
//!         /// Visible to everyone
//!         Public => "public",
//!         /// Visible to members only
//!         Members => "members",
//!     }
//! }
//!
//! assert_eq!(Visibility::Members.to_token(), "members");
//! assert_eq!(Visibility::from_token("public"), Some(Visibility::Public));
//! assert_eq!(Visibility::from_token("secret"), None);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;

use thiserror::Error;

use crate::errors::{CanvasError, CanvasResult};

/// A domain enumeration with a closed set of wire tokens
pub trait WireEnum: Copy + Eq + Debug + Send + Sync + 'static {
    /// Enumeration name used in diagnostics
    const ENUMERATION: &'static str;

    /// Every declared `(variant, token)` pair
    const TABLE: &'static [(Self, &'static str)];

    /// Wire token for this variant
    fn to_token(self) -> &'static str;

    /// Variant for a wire token, `None` when the token is not declared
    #[must_use]
    fn from_token(token: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, declared)| *declared == token)
            .map(|(variant, _)| *variant)
    }

    /// Variant for a wire token, treating an undeclared token as a protocol failure
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UndeclaredEnumValue`] when the token is not in the table.
    fn parse_token(token: &str) -> CanvasResult<Self> {
        Self::from_token(token).ok_or_else(|| CanvasError::UndeclaredEnumValue {
            enumeration: Self::ENUMERATION,
            observed: token.to_owned(),
            expected: Self::tokens(),
        })
    }

    /// All declared tokens, in declaration order
    #[must_use]
    fn tokens() -> Vec<&'static str> {
        Self::TABLE.iter().map(|(_, token)| *token).collect()
    }
}

/// Declare a wire enumeration
///
/// Generates the enum with `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and
/// `Hash`, implements [`WireEnum`], `Display` (the token) and a token-based
/// `serde::Serialize` for request bodies.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $label:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::wire_enum::WireEnum for $name {
            const ENUMERATION: &'static str = $label;
            const TABLE: &'static [(Self, &'static str)] = &[$((Self::$variant, $token)),+];

            fn to_token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad($crate::wire_enum::WireEnum::to_token(*self))
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str($crate::wire_enum::WireEnum::to_token(*self))
            }
        }
    };
}

/// Bijection violation detected while building the registry
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireTableError {
    /// The same enumeration was registered twice
    #[error("enumeration {enumeration} registered more than once")]
    DuplicateEnumeration {
        /// Enumeration name
        enumeration: &'static str,
    },
    /// An enumeration declares no variants
    #[error("enumeration {enumeration} declares no tokens")]
    EmptyTable {
        /// Enumeration name
        enumeration: &'static str,
    },
    /// A variant maps to the empty string
    #[error("enumeration {enumeration}: variant {variant} has an empty token")]
    EmptyToken {
        /// Enumeration name
        enumeration: &'static str,
        /// Variant name
        variant: String,
    },
    /// Two variants share one token
    #[error("enumeration {enumeration}: token {token:?} is shared by more than one variant")]
    DuplicateToken {
        /// Enumeration name
        enumeration: &'static str,
        /// Shared token
        token: &'static str,
    },
    /// A variant appears twice in the table
    #[error("enumeration {enumeration}: variant {variant} is listed more than once")]
    DuplicateVariant {
        /// Enumeration name
        enumeration: &'static str,
        /// Variant name
        variant: String,
    },
    /// `to_token` disagrees with the declared table
    #[error("enumeration {enumeration}: variant {variant} declares {declared:?} but encodes as {encoded:?}")]
    InconsistentToken {
        /// Enumeration name
        enumeration: &'static str,
        /// Variant name
        variant: String,
        /// Token in the table
        declared: &'static str,
        /// Token produced by `to_token`
        encoded: &'static str,
    },
}

/// Validated token table of one enumeration, with variants erased to their names
#[derive(Debug, Clone)]
pub struct EnumTable {
    enumeration: &'static str,
    entries: Vec<(String, &'static str)>,
}

impl EnumTable {
    fn collect<E: WireEnum>() -> Result<Self, WireTableError> {
        let enumeration = E::ENUMERATION;
        if E::TABLE.is_empty() {
            return Err(WireTableError::EmptyTable { enumeration });
        }

        let mut seen_variants: Vec<E> = Vec::with_capacity(E::TABLE.len());
        let mut seen_tokens: HashSet<&'static str> = HashSet::with_capacity(E::TABLE.len());
        let mut entries = Vec::with_capacity(E::TABLE.len());

        for &(variant, token) in E::TABLE {
            let name = format!("{variant:?}");
            if token.is_empty() {
                return Err(WireTableError::EmptyToken {
                    enumeration,
                    variant: name,
                });
            }
            if seen_variants.contains(&variant) {
                return Err(WireTableError::DuplicateVariant {
                    enumeration,
                    variant: name,
                });
            }
            if !seen_tokens.insert(token) {
                return Err(WireTableError::DuplicateToken { enumeration, token });
            }
            let encoded = variant.to_token();
            if encoded != token {
                return Err(WireTableError::InconsistentToken {
                    enumeration,
                    variant: name,
                    declared: token,
                    encoded,
                });
            }
            seen_variants.push(variant);
            entries.push((name, token));
        }

        Ok(Self {
            enumeration,
            entries,
        })
    }

    /// Enumeration name
    #[must_use]
    pub const fn enumeration(&self) -> &'static str {
        self.enumeration
    }

    /// Declared tokens in declaration order
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, token)| *token)
    }

    /// Variant name for a token
    #[must_use]
    pub fn variant_name(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, declared)| *declared == token)
            .map(|(name, _)| name.as_str())
    }

    /// Number of declared variants
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (never true for a validated table)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder collecting the enumerations of the protocol
#[derive(Debug, Default)]
pub struct WireEnumRegistryBuilder {
    tables: Vec<Result<EnumTable, WireTableError>>,
}

impl WireEnumRegistryBuilder {
    /// Start an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration; validation happens in [`Self::build`]
    #[must_use]
    pub fn register<E: WireEnum>(mut self) -> Self {
        self.tables.push(EnumTable::collect::<E>());
        self
    }

    /// Validate every registered table and freeze the registry
    ///
    /// # Errors
    ///
    /// Returns the first [`WireTableError`] found.
    pub fn build(self) -> Result<WireEnumRegistry, WireTableError> {
        let mut tables = BTreeMap::new();
        for table in self.tables {
            let table = table?;
            let enumeration = table.enumeration;
            if tables.insert(enumeration, table).is_some() {
                return Err(WireTableError::DuplicateEnumeration { enumeration });
            }
        }
        Ok(WireEnumRegistry { tables })
    }
}

/// Immutable, validated set of every protocol enumeration
#[derive(Debug, Clone)]
pub struct WireEnumRegistry {
    tables: BTreeMap<&'static str, EnumTable>,
}

impl WireEnumRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> WireEnumRegistryBuilder {
        WireEnumRegistryBuilder::new()
    }

    /// Table for an enumeration name
    #[must_use]
    pub fn table(&self, enumeration: &str) -> Option<&EnumTable> {
        self.tables.get(enumeration)
    }

    /// Whether the enumeration is registered
    #[must_use]
    pub fn contains<E: WireEnum>(&self) -> bool {
        self.tables.contains_key(E::ENUMERATION)
    }

    /// Registered enumeration names, sorted
    pub fn enumerations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.keys().copied()
    }

    /// Number of registered enumerations
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no enumeration is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
