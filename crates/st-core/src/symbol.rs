//! Strongly typed symbol wrappers.
//!
//! The remote API identifies everything by upper-case string symbols
//! (`"X1-DF55-20250Z"`, `"IRON_ORE"`).  Wrapping them keeps a waypoint from
//! being passed where a trade good is expected.  All wrappers serialize as a
//! bare string and borrow as `str`, so `HashMap<WaypointSymbol, _>` can be
//! queried with a `&str`.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Generate a typed symbol wrapper around a `String`.
macro_rules! symbol_type {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` for the default (empty) symbol.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

symbol_type! {
    /// A ship's registration symbol, e.g. `"BWIGGS-1"`.
    pub struct ShipSymbol;
}

symbol_type! {
    /// A waypoint symbol, e.g. `"X1-DF55-20250Z"`.
    pub struct WaypointSymbol;
}

symbol_type! {
    /// A star-system symbol, e.g. `"X1-DF55"`.
    pub struct SystemSymbol;
}

symbol_type! {
    /// A trade good symbol, e.g. `"IRON_ORE"`.
    pub struct TradeSymbol;
}

impl WaypointSymbol {
    /// The system this waypoint belongs to: everything before the second `-`.
    ///
    /// Symbols without two separators are returned unchanged.
    pub fn system(&self) -> SystemSymbol {
        let mut dashes = self.0.match_indices('-').map(|(i, _)| i);
        match (dashes.next(), dashes.next()) {
            (Some(_), Some(end)) => SystemSymbol::new(&self.0[..end]),
            _ => SystemSymbol::new(self.0.clone()),
        }
    }
}
