//! Type-safe identifiers.
//!
//! Every store-assigned id is a newtype over `u64`, so a `UserId` can never be passed where an
//! `OrderId` is expected. Ids serialise as bare numbers and display without a prefix, which keeps
//! them usable as path segments (`GET /users/1`).

use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Default,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the underlying number.
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`User`](crate::model::User).
    UserId
);
define_id!(
    /// Identifier of an [`Order`](crate::model::Order), shared by its [`Payment`](crate::model::Payment).
    OrderId
);
define_id!(
    /// Identifier of a [`Product`](crate::model::Product).
    ProductId
);
define_id!(
    /// Identifier of a [`Category`](crate::model::Category).
    CategoryId
);
