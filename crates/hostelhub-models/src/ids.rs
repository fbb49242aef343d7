//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses a `BIGSERIAL` primary key. Wrapping those `i64`s in a
//! distinct type per entity keeps a `StudentId` from being passed where an
//! `OwnerId` is expected, which matters most for tenant filters.
//!
//! # Example
//!
//! ```ignore
//! use hostelhub_models::ids::{OwnerId, StudentId};
//!
//! fn list_students(owner_id: OwnerId) { /* ... */ }
//!
//! let owner_id = OwnerId::new(7);
//! let student_id = StudentId::new(7);
//!
//! list_students(owner_id);      // OK
//! // list_students(student_id); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Generates an `i64` newtype with sqlx, serde and OpenAPI support.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = i64)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i64 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i64 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i64 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i64 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i64 as PgHasArrayType>::array_type_info()
            }
        }
    };
}

define_id!(
    /// Hostel owner, which is also the tenant key.
    OwnerId
);

define_id!(SuperAdminId);

define_id!(StudentId);

define_id!(CategoryId);

define_id!(
    /// One month's bill for one student.
    RentId
);

define_id!(PaymentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_debug() {
        let id = OwnerId::new(42);
        assert_eq!(format!("{:?}", id), "OwnerId(42)");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(StudentId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_from_str() {
        let id: RentId = " 19 ".parse().unwrap();
        assert_eq!(id.into_inner(), 19);
        assert!("nineteen".parse::<RentId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&CategoryId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: PaymentId = serde_json::from_str("12").unwrap();
        assert_eq!(id, PaymentId::new(12));
    }

    #[test]
    fn test_id_ordering_matches_inner() {
        let mut ids = vec![StudentId::new(3), StudentId::new(10), StudentId::new(1)];
        ids.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, vec![StudentId::new(10), StudentId::new(3), StudentId::new(1)]);
    }

    #[test]
    fn test_id_conversion_roundtrip() {
        let id: OwnerId = 99_i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 99);
    }
}
