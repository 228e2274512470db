//! Record identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a raw string is not a well-formed record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRecordId;

/// Record store identifier: 24 hex characters (12 bytes).
///
/// The inner String is private to ensure all construction goes through
/// `parse` or `generate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Parse a raw string, rejecting anything that is not 24 hex chars.
    pub fn parse(raw: &str) -> Result<Self, InvalidRecordId> {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(InvalidRecordId)
        }
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 12] = rand::random();
        let mut out = String::with_capacity(24);
        for b in bytes {
            out.push_str(&format!("{b:02x}"));
        }
        Self(out)
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! record_id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(RecordId);

        impl $name {
            /// Parse a raw string into a typed identifier.
            pub fn parse(raw: &str) -> Result<Self, InvalidRecordId> {
                RecordId::parse(raw).map(Self)
            }

            /// Generate a fresh identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(RecordId::generate())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<RecordId> for $name {
            fn from(id: RecordId) -> Self {
                Self(id)
            }
        }
    };
}

record_id_newtype! {
    /// Customer identifier - newtype for type safety.
    CustomerId
}

record_id_newtype! {
    /// Product identifier - newtype for type safety.
    ProductId
}

record_id_newtype! {
    /// Order identifier - newtype for type safety.
    OrderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_24_hex_chars() {
        let id = RecordId::parse("65a1b2c3d4e5f6a7b8c9d0e1").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn parse_normalizes_case() {
        let id = RecordId::parse("65A1B2C3D4E5F6A7B8C9D0E1").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(RecordId::parse("not-an-id").is_err());
        assert!(RecordId::parse("65a1b2c3d4e5f6a7b8c9d0e").is_err());
        assert!(RecordId::parse("65a1b2c3d4e5f6a7b8c9d0e1ff").is_err());
        assert!(RecordId::parse("65a1b2c3d4e5f6a7b8c9d0zz").is_err());
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert!(RecordId::parse(a.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn typed_ids_do_not_cross() {
        let raw = "65a1b2c3d4e5f6a7b8c9d0e1";
        let customer = CustomerId::parse(raw).unwrap();
        let product = ProductId::parse(raw).unwrap();
        assert_eq!(customer.as_str(), product.as_str());
    }
}
