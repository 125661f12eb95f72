//! Product identifiers.

use core::borrow::Borrow;
use serde::{Deserialize, Serialize};

/// Opaque identifier naming one product line.
///
/// Any string is accepted; two identifiers are the same product iff the
/// strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookups_work_with_plain_str() {
        let mut map = HashMap::new();
        map.insert(ProductId::from("WROCLOVE2014"), 10);

        assert_eq!(map.get("WROCLOVE2014"), Some(&10));
        assert_eq!(map.get("DRUGCAMP2015"), None);
    }

    #[test]
    fn serializes_as_a_bare_string() {
        let id = ProductId::new("SKU-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"SKU-1\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_string_is_a_valid_identifier() {
        let id = ProductId::from("");
        assert_eq!(id.as_str(), "");
        assert_eq!(id.to_string(), "");
    }
}
