//! Operator access
//!
//! Operators are a static allow-list of identities (the same ids that
//! receive order notifications). Requests to operator routes name their
//! identity in the `X-Operator-Id` header.

mod extractor;

pub use extractor::{OPERATOR_HEADER, Operator};

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    ids: HashSet<String>,
}

impl OperatorRegistry {
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_operator(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_membership() {
        let registry = OperatorRegistry::new(["111".to_string(), "222".to_string()]);
        assert!(registry.is_operator("111"));
        assert!(!registry.is_operator("333"));
        assert!(!registry.is_operator(""));
        assert!(OperatorRegistry::default().is_empty());
    }
}
