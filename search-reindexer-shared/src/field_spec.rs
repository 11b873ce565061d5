//! Resolved field specifications for schema-driven projection.

use serde::{Deserialize, Serialize};

/// How a logical field is sourced from record attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldBinding {
    /// The logical field name is itself the sole attribute; projected flat.
    Simple,
    /// The field is built from an ordered list of attributes; projected as a
    /// nested object keyed by attribute name.
    Composite(Vec<String>),
}

/// Ordered mapping of logical field name to the attribute(s) it is built from.
///
/// Every field maps to at least one attribute. Built once per collection by
/// the schema resolver and shared, unchanged, by every record of that
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    fields: Vec<(String, FieldBinding)>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose sole attribute is its own name.
    pub fn push_simple(&mut self, name: impl Into<String>) {
        self.fields.push((name.into(), FieldBinding::Simple));
    }

    /// Add a field built from the given attributes.
    ///
    /// An empty attribute list degrades to a simple field so that the
    /// at-least-one-attribute invariant always holds.
    pub fn push_composite(&mut self, name: impl Into<String>, attributes: Vec<String>) {
        let binding = if attributes.is_empty() {
            FieldBinding::Simple
        } else {
            FieldBinding::Composite(attributes)
        };
        self.fields.push((name.into(), binding));
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldBinding)> {
        self.fields.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    /// Logical field names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_kept() {
        let mut spec = FieldSpec::new();
        spec.push_simple("name");
        spec.push_composite(
            "address_street",
            vec!["billing_address_street".to_string(), "shipping_address_street".to_string()],
        );
        spec.push_simple("email");

        assert_eq!(spec.names(), vec!["name", "address_street", "email"]);
        let bindings: Vec<&FieldBinding> = spec.iter().map(|(_, binding)| binding).collect();
        assert_eq!(bindings[0], &FieldBinding::Simple);
        assert_eq!(
            bindings[1],
            &FieldBinding::Composite(vec![
                "billing_address_street".to_string(),
                "shipping_address_street".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_composite_becomes_simple() {
        let mut spec = FieldSpec::new();
        spec.push_composite("website", vec![]);

        let (_, binding) = spec.iter().next().unwrap();
        assert_eq!(binding, &FieldBinding::Simple);
    }
}
