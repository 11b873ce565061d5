use html_escape::decode_html_entities;
use serde_json::{Map, Value};
use tracing::warn;

use crate::projector::FieldProjector;
use search_reindexer_shared::{Document, FieldBinding, FieldSpec, Record, ID_ATTRIBUTE};

/// Projects only the fields of a resolved [`FieldSpec`].
///
/// Simple fields are copied flat; composite fields become a nested object
/// keyed by attribute name. Attributes missing from the record are left out
/// with a warning. String values have their HTML character entities decoded.
#[derive(Debug, Clone)]
pub struct SchemaDrivenProjector {
    spec: FieldSpec,
}

impl SchemaDrivenProjector {
    pub fn new(spec: FieldSpec) -> Self {
        Self { spec }
    }

    fn present<'r>(record: &'r Record, attribute: &str) -> Option<&'r Value> {
        let value = record.attribute(attribute);
        if value.is_none() {
            warn!(
                collection = %record.collection,
                record_id = %record.id,
                attribute = %attribute,
                "Attribute does not exist"
            );
        }
        value
    }
}

/// Decode HTML character entities in strings; other values pass through.
pub(crate) fn normalize(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(decode_html_entities(text).into_owned()),
        other => other.clone(),
    }
}

impl FieldProjector for SchemaDrivenProjector {
    fn project(&self, record: &Record) -> Document {
        let mut document = Document::new();

        for (name, binding) in self.spec.iter() {
            match binding {
                FieldBinding::Simple => {
                    if name == ID_ATTRIBUTE {
                        continue;
                    }
                    if let Some(value) = Self::present(record, name) {
                        document.insert(name.to_string(), normalize(value));
                    }
                }
                FieldBinding::Composite(attributes) => {
                    let mut nested = Map::new();
                    for attribute in attributes {
                        if let Some(value) = Self::present(record, attribute) {
                            nested.insert(attribute.clone(), normalize(value));
                        }
                    }
                    if !nested.is_empty() {
                        document.insert(name.to_string(), Value::Object(nested));
                    }
                }
            }
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accounts_spec() -> FieldSpec {
        let mut spec = FieldSpec::new();
        spec.push_simple("name");
        spec.push_composite(
            "address_street",
            vec![
                "billing_address_street".to_string(),
                "shipping_address_street".to_string(),
            ],
        );
        spec.push_simple("website");
        spec
    }

    #[test]
    fn test_projects_declared_fields_only() {
        let record = Record::new("Accounts", "42")
            .with_attribute("id", "42")
            .with_attribute("name", "Acme")
            .with_attribute("billing_address_street", "1 Main St")
            .with_attribute("shipping_address_street", "2 Dock Rd")
            .with_attribute("website", "acme.example")
            .with_attribute("annual_revenue", "1M");

        let document = SchemaDrivenProjector::new(accounts_spec()).project(&record);

        assert_eq!(
            Value::Object(document),
            json!({
                "name": "Acme",
                "address_street": {
                    "billing_address_street": "1 Main St",
                    "shipping_address_street": "2 Dock Rd"
                },
                "website": "acme.example"
            })
        );
    }

    #[test]
    fn test_missing_attributes_are_omitted() {
        let record = Record::new("Accounts", "42")
            .with_attribute("name", "Acme")
            .with_attribute("shipping_address_street", "2 Dock Rd")
            .with_attribute("website", Value::Null);

        let document = SchemaDrivenProjector::new(accounts_spec()).project(&record);

        assert_eq!(
            Value::Object(document),
            json!({
                "name": "Acme",
                "address_street": {"shipping_address_street": "2 Dock Rd"}
            })
        );
    }

    #[test]
    fn test_composite_without_any_attribute_is_omitted() {
        let record = Record::new("Accounts", "42").with_attribute("name", "Acme");

        let document = SchemaDrivenProjector::new(accounts_spec()).project(&record);

        assert!(!document.contains_key("address_street"));
        assert!(!document.contains_key("website"));
    }

    #[test]
    fn test_decodes_html_entities() {
        let record = Record::new("Accounts", "42")
            .with_attribute("name", "Smith &amp; Sons &#39;Caf&#233;&#39;")
            .with_attribute("billing_address_street", "R&#xE9;publique")
            .with_attribute("website", 42);

        let document = SchemaDrivenProjector::new(accounts_spec()).project(&record);

        assert_eq!(document["name"], json!("Smith & Sons 'Café'"));
        assert_eq!(
            document["address_street"]["billing_address_street"],
            json!("République")
        );
        assert_eq!(document["website"], json!(42));
    }

    #[test]
    fn test_identifier_never_projected() {
        let mut spec = FieldSpec::new();
        spec.push_simple("id");
        spec.push_simple("name");

        let record = Record::new("Accounts", "42")
            .with_attribute("id", "42")
            .with_attribute("name", "Acme");

        let document = SchemaDrivenProjector::new(spec).project(&record);

        assert_eq!(Value::Object(document), json!({"name": "Acme"}));
    }
}
