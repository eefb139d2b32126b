//! Type specifiers and ordered field schemas.

use std::collections::BTreeSet;

use crate::structure::Structure;

/// The declared type of an argument or a structure field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifier {
    /// A type name resolved through the type catalog.
    Name(String),
    /// A nested structural schema.
    Structure(Structure),
    /// An inline field schema. Only meaningful inside a structure's fields.
    Inline(ObjectSchema),
}

impl TypeSpecifier {
    /// Shorthand for [`TypeSpecifier::Name`].
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The type name, if this is a name specifier.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Human-readable label used in error and log messages.
    pub fn label(&self) -> String {
        match self {
            Self::Name(n) => n.clone(),
            Self::Structure(_) => "Structure".to_string(),
            Self::Inline(_) => "object".to_string(),
        }
    }

    pub(crate) fn collect_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Name(n) => {
                out.insert(n.as_str());
            }
            Self::Structure(s) => s.collect_names(out),
            Self::Inline(schema) => schema.collect_names(out),
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Name(n) => serde_json::Value::String(n.clone()),
            Self::Structure(s) => s.to_json(),
            Self::Inline(schema) => schema.to_json(),
        }
    }
}

impl From<&str> for TypeSpecifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeSpecifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Structure> for TypeSpecifier {
    fn from(s: Structure) -> Self {
        Self::Structure(s)
    }
}

impl From<ObjectSchema> for TypeSpecifier {
    fn from(schema: ObjectSchema) -> Self {
        Self::Inline(schema)
    }
}

/// Field name → specifier, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, TypeSpecifier)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Redeclaring a name replaces its specifier in place.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<TypeSpecifier>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Insert a field. Redeclaring a name replaces its specifier in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<TypeSpecifier>) {
        let name = name.into();
        let spec = spec.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = spec,
            None => self.fields.push((name, spec)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeSpecifier> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeSpecifier)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn collect_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        for (_, spec) in &self.fields {
            spec.collect_names(out);
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(n, s)| (n.clone(), s.to_json()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for ObjectSchema
where
    K: Into<String>,
    V: Into<TypeSpecifier>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (k, v) in iter {
            schema.insert(k, v);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_declaration_order() {
        let schema = ObjectSchema::new()
            .field("name", "String")
            .field("age", "Int")
            .field("active", "Boolean");
        let names: Vec<&str> = schema.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "age", "active"]);
    }

    #[test]
    fn redeclared_field_replaces_in_place() {
        let schema = ObjectSchema::new()
            .field("a", "Int")
            .field("b", "Int")
            .field("a", "String");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.iter().next().map(|(n, _)| n), Some("a"));
        assert_eq!(schema.get("a").and_then(TypeSpecifier::as_name), Some("String"));
    }

    #[test]
    fn labels() {
        assert_eq!(TypeSpecifier::from("Int").label(), "Int");
        assert_eq!(TypeSpecifier::from(Structure::array("Int")).label(), "Structure");
        assert_eq!(TypeSpecifier::from(ObjectSchema::new()).label(), "object");
    }
}
