//! Schema descriptor types.
//!
//! A [`Schema`] is a named, immutable table of [`FieldDef`]s. Complex field
//! kinds carry the schema their values conform to directly, so marshalling
//! code never needs registry access to interpret a field.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Supported field kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// UTC timestamp
    DateTime,
    /// Immutable byte payload with MIME type and encoding
    Binary,
    /// Identifier-valued pointer to another document
    Reference,
    /// Blob bundled with MIME type, encoding and last-modified timestamp
    Resource,
    /// Nested object conforming to the given schema
    Object {
        /// Schema the nested object conforms to
        schema: Arc<Schema>,
    },
    /// Ordered list of objects, all conforming to one item schema
    List {
        /// Schema every list item conforms to
        item: Arc<Schema>,
    },
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::DateTime => "datetime",
            FieldKind::Binary => "binary",
            FieldKind::Reference => "reference",
            FieldKind::Resource => "resource",
            FieldKind::Object { .. } => "object",
            FieldKind::List { .. } => "list",
        }
    }
}

/// A single field definition: kind plus constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field data kind
    pub kind: FieldKind,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create an optional field of the given kind
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    /// Create a string field
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    /// Create an int field
    pub fn int() -> Self {
        Self::new(FieldKind::Int)
    }

    /// Create a float field
    pub fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    /// Create a bool field
    pub fn bool() -> Self {
        Self::new(FieldKind::Bool)
    }

    /// Create a datetime field
    pub fn datetime() -> Self {
        Self::new(FieldKind::DateTime)
    }

    /// Create a binary field
    pub fn binary() -> Self {
        Self::new(FieldKind::Binary)
    }

    /// Create a reference field
    pub fn reference() -> Self {
        Self::new(FieldKind::Reference)
    }

    /// Create a resource field
    pub fn resource() -> Self {
        Self::new(FieldKind::Resource)
    }

    /// Create a nested-object field
    pub fn object(schema: Arc<Schema>) -> Self {
        Self::new(FieldKind::Object { schema })
    }

    /// Create a list field with the given item schema
    pub fn list(item: Arc<Schema>) -> Self {
        Self::new(FieldKind::List { item })
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named, immutable descriptor of typed fields.
///
/// Schemas are shared via `Arc` and never mutated after construction.
/// The `extends` list records direct ancestors; [`Schema::is_or_extends`]
/// walks the transitive closure.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: BTreeMap<String, FieldDef>,
    extends: Vec<Arc<Schema>>,
}

impl Schema {
    /// Create a schema with no ancestors
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
            extends: Vec::new(),
        }
    }

    /// Create a schema extending the given ancestors
    pub fn with_extends(
        name: impl Into<String>,
        fields: BTreeMap<String, FieldDef>,
        extends: Vec<Arc<Schema>>,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            extends,
        }
    }

    /// Canonical name of the schema
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields declared directly on this schema
    pub fn fields(&self) -> &BTreeMap<String, FieldDef> {
        &self.fields
    }

    /// Direct ancestors
    pub fn extends(&self) -> &[Arc<Schema>] {
        &self.extends
    }

    /// Look up a field, consulting ancestors when not declared locally.
    ///
    /// A local declaration shadows any inherited one of the same name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        if let Some(def) = self.fields.get(name) {
            return Some(def);
        }
        self.extends.iter().find_map(|s| s.field(name))
    }

    /// True when this schema is, or transitively extends, `name`.
    pub fn is_or_extends(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        self.extends.iter().any(|s| s.is_or_extends(name))
    }

    /// Length of the longest extension chain rooted here.
    pub fn extension_depth(&self) -> usize {
        self.extends
            .iter()
            .map(|s| s.extension_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Arc<Schema> {
        let mut fields = BTreeMap::new();
        fields.insert("title".into(), FieldDef::string().required());
        Arc::new(Schema::new("base", fields))
    }

    #[test]
    fn test_field_lookup_consults_ancestors() {
        let base = base();
        let mut fields = BTreeMap::new();
        fields.insert("count".into(), FieldDef::int());
        let derived = Schema::with_extends("derived", fields, vec![base]);

        assert!(derived.field("count").is_some());
        assert!(derived.field("title").is_some());
        assert!(derived.field("missing").is_none());
    }

    #[test]
    fn test_local_field_shadows_inherited() {
        let base = base();
        let mut fields = BTreeMap::new();
        fields.insert("title".into(), FieldDef::int());
        let derived = Schema::with_extends("derived", fields, vec![base]);

        let def = derived.field("title").unwrap();
        assert_eq!(def.kind.kind_name(), "int");
    }

    #[test]
    fn test_is_or_extends_transitive() {
        let base = base();
        let mid = Arc::new(Schema::with_extends(
            "mid",
            BTreeMap::new(),
            vec![base.clone()],
        ));
        let leaf = Schema::with_extends("leaf", BTreeMap::new(), vec![mid]);

        assert!(leaf.is_or_extends("leaf"));
        assert!(leaf.is_or_extends("mid"));
        assert!(leaf.is_or_extends("base"));
        assert!(!leaf.is_or_extends("other"));
        assert!(!base.is_or_extends("leaf"));
    }

    #[test]
    fn test_extension_depth() {
        let base = base();
        let mid = Arc::new(Schema::with_extends(
            "mid",
            BTreeMap::new(),
            vec![base.clone()],
        ));
        let leaf = Schema::with_extends("leaf", BTreeMap::new(), vec![mid]);

        assert_eq!(base.extension_depth(), 0);
        assert_eq!(leaf.extension_depth(), 2);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::String.kind_name(), "string");
        assert_eq!(FieldKind::Resource.kind_name(), "resource");
        assert_eq!(
            FieldKind::List { item: base() }.kind_name(),
            "list"
        );
    }
}
