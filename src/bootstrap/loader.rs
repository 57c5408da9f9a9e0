//! Definition files and their registration.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::doctype::{DocType, TypeRegistry};
use crate::schema::{FieldDef, FieldKind, Schema, SchemaRegistry};

use super::errors::{BootstrapError, BootstrapResult};

/// Raw field kinds as they appear in definition files.
///
/// Complex kinds reference their schema by name; the loader resolves the
/// reference during registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKindDef {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// UTC timestamp
    Datetime,
    /// Binary payload
    Binary,
    /// Reference to another document
    Reference,
    /// Blob-plus-metadata bundle
    Resource,
    /// Nested object conforming to the named schema
    Object {
        /// Name of the schema the object conforms to
        schema: String,
    },
    /// List of objects conforming to the named item schema
    List {
        /// Name of the schema every item conforms to
        item: String,
    },
}

/// Raw field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefRaw {
    /// Field data kind
    #[serde(flatten)]
    pub kind: FieldKindDef,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
}

/// Raw schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    /// Canonical schema name
    pub name: String,
    /// Names of directly extended schemas
    #[serde(default)]
    pub extends: Vec<String>,
    /// Field definitions
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefRaw>,
    /// Extra names the schema is registered under
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Raw document-type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type name
    pub name: String,
    /// Name of the schema documents of this type conform to
    pub schema: String,
    /// Whether documents of this type hold children
    #[serde(default)]
    pub container: bool,
    /// Whether those children are ordered
    #[serde(default)]
    pub ordered: bool,
}

/// One definition file: any mix of schemas and types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDef {
    /// Schema definitions
    #[serde(default)]
    pub schemas: Vec<SchemaDef>,
    /// Type definitions
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// Loads definition files and populates the registries.
///
/// Definitions may arrive in any order and across any number of files;
/// references are resolved only at [`BootstrapLoader::register`] time.
#[derive(Debug, Default)]
pub struct BootstrapLoader {
    schemas: Vec<SchemaDef>,
    types: Vec<TypeDef>,
}

impl BootstrapLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `*.json` definition file in a directory.
    ///
    /// A missing directory simply contributes no definitions.
    pub fn load_dir(&mut self, dir: &Path) -> BootstrapResult<()> {
        if !dir.exists() {
            return Ok(());
        }
        let entries = fs::read_dir(dir).map_err(|e| BootstrapError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| BootstrapError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            self.load_file(&path)?;
        }
        Ok(())
    }

    /// Collect one definition file.
    pub fn load_file(&mut self, path: &Path) -> BootstrapResult<()> {
        let content = fs::read_to_string(path).map_err(|e| BootstrapError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let bundle: BundleDef =
            serde_json::from_str(&content).map_err(|e| BootstrapError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            path = %path.display(),
            schemas = bundle.schemas.len(),
            types = bundle.types.len(),
            "loaded definition file"
        );
        self.add_bundle(bundle);
        Ok(())
    }

    /// Collect definitions built programmatically.
    pub fn add_bundle(&mut self, bundle: BundleDef) {
        self.schemas.extend(bundle.schemas);
        self.types.extend(bundle.types);
    }

    /// Resolve every collected definition and populate the registries.
    ///
    /// Schemas already present in the registry may be referenced by the
    /// collected definitions; everything else must be defined here.
    pub fn register(
        self,
        schemas: &mut SchemaRegistry,
        types: &mut TypeRegistry,
    ) -> BootstrapResult<()> {
        let mut index: BTreeMap<String, SchemaDef> = BTreeMap::new();
        for def in self.schemas {
            if index.contains_key(&def.name) {
                return Err(BootstrapError::DuplicateDefinition(def.name));
            }
            index.insert(def.name.clone(), def);
        }

        let mut built: BTreeMap<String, Arc<Schema>> = BTreeMap::new();
        let mut building: BTreeSet<String> = BTreeSet::new();
        let names: Vec<String> = index.keys().cloned().collect();
        for name in &names {
            build_schema(name, name, &index, schemas, &mut built, &mut building)?;
        }

        for name in &names {
            // Built in the loop above.
            let schema = built.get(name).expect("built schema").clone();
            let def = index.get(name).expect("indexed schema");
            schemas.add_schema(name.clone(), schema.clone())?;
            for alias in &def.aliases {
                schemas.add_schema(alias.clone(), schema.clone())?;
            }
        }

        for def in &self.types {
            let schema = match built.get(&def.schema) {
                Some(schema) => schema.clone(),
                None => {
                    schemas
                        .schema(&def.schema)
                        .ok_or_else(|| BootstrapError::UnknownSchema {
                            referrer: def.name.clone(),
                            missing: def.schema.clone(),
                        })?
                }
            };
            let doc_type = if def.container {
                DocType::container(&def.name, schema, def.ordered)
            } else {
                DocType::new(&def.name, schema)
            };
            types.add_type(Arc::new(doc_type))?;
        }
        Ok(())
    }
}

/// Build a schema from its definition, recursing into references.
///
/// Already-registered schemas satisfy references without a definition.
fn build_schema(
    name: &str,
    referrer: &str,
    index: &BTreeMap<String, SchemaDef>,
    registry: &SchemaRegistry,
    built: &mut BTreeMap<String, Arc<Schema>>,
    building: &mut BTreeSet<String>,
) -> BootstrapResult<Arc<Schema>> {
    if let Some(schema) = built.get(name) {
        return Ok(schema.clone());
    }
    let def = match index.get(name) {
        Some(def) => def,
        None => {
            return registry
                .schema(name)
                .ok_or_else(|| BootstrapError::UnknownSchema {
                    referrer: referrer.to_string(),
                    missing: name.to_string(),
                })
        }
    };
    if !building.insert(name.to_string()) {
        return Err(BootstrapError::Cycle(name.to_string()));
    }

    let mut extends = Vec::with_capacity(def.extends.len());
    for parent in &def.extends {
        extends.push(build_schema(parent, name, index, registry, built, building)?);
    }

    let mut fields = BTreeMap::new();
    for (field_name, raw) in &def.fields {
        let kind = match &raw.kind {
            FieldKindDef::String => FieldKind::String,
            FieldKindDef::Int => FieldKind::Int,
            FieldKindDef::Float => FieldKind::Float,
            FieldKindDef::Bool => FieldKind::Bool,
            FieldKindDef::Datetime => FieldKind::DateTime,
            FieldKindDef::Binary => FieldKind::Binary,
            FieldKindDef::Reference => FieldKind::Reference,
            FieldKindDef::Resource => FieldKind::Resource,
            FieldKindDef::Object { schema } => FieldKind::Object {
                schema: build_schema(schema, name, index, registry, built, building)?,
            },
            FieldKindDef::List { item } => FieldKind::List {
                item: build_schema(item, name, index, registry, built, building)?,
            },
        };
        fields.insert(
            field_name.clone(),
            FieldDef {
                kind,
                required: raw.required,
            },
        );
    }

    building.remove(name);
    let schema = Arc::new(Schema::with_extends(name, fields, extends));
    built.insert(name.to_string(), schema.clone());
    Ok(schema)
}
