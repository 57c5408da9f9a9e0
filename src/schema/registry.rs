//! Schema registry: name → schema bindings and schema → class resolution.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::class::DocClass;
use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Registry of schemas and their implementation classes.
///
/// Registration happens during a single bootstrap phase and takes
/// `&mut self`; lookups are read-only and may be shared afterwards. The
/// class-resolution cache makes registration O(1) amortized and resolution
/// O(k) in the number of registered classes on a miss.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// All bindings, canonical names and aliases alike
    schemas: BTreeMap<String, Arc<Schema>>,
    /// Explicit class bindings by registered schema name
    classes: BTreeMap<String, DocClass>,
    /// Fallback for schemas without an explicit binding
    default_class: Option<DocClass>,
    /// Memoized `get_class` results, cleared on every registration
    resolved: RwLock<HashMap<String, DocClass>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under `name`.
    ///
    /// When the schema's canonical name differs from `name`, it is also
    /// registered under the canonical name; `name` then acts as an alias.
    /// Binding a taken name to a different schema fails with
    /// [`SchemaError::DuplicateSchema`]; re-binding an identical schema is
    /// a no-op.
    pub fn add_schema(&mut self, name: impl Into<String>, schema: Arc<Schema>) -> SchemaResult<()> {
        let name = name.into();
        let mut keys = vec![name.clone()];
        if schema.name() != name {
            keys.push(schema.name().to_string());
        }

        // Validate every key before touching the map, so a rejected
        // registration leaves no partial state behind.
        let mut missing = Vec::new();
        for key in &keys {
            match self.schemas.get(key) {
                Some(existing) if Self::same_schema(existing, &schema) => {}
                Some(_) => return Err(SchemaError::DuplicateSchema(key.clone())),
                None => missing.push(key.clone()),
            }
        }
        if missing.is_empty() {
            return Ok(());
        }

        for key in missing {
            debug!(schema = %schema.name(), name = %key, "registered schema");
            self.schemas.insert(key, schema.clone());
        }
        self.invalidate();
        Ok(())
    }

    /// Look up a schema by name, or `None` when absent.
    pub fn schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Look up a schema by name.
    pub fn get_schema(&self, name: &str) -> SchemaResult<Arc<Schema>> {
        self.schema(name)
            .ok_or_else(|| SchemaError::SchemaNotFound(name.to_string()))
    }

    /// Snapshot of the canonically-registered schemas, aliases excluded.
    pub fn get_schemas(&self) -> BTreeMap<String, Arc<Schema>> {
        self.schemas
            .iter()
            .filter(|(name, schema)| name.as_str() == schema.name())
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect()
    }

    /// Number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Bind an implementation class to a registered schema name.
    ///
    /// Bindings only gain specificity: re-binding the identical class is a
    /// no-op, binding a strict ancestor of the current class fails with
    /// [`SchemaError::ClassRedefinition`], and any other class replaces the
    /// binding and invalidates the resolution cache.
    pub fn set_class(&mut self, name: &str, class: DocClass) -> SchemaResult<()> {
        if !self.schemas.contains_key(name) {
            return Err(SchemaError::SchemaNotFound(name.to_string()));
        }
        match self.classes.get(name) {
            Some(existing) if *existing == class => return Ok(()),
            Some(existing) if existing.is_strict_subclass_of(&class) => {
                return Err(SchemaError::ClassRedefinition {
                    schema: name.to_string(),
                    existing: existing.name().to_string(),
                    new: class.name().to_string(),
                });
            }
            _ => {}
        }
        debug!(schema = %name, class = %class, "registered class");
        self.classes.insert(name.to_string(), class);
        self.invalidate();
        Ok(())
    }

    /// Set the fallback class for schemas without an explicit binding.
    ///
    /// Schemas currently falling back to a previous default are pinned to
    /// that default first, so changing the fallback never rebinds them.
    pub fn set_default_class(&mut self, class: DocClass) {
        if let Some(previous) = self.default_class.take() {
            let unbound: Vec<String> = self
                .schemas
                .keys()
                .filter(|name| !self.classes.contains_key(*name))
                .cloned()
                .collect();
            for name in unbound {
                self.classes.insert(name, previous.clone());
            }
        }
        debug!(class = %class, "set default class");
        self.default_class = Some(class);
        self.invalidate();
    }

    /// Resolve the most specific class for a schema name, or `None`.
    pub fn class_of(&self, name: &str) -> Option<DocClass> {
        self.get_class(name).ok()
    }

    /// Resolve the most specific registered class for a schema name.
    ///
    /// Among every class-registered name `n` whose schema the named schema
    /// is-or-extends, the candidate whose schema is-or-extends all other
    /// candidates' schemas wins. When no candidate dominates, the deepest
    /// extension chain wins, ties broken by name — deterministic either
    /// way. Results are memoized until the next registration.
    pub fn get_class(&self, name: &str) -> SchemaResult<DocClass> {
        {
            let cache = match self.resolved.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(class) = cache.get(name) {
                return Ok(class.clone());
            }
        }

        let schema = self.get_schema(name)?;
        let mut candidates: Vec<(&Arc<Schema>, &DocClass)> = Vec::new();
        for (bound_name, class) in &self.classes {
            let target = match self.schemas.get(bound_name) {
                Some(target) => target,
                None => continue,
            };
            if schema.is_or_extends(target.name()) {
                candidates.push((target, class));
            }
        }

        let class = if candidates.is_empty() {
            self.default_class
                .clone()
                .ok_or_else(|| SchemaError::ClassNotFound(name.to_string()))?
        } else if let Some((_, class)) = candidates
            .iter()
            .find(|(schema, _)| {
                candidates
                    .iter()
                    .all(|(other, _)| schema.is_or_extends(other.name()))
            })
        {
            (*class).clone()
        } else {
            candidates.sort_by(|(a, _), (b, _)| {
                b.extension_depth()
                    .cmp(&a.extension_depth())
                    .then_with(|| a.name().cmp(b.name()))
            });
            candidates[0].1.clone()
        };

        let mut cache = match self.resolved.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.insert(name.to_string(), class.clone());
        Ok(class)
    }

    fn same_schema(a: &Arc<Schema>, b: &Arc<Schema>) -> bool {
        Arc::ptr_eq(a, b) || **a == **b
    }

    fn invalidate(&self) {
        let mut cache = match self.resolved.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.clear();
    }
}
