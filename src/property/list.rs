//! List properties: ordered collections of schema-conforming objects.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::container::Container;
use crate::schema::Schema;

use super::dto::{Dto, NAME_KEY};
use super::errors::{PropertyError, PropertyResult};
use super::object::ObjectProperty;

/// An ordered list of object properties, all conforming to one value
/// schema fixed at construction.
///
/// Items are uniquely named; positional access goes through the order the
/// backing container maintains.
#[derive(Debug, Clone, PartialEq)]
pub struct ListProperty {
    name: String,
    value_schema: Arc<Schema>,
    items: Container<ObjectProperty>,
}

impl ListProperty {
    /// Create an empty list whose items conform to `value_schema`
    pub fn new(name: impl Into<String>, value_schema: Arc<Schema>) -> Self {
        Self {
            name: name.into(),
            value_schema,
            items: Container::ordered(),
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema every item conforms to
    pub fn value_schema(&self) -> &Arc<Schema> {
        &self.value_schema
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at a position, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&ObjectProperty> {
        let name = self.items.keys().into_iter().nth(index)?;
        self.items.get(&name)
    }

    /// Mutable item at a position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ObjectProperty> {
        let name = self.items.keys().into_iter().nth(index)?;
        self.items.get_mut(&name)
    }

    /// Remove the item at a position, returning it.
    pub fn remove(&mut self, index: usize) -> PropertyResult<ObjectProperty> {
        let name = self
            .items
            .keys()
            .into_iter()
            .nth(index)
            .ok_or(PropertyError::IndexOutOfBounds(index))?;
        Ok(self.items.remove(&name)?)
    }

    /// True when an item of that name exists
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.has_child(name)
    }

    /// Item by name, or `None` when absent.
    pub fn child(&self, name: &str) -> Option<&ObjectProperty> {
        self.items.get(name)
    }

    /// Item names in list order
    pub fn names(&self) -> Vec<String> {
        self.items.keys()
    }

    /// Iterate the items in list order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectProperty> {
        self.items.children()
    }

    /// Append a new empty item of the declared value schema.
    ///
    /// The item gets a fresh generated name; the returned reference lets
    /// the caller populate it in place.
    pub fn add_value(&mut self) -> PropertyResult<&mut ObjectProperty> {
        let name = Uuid::new_v4().simple().to_string();
        self.add_named(name)
    }

    /// Append a new empty item under an explicit name.
    pub fn add_named(&mut self, name: impl Into<String>) -> PropertyResult<&mut ObjectProperty> {
        let name = name.into();
        let item = ObjectProperty::new(name.as_str(), self.value_schema.clone());
        self.items.insert(name.clone(), item)?;
        // Present: just inserted above.
        Ok(self.items.get_mut(&name).expect("inserted item"))
    }

    /// Marshal the list into a sequence of item DTOs in list order.
    ///
    /// Every entry carries its item's name under the reserved name key.
    pub fn get_dto(&self) -> Dto {
        Dto::List(self.items.children().map(ObjectProperty::get_dto).collect())
    }

    /// Apply a sequence of mapping DTOs onto the list.
    ///
    /// Entries naming an existing item update it in place, entries naming
    /// an unknown item create it under that name, and nameless entries
    /// create fresh items. Current items not named by any entry are
    /// removed, and the list is reordered to the entry sequence. A
    /// non-mapping entry fails with [`PropertyError::InvalidEntry`].
    pub fn set_dto(&mut self, dto: &Dto) -> PropertyResult<()> {
        let entries = dto.as_list().ok_or_else(|| PropertyError::TypeMismatch {
            field: self.name.clone(),
            expected: "list",
            got: dto.kind_name(),
        })?;

        // Phase 1: names explicitly kept by the incoming entries.
        let mut kept = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let map = entry.as_map().ok_or(PropertyError::InvalidEntry {
                index,
                kind: entry.kind_name(),
            })?;
            match map.get(NAME_KEY) {
                Some(name_entry) => {
                    let name = name_entry.as_str().ok_or(PropertyError::InvalidEntry {
                        index,
                        kind: name_entry.kind_name(),
                    })?;
                    kept.insert(name.to_string());
                }
                None => {}
            }
        }

        // Phase 2: drop current items the entries do not keep.
        for name in self.items.keys() {
            if !kept.contains(&name) {
                self.items.remove(&name)?;
            }
        }

        // Phase 3: update kept items, create the rest, record final names.
        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            // Validated as a map in phase 1.
            let map = entry.as_map().expect("map entry");
            let name = match map.get(NAME_KEY).and_then(Dto::as_str) {
                Some(name) => {
                    if !self.items.has_child(name) {
                        self.add_named(name)?;
                    }
                    name.to_string()
                }
                None => self.add_value()?.name().to_string(),
            };
            // Present: ensured just above.
            let item = self.items.get_mut(&name).expect("list item");
            item.set_dto(entry)?;
            names.push(name);
        }

        // Phase 4: order exactly as the entries arrived.
        self.items.reorder(&names)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item_schema() -> Arc<Schema> {
        let mut fields = BTreeMap::new();
        fields.insert("v".into(), crate::schema::FieldDef::int());
        Arc::new(Schema::new("item", fields))
    }

    fn entry(name: Option<&str>, v: i64) -> Dto {
        let mut map = BTreeMap::new();
        if let Some(name) = name {
            map.insert(NAME_KEY.to_string(), Dto::string(name));
        }
        map.insert("v".to_string(), Dto::int(v));
        Dto::Map(map)
    }

    #[test]
    fn test_add_value_creates_typed_items() {
        let mut list = ListProperty::new("entries", item_schema());
        let item = list.add_value().unwrap();
        assert_eq!(item.type_name(), "item");
        assert!(!item.name().is_empty());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_positional_access_and_removal() {
        let mut list = ListProperty::new("entries", item_schema());
        list.add_named("a").unwrap().set_property("v", 1i64);
        list.add_named("b").unwrap().set_property("v", 2i64);

        assert_eq!(list.get(0).unwrap().name(), "a");
        assert_eq!(list.get(1).unwrap().name(), "b");
        assert!(list.get(2).is_none());

        let removed = list.remove(0).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.remove(5),
            Err(PropertyError::IndexOutOfBounds(5))
        );
    }

    #[test]
    fn test_set_dto_names_and_creates() {
        let mut list = ListProperty::new("entries", item_schema());
        let input = Dto::List(vec![entry(Some("x"), 1), entry(None, 2)]);
        list.set_dto(&input).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().name(), "x");
        assert_eq!(
            list.get(0).unwrap().property("v").unwrap().as_scalar(),
            Some(&crate::property::Scalar::Int(1))
        );
        let fresh = list.get(1).unwrap();
        assert!(!fresh.name().is_empty());
        assert_eq!(
            fresh.property("v").unwrap().as_scalar(),
            Some(&crate::property::Scalar::Int(2))
        );

        // The produced DTO carries both entries, in order, with names.
        let out = list.get_dto();
        let entries = out.as_list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].as_map().unwrap().get(NAME_KEY),
            Some(&Dto::string("x"))
        );
        assert_eq!(
            entries[1].as_map().unwrap().get(NAME_KEY).and_then(Dto::as_str),
            Some(fresh.name())
        );
    }

    #[test]
    fn test_set_dto_removes_unkept_items() {
        let mut list = ListProperty::new("entries", item_schema());
        list.set_dto(&Dto::List(vec![
            entry(Some("a"), 1),
            entry(Some("b"), 2),
            entry(Some("c"), 3),
        ]))
        .unwrap();

        // Keep "c" and "a", in that order; "b" goes away.
        list.set_dto(&Dto::List(vec![entry(Some("c"), 30), entry(Some("a"), 10)]))
            .unwrap();

        assert_eq!(list.names(), vec!["c", "a"]);
        assert_eq!(
            list.get(0).unwrap().property("v").unwrap().as_scalar(),
            Some(&crate::property::Scalar::Int(30))
        );
    }

    #[test]
    fn test_set_dto_roundtrip_preserves_order() {
        let mut list = ListProperty::new("entries", item_schema());
        let input = Dto::List(vec![entry(Some("b"), 2), entry(Some("a"), 1)]);
        list.set_dto(&input).unwrap();

        assert_eq!(list.get_dto(), input);
    }

    #[test]
    fn test_set_dto_rejects_non_map_entry() {
        let mut list = ListProperty::new("entries", item_schema());
        let result = list.set_dto(&Dto::List(vec![entry(Some("a"), 1), Dto::int(2)]));
        assert_eq!(
            result,
            Err(PropertyError::InvalidEntry {
                index: 1,
                kind: "int",
            })
        );
    }

    #[test]
    fn test_set_dto_rejects_non_list() {
        let mut list = ListProperty::new("entries", item_schema());
        assert!(matches!(
            list.set_dto(&Dto::Map(BTreeMap::new())),
            Err(PropertyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_contains_and_child() {
        let mut list = ListProperty::new("entries", item_schema());
        list.add_named("a").unwrap();
        assert!(list.contains_name("a"));
        assert!(!list.contains_name("z"));
        assert_eq!(list.child("a").unwrap().name(), "a");
    }
}
