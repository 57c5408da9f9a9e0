//! Generic named-child holder.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashSet};

use super::errors::{ContainerError, ContainerResult};

/// Membership knowledge for one name of a lazily-populated container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyState {
    /// Never asked the storage collaborator about this name.
    Unknown,
    /// Present in the in-memory mapping.
    Loaded,
    /// The storage collaborator affirmed the name does not exist.
    ConfirmedAbsent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LazyChildren {
    loaded: HashSet<String>,
    missing: HashSet<String>,
}

/// Holder of uniquely-named children, ordered or not.
///
/// Unordered containers may additionally run in lazy mode: membership for
/// names not yet seen is Unknown until the owning workspace consults the
/// storage collaborator and records the outcome here.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    children: BTreeMap<String, T>,
    order: Option<Vec<String>>,
    lazy: Option<LazyChildren>,
}

impl<T> Container<T> {
    /// Create an ordered container
    pub fn ordered() -> Self {
        Self {
            children: BTreeMap::new(),
            order: Some(Vec::new()),
            lazy: None,
        }
    }

    /// Create an unordered, eagerly-populated container
    pub fn unordered() -> Self {
        Self {
            children: BTreeMap::new(),
            order: None,
            lazy: None,
        }
    }

    /// Create an unordered container with lazy-membership tracking
    pub fn unordered_lazy() -> Self {
        Self {
            children: BTreeMap::new(),
            order: None,
            lazy: Some(LazyChildren::default()),
        }
    }

    /// True when the container maintains an explicit order
    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    /// True when the container tracks lazy membership
    pub fn is_lazy(&self) -> bool {
        self.lazy.is_some()
    }

    /// Look up a child by name, or `None` when absent in memory.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.children.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.children.get_mut(name)
    }

    /// Look up a child by name.
    pub fn get_child(&self, name: &str) -> ContainerResult<&T> {
        self.children
            .get(name)
            .ok_or_else(|| ContainerError::ChildNotFound(name.to_string()))
    }

    /// True when a child of that name is present in memory
    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// True when any child is present
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of children present in memory
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when no child is present
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child names in canonical order: explicit order when ordered,
    /// name order otherwise.
    pub fn keys(&self) -> Vec<String> {
        match &self.order {
            Some(order) => order.clone(),
            None => self.children.keys().cloned().collect(),
        }
    }

    /// Iterate the children in canonical order. Each call starts a fresh
    /// traversal.
    pub fn children(&self) -> Children<'_, T> {
        let inner = match &self.order {
            Some(order) => ChildrenInner::Ordered {
                order: order.iter(),
                children: &self.children,
            },
            None => ChildrenInner::Unordered(self.children.values()),
        };
        Children { inner }
    }

    /// Insert a child under a name; a taken name is rejected.
    pub fn insert(&mut self, name: impl Into<String>, child: T) -> ContainerResult<()> {
        let name = name.into();
        if self.children.contains_key(&name) {
            return Err(ContainerError::DuplicateChild(name));
        }
        if let Some(order) = &mut self.order {
            order.push(name.clone());
        }
        if let Some(lazy) = &mut self.lazy {
            lazy.loaded.insert(name.clone());
            lazy.missing.remove(&name);
        }
        self.children.insert(name, child);
        Ok(())
    }

    /// Remove a child by name, returning it so the caller can complete the
    /// detach.
    pub fn remove(&mut self, name: &str) -> ContainerResult<T> {
        let child = self
            .children
            .remove(name)
            .ok_or_else(|| ContainerError::ChildNotFound(name.to_string()))?;
        if let Some(order) = &mut self.order {
            order.retain(|entry| entry != name);
        }
        if let Some(lazy) = &mut self.lazy {
            // Removal is in-session knowledge: the name is now known absent.
            lazy.loaded.remove(name);
            lazy.missing.insert(name.to_string());
        }
        Ok(child)
    }

    /// Remove every child.
    ///
    /// A cleared container is definitively empty, so lazy tracking is
    /// dropped: no later lookup may resurrect a child from storage.
    pub fn clear(&mut self) {
        self.children.clear();
        if let Some(order) = &mut self.order {
            order.clear();
        }
        self.lazy = None;
    }

    /// Replace the order with a permutation of the current names.
    ///
    /// Unordered containers reject the call; a non-permutation leaves the
    /// current order untouched.
    pub fn reorder(&mut self, names: &[String]) -> ContainerResult<()> {
        let order = self.order.as_mut().ok_or(ContainerError::Unordered)?;
        let current: HashSet<&String> = order.iter().collect();
        let requested: HashSet<&String> = names.iter().collect();
        if current != requested || names.len() != order.len() {
            return Err(ContainerError::ReorderMismatch {
                have: order.clone(),
                got: names.to_vec(),
            });
        }
        *order = names.to_vec();
        Ok(())
    }

    /// Membership knowledge for a name.
    ///
    /// Eager containers have complete knowledge: a name is Loaded or
    /// ConfirmedAbsent. Lazy containers report Unknown until the name has
    /// been inserted, removed, or marked missing.
    pub fn lazy_state(&self, name: &str) -> LazyState {
        if self.children.contains_key(name) {
            return LazyState::Loaded;
        }
        match &self.lazy {
            None => LazyState::ConfirmedAbsent,
            Some(lazy) if lazy.missing.contains(name) => LazyState::ConfirmedAbsent,
            Some(lazy) if lazy.loaded.contains(name) => LazyState::Loaded,
            Some(_) => LazyState::Unknown,
        }
    }

    /// Record that the storage collaborator affirmed a name is absent.
    pub fn mark_missing(&mut self, name: impl Into<String>) {
        if let Some(lazy) = &mut self.lazy {
            lazy.missing.insert(name.into());
        }
    }
}

/// Fresh, finite traversal of a container's children in canonical order.
pub struct Children<'a, T> {
    inner: ChildrenInner<'a, T>,
}

enum ChildrenInner<'a, T> {
    Ordered {
        order: std::slice::Iter<'a, String>,
        children: &'a BTreeMap<String, T>,
    },
    Unordered(btree_map::Values<'a, String, T>),
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            ChildrenInner::Ordered { order, children } => {
                // The order sequence and the mapping hold the same names.
                order.next().map(|name| &children[name])
            }
            ChildrenInner::Unordered(values) => values.next(),
        }
    }
}
