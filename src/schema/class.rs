//! Implementation-class handles.
//!
//! A [`DocClass`] names the concrete behavior a consumer attaches to
//! documents of a schema. Classes form a single-inheritance lineage; the
//! registry resolves a schema name to the most specific registered class,
//! and specificity checks between classes walk this lineage.
//!
//! The handle is deliberately opaque: dispatching on a resolved class is
//! the consumer's concern, not the model's.

use std::fmt;
use std::sync::Arc;

/// Cheap-clone class handle with an optional parent lineage.
#[derive(Debug, Clone)]
pub struct DocClass(Arc<ClassInner>);

#[derive(Debug)]
struct ClassInner {
    name: String,
    parent: Option<DocClass>,
}

impl DocClass {
    /// Create a root class with no parent
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            name: name.into(),
            parent: None,
        }))
    }

    /// Create a class whose parent is `self`
    pub fn subclass(&self, name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            name: name.into(),
            parent: Some(self.clone()),
        }))
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Parent class, if any
    pub fn parent(&self) -> Option<&DocClass> {
        self.0.parent.as_ref()
    }

    /// True when `self` is `other` or descends from it.
    pub fn is_subclass_of(&self, other: &DocClass) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// True when `self` strictly descends from `other`.
    pub fn is_strict_subclass_of(&self, other: &DocClass) -> bool {
        self != other && self.is_subclass_of(other)
    }
}

impl PartialEq for DocClass {
    fn eq(&self, other: &Self) -> bool {
        // Same Arc, or same name lineage.
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        self.0.name == other.0.name
            && match (&self.0.parent, &other.0.parent) {
                (None, None) => true,
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
    }
}

impl Eq for DocClass {}

impl fmt::Display for DocClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineage() {
        let base = DocClass::new("Document");
        let folder = base.subclass("Folder");
        let workspace = folder.subclass("Workspace");

        assert!(workspace.is_subclass_of(&workspace));
        assert!(workspace.is_subclass_of(&folder));
        assert!(workspace.is_subclass_of(&base));
        assert!(!base.is_subclass_of(&folder));

        assert!(workspace.is_strict_subclass_of(&base));
        assert!(!workspace.is_strict_subclass_of(&workspace));
    }

    #[test]
    fn test_equality_by_lineage() {
        let a = DocClass::new("Document").subclass("Folder");
        let b = DocClass::new("Document").subclass("Folder");
        let c = DocClass::new("Other").subclass("Folder");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unrelated_classes() {
        let a = DocClass::new("A");
        let b = DocClass::new("B");
        assert!(!a.is_subclass_of(&b));
        assert!(!b.is_subclass_of(&a));
    }
}
