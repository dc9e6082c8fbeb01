//! Keyed collections of structured objects

use crate::codec::{split_documents, ObjectDecoder, TypeRegistry};
use crate::errors::ExError;
use crate::model::identity::ObjectIdentity;
use crate::model::object::StructuredObject;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping from identity to object
///
/// Backed by a `BTreeMap` so iteration, and everything derived from it, is
/// deterministic. Inserting an identity twice replaces the earlier object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSet {
    objects: BTreeMap<ObjectIdentity, StructuredObject>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode multi-document YAML into a set
    ///
    /// Convenient for building expected sets. Later documents replace earlier
    /// ones with the same identity.
    ///
    /// # Errors
    ///
    /// Any decode-class error from [`ObjectDecoder::decode`].
    pub fn from_yaml(registry: &TypeRegistry, text: &str) -> Result<Self, ExError> {
        let decoder = ObjectDecoder::new(registry);
        split_documents(text).map(|doc| decoder.decode(doc)).collect()
    }

    /// Insert an object under its own identity
    ///
    /// Returns the object previously stored under that identity, if any.
    pub fn insert(&mut self, object: StructuredObject) -> Option<StructuredObject> {
        self.objects.insert(object.identity(), object)
    }

    pub fn get(&self, identity: &ObjectIdentity) -> Option<&StructuredObject> {
        self.objects.get(identity)
    }

    pub fn contains(&self, identity: &ObjectIdentity) -> bool {
        self.objects.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn identities(&self) -> impl Iterator<Item = &ObjectIdentity> {
        self.objects.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ObjectIdentity, StructuredObject> {
        self.objects.iter()
    }
}

impl FromIterator<StructuredObject> for ObjectSet {
    fn from_iter<I: IntoIterator<Item = StructuredObject>>(iter: I) -> Self {
        let mut set = ObjectSet::new();
        for object in iter {
            set.insert(object);
        }
        set
    }
}

impl Extend<StructuredObject> for ObjectSet {
    fn extend<I: IntoIterator<Item = StructuredObject>>(&mut self, iter: I) {
        for object in iter {
            self.insert(object);
        }
    }
}

impl IntoIterator for ObjectSet {
    type Item = (ObjectIdentity, StructuredObject);
    type IntoIter = btree_map::IntoIter<ObjectIdentity, StructuredObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectSet {
    type Item = (&'a ObjectIdentity, &'a StructuredObject);
    type IntoIter = btree_map::Iter<'a, ObjectIdentity, StructuredObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
