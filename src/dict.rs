use crate::{
    node::{ClonedNodeIterator, Node, NodeIterator},
    DEFAULT_BREADTH,
};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug, Display, Formatter},
    hash::BuildHasher,
    sync::Arc,
};

/// Persistent map from strings to values.
///
/// Every method leaves the original dictionary untouched and returns a new
/// one if necessary. New dictionaries share all unmodified sub-tries with the
/// ones they are derived from, so cloning and updating are cheap.
///
/// `B` is the breadth of trie nodes. Larger breadths make shallower tries
/// with more memory per node.
pub struct Dict<V, const B: usize = DEFAULT_BREADTH> {
    size: usize,
    root: Arc<Node<V, B>>,
}

impl<V> Dict<V> {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dictionary. An alias of [`Dict::new`].
    pub fn empty() -> Self {
        Self::default()
    }
}

impl<V: Clone> Dict<V> {
    /// Creates a dictionary from key-value pairs. Later pairs win over earlier
    /// ones with the same key.
    pub fn of<K: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Creates a dictionary from key-value pairs. The same as [`Dict::of`].
    pub fn from_entries<K: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::of(pairs)
    }
}

impl<V, const B: usize> Dict<V, B> {
    /// The breadth of trie nodes.
    pub const BREADTH: usize = B;

    /// Gets a value of a key if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.root.get(key)
    }

    /// Checks if a key is bound.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a number of bindings.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if a dictionary has no binding.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns key-value pairs in trie order.
    ///
    /// The order is neither insertion nor key order. Call it again to
    /// restart.
    pub fn iter(&self) -> NodeIterator<'_, V, B> {
        self.root.as_ref().into_iter()
    }

    /// Returns key-value pairs in trie order. The same as [`Dict::iter`].
    pub fn entries(&self) -> NodeIterator<'_, V, B> {
        self.iter()
    }

    /// Returns keys in trie order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns values in trie order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Visits key-value pairs in trie order.
    pub fn for_each(&self, mut visit: impl FnMut(&str, &V)) {
        for (key, value) in self {
            visit(key, value);
        }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Arc<Node<V, B>> {
        &self.root
    }
}

impl<V: Clone, const B: usize> Dict<V, B> {
    /// Binds a value to a key.
    #[must_use]
    pub fn set(&self, key: impl Into<String>, value: V) -> Self {
        let (root, ok) = self.root.set(key.into(), value);

        Self {
            size: self.size + usize::from(ok),
            root: root.into(),
        }
    }

    /// Unbinds a key if any.
    ///
    /// If the key is absent, the returned dictionary shares its root with the
    /// original one.
    #[must_use]
    pub fn delete(&self, key: &str) -> Self {
        if let Some(root) = self.root.delete(key) {
            Self {
                size: self.size - 1,
                root: root.into(),
            }
        } else {
            self.clone()
        }
    }

    /// Merges two dictionaries.
    ///
    /// Keys bound in only one of them keep their values. For keys bound in
    /// both, the binding nearer to the trie root wins, and `self` wins ties.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if other.is_empty() || Arc::ptr_eq(&self.root, &other.root) {
            return self.clone();
        } else if self.is_empty() {
            return other.clone();
        }

        let (root, shared) = self.root.merge(&other.root);

        Self {
            size: self.size + other.size - shared,
            root: root.into(),
        }
    }

    /// Merges two dictionaries. An alias of [`Dict::merge`].
    #[must_use]
    pub fn assign(&self, other: &Self) -> Self {
        self.merge(other)
    }

    /// Extends a dictionary with key-value pairs.
    #[must_use]
    pub fn extend<K: Into<String>>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut dict = self.clone();

        for (key, value) in pairs {
            dict = dict.set(key, value);
        }

        dict
    }

    /// Copies bindings into a standard hash map.
    pub fn to_hash_map(&self) -> HashMap<String, V> {
        self.iter()
            .map(|(key, value)| (key.into(), value.clone()))
            .collect()
    }
}

impl<V, const B: usize> Clone for Dict<V, B> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            root: self.root.clone(),
        }
    }
}

impl<V, const B: usize> Default for Dict<V, B> {
    fn default() -> Self {
        Self {
            size: 0,
            root: Node::new(0).into(),
        }
    }
}

impl<V: PartialEq, const B: usize> PartialEq for Dict<V, B> {
    fn eq(&self, other: &Self) -> bool {
        // Trie shapes depend on insertion history, so compare bindings.
        Arc::ptr_eq(&self.root, &other.root)
            || (self.size == other.size
                && self.iter().all(|(key, value)| other.get(key) == Some(value)))
    }
}

impl<V: Eq, const B: usize> Eq for Dict<V, B> {}

impl<V: Debug, const B: usize> Debug for Dict<V, B> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.debug_map().entries(self).finish()
    }
}

impl<V: Display, const B: usize> Display for Dict<V, B> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{{")?;

        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }

            write!(formatter, "{key}: {value}")?;
        }

        write!(formatter, "}}")
    }
}

impl<K: Into<String>, V: Clone, const B: usize> FromIterator<(K, V)> for Dict<V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterator: I) -> Self {
        Self::default().extend(iterator)
    }
}

impl<V: Clone, S: BuildHasher, const B: usize> From<HashMap<String, V, S>> for Dict<V, B> {
    fn from(map: HashMap<String, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<V: Clone, const B: usize> From<BTreeMap<String, V>> for Dict<V, B> {
    fn from(map: BTreeMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<V: Clone, const B: usize> From<&Dict<V, B>> for HashMap<String, V> {
    fn from(dict: &Dict<V, B>) -> Self {
        dict.to_hash_map()
    }
}

impl<'a, V, const B: usize> IntoIterator for &'a Dict<V, B> {
    type IntoIter = NodeIterator<'a, V, B>;
    type Item = (&'a str, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Clone, const B: usize> IntoIterator for Dict<V, B> {
    type IntoIter = ClonedNodeIterator<V, B>;
    type Item = (String, V);

    fn into_iter(self) -> Self::IntoIter {
        ClonedNodeIterator::new(self.root)
    }
}
