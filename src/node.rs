use crate::{entry::Entry, hash::hash};
use std::{array, sync::Arc};

/// Trie level of `B` slots, each holding at most one entry.
#[derive(Debug)]
pub struct Node<V, const B: usize> {
    depth: u32,
    size: usize,
    entries: [Option<Arc<Entry<V, B>>>; B],
}

impl<V, const B: usize> Node<V, B> {
    const VALID_BREADTH: () = assert!(B > 0, "breadth must be positive");

    pub fn new(depth: u32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_BREADTH;

        Self {
            depth,
            size: 0,
            entries: array::from_fn(|_| None),
        }
    }

    #[cfg(test)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    fn entry_size(entry: &Option<Arc<Entry<V, B>>>) -> usize {
        entry.as_ref().map_or(0, |entry| entry.child().len() + 1)
    }

    fn entry_index(&self, key: &str) -> usize {
        (hash(key, self.depth) % B as u64) as usize
    }

    fn set_entry(&self, index: usize, entry: Option<Entry<V, B>>) -> Self {
        let mut entries = self.entries.clone();

        entries[index] = entry.map(Arc::new);

        Self {
            depth: self.depth,
            size: self.size - Self::entry_size(&self.entries[index])
                + Self::entry_size(&entries[index]),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let entry = self.entries[self.entry_index(key)].as_deref()?;

        if entry.key() == key {
            Some(entry.value())
        } else {
            entry.child().get(key)
        }
    }
}

impl<V: Clone, const B: usize> Node<V, B> {
    /// Binds a key, returning a new node and whether the key was absent.
    #[must_use]
    pub fn set(&self, key: String, value: V) -> (Self, bool) {
        let index = self.entry_index(&key);

        match self.entries[index].as_deref() {
            None => {
                let child = Self::new(self.depth + 1);

                (
                    self.set_entry(index, Some(Entry::new(key, value, child.into()))),
                    true,
                )
            }
            Some(entry) if entry.key() == key => {
                (self.set_entry(index, Some(entry.with_value(value))), false)
            }
            Some(entry) => {
                let (child, ok) = entry.child().set(key, value);

                (self.set_entry(index, Some(entry.with_child(child))), ok)
            }
        }
    }

    /// Unbinds a key. `None` means the key is absent and nothing changes.
    #[must_use]
    pub fn delete(&self, key: &str) -> Option<Self> {
        let index = self.entry_index(key);
        let entry = self.entries[index].as_deref()?;

        Some(self.set_entry(
            index,
            if entry.key() == key {
                entry.child().promote()
            } else {
                Some(entry.with_child(entry.child().delete(key)?))
            },
        ))
    }

    // Every key below a parent slot hashes onto that slot at the parent depth,
    // so any of them can take it over. The first one in slot order is lifted
    // and the rest stay in a node at this depth.
    fn promote(&self) -> Option<Entry<V, B>> {
        let (index, head) = self
            .entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| Some((index, entry.as_deref()?)))?;

        Some(Entry::new(
            head.key().into(),
            head.value().clone(),
            self.set_entry(index, head.child().promote()).into(),
        ))
    }

    /// Merges two nodes of the same depth, returning the merged node and the
    /// number of keys bound in both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> (Self, usize) {
        debug_assert_eq!(self.depth, other.depth);

        let mut shared = 0;
        let entries: [_; B] = array::from_fn(|index| {
            match (&self.entries[index], &other.entries[index]) {
                (None, None) => None,
                (Some(entry), None) | (None, Some(entry)) => Some(entry.clone()),
                (Some(this), Some(that)) if Arc::ptr_eq(this, that) => {
                    shared += this.child().len() + 1;
                    Some(this.clone())
                }
                (Some(this), Some(that)) => {
                    let (child, count) = Self::merge_children(this, that);

                    shared += count;

                    Some(this.with_child(child).into())
                }
            }
        });

        (
            Self {
                depth: self.depth,
                size: entries.iter().map(Self::entry_size).sum(),
                entries,
            },
            shared,
        )
    }

    // The head of `this` keeps the slot. The head of `that` goes one level
    // down, and a deeper binding of the key of `this` is dropped.
    fn merge_children(this: &Entry<V, B>, that: &Entry<V, B>) -> (Self, usize) {
        let (child, mut shared) = this.child().merge(that.child());

        if this.key() == that.key() {
            return (child, shared + 1);
        }

        let (mut child, ok) = child.set(that.key().into(), that.value().clone());
        shared += usize::from(!ok);

        if let Some(other) = child.delete(this.key()) {
            child = other;
            shared += 1;
        }

        (child, shared)
    }

    #[cfg(test)]
    pub fn entry(&self, index: usize) -> Option<&Arc<Entry<V, B>>> {
        self.entries[index].as_ref()
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        use std::collections::HashSet;

        fn is_placed<V, const B: usize>(node: &Node<V, B>) -> bool {
            node.entries.iter().enumerate().all(|(index, entry)| {
                entry.as_deref().map_or(true, |entry| {
                    node.entry_index(entry.key()) == index
                        && entry.child().depth == node.depth + 1
                        && is_placed(entry.child())
                })
            }) && node.size == node.into_iter().count()
        }

        let mut keys = HashSet::new();

        is_placed(self) && self.into_iter().all(|(key, _)| keys.insert(key))
    }
}

/// Depth-first iterator over borrowed key-value pairs.
#[derive(Debug)]
pub struct NodeIterator<'a, V: 'a, const B: usize>(Vec<(&'a Node<V, B>, usize)>);

impl<'a, V, const B: usize> IntoIterator for &'a Node<V, B> {
    type IntoIter = NodeIterator<'a, V, B>;
    type Item = (&'a str, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        NodeIterator(vec![(self, 0)])
    }
}

impl<'a, V, const B: usize> Iterator for NodeIterator<'a, V, B> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, index)) = self.0.pop() {
            if index == B {
                continue;
            }

            self.0.push((node, index + 1));

            if let Some(entry) = node.entries[index].as_deref() {
                self.0.push((entry.child().as_ref(), 0));

                return Some((entry.key(), entry.value()));
            }
        }

        None
    }
}

/// Depth-first iterator over cloned key-value pairs. It keeps the nodes it
/// walks alive on its own.
#[derive(Debug)]
pub struct ClonedNodeIterator<V, const B: usize>(Vec<(Arc<Node<V, B>>, usize)>);

impl<V, const B: usize> ClonedNodeIterator<V, B> {
    pub fn new(node: Arc<Node<V, B>>) -> Self {
        Self(vec![(node, 0)])
    }
}

impl<V: Clone, const B: usize> Iterator for ClonedNodeIterator<V, B> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, index)) = self.0.pop() {
            if index == B {
                continue;
            }

            self.0.push((node.clone(), index + 1));

            if let Some(entry) = node.entries[index].as_deref() {
                self.0.push((entry.child().clone(), 0));

                return Some((entry.key().into(), entry.value().clone()));
            }
        }

        None
    }
}
