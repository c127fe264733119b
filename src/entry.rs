use crate::node::Node;
use std::sync::Arc;

/// Occupied slot of a node.
///
/// Other keys hashed onto the same slot live in the child node one level
/// deeper.
#[derive(Debug)]
pub struct Entry<V, const B: usize> {
    key: String,
    value: V,
    child: Arc<Node<V, B>>,
}

impl<V, const B: usize> Entry<V, B> {
    pub fn new(key: String, value: V, child: Arc<Node<V, B>>) -> Self {
        Self { key, value, child }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn child(&self) -> &Arc<Node<V, B>> {
        &self.child
    }
}

impl<V: Clone, const B: usize> Entry<V, B> {
    pub fn with_value(&self, value: V) -> Self {
        Self::new(self.key.clone(), value, self.child.clone())
    }

    pub fn with_child(&self, child: impl Into<Arc<Node<V, B>>>) -> Self {
        Self::new(self.key.clone(), self.value.clone(), child.into())
    }
}
