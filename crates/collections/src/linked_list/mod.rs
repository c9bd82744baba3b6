use crate::boxnode;

/// Singly linked chain of owned, string-keyed nodes.
///
/// New nodes are always pushed at the head, so the most recent insertion is
/// the first one visited by [`List::iter`] and [`List::find`].
pub struct List<V> {
    head: Option<Box<Node<V>>>,
    len: usize,
}

impl<V> Default for List<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> List<V> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new node at the head and returns its value slot
    pub fn push<K: Into<String>>(&mut self, key: K, value: V) -> &mut V {
        &mut self.push_node(boxnode!(key, value)).value
    }

    /// Relinks an already allocated node at the head of the chain
    pub(crate) fn push_node(&mut self, mut boxed: Box<Node<V>>) -> &mut Node<V> {
        boxed.next = self.head.take();
        self.len += 1;
        self.head.insert(boxed)
    }

    /// Unlinks the head node without moving it out of its allocation
    pub(crate) fn pop_node(&mut self) -> Option<Box<Node<V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Node<V>> {
        self.pop_node().map(|node| *node)
    }

    pub fn peek(&self) -> Option<&Node<V>> {
        self.head.as_deref()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Node<V>> {
        self.head.as_deref_mut()
    }

    /// Walks the whole chain, head included, looking for `key`
    pub fn find(&self, key: &str) -> Option<&Node<V>> {
        self.iter().find(|node| node.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut curr = self.head.as_deref_mut();
        while let Some(node) = curr {
            if node.key == key {
                return Some(node);
            }
            curr = node.next.as_deref_mut();
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }
}

impl<V> Drop for List<V> {
    fn drop(&mut self) {
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
            // node goes out of scope here, calling drop
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for List<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> IntoIterator for List<V> {
    type Item = <IterOwn<V> as Iterator>::Item;
    type IntoIter = IterOwn<V>;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn::new(self)
    }
}

pub struct Node<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<Box<Node<V>>>,
}

impl<V> Node<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<V: PartialEq> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}
impl<V: Eq> Eq for Node<V> {}

impl<V: std::fmt::Debug> std::fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {:?}>", self.key, self.value)
    }
}

// [iterators]

pub struct Iter<'a, V> {
    current: Option<&'a Node<V>>,
    len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.take()?;
        self.current = node.next.as_deref();
        self.len -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, V> Iter<'a, V> {
    pub fn new(list: &'a List<V>) -> Self {
        Self {
            current: list.head.as_deref(),
            len: list.len,
        }
    }
}

pub struct IterOwn<V>(List<V>);

impl<V> Iterator for IterOwn<V> {
    type Item = Node<V>;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<V> IterOwn<V> {
    pub fn new(list: List<V>) -> Self {
        Self(list)
    }
}
