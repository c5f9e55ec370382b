use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A doubly-linked list node.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Link<T>,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    /// Boxes a detached node and hands out its raw link.
    pub(crate) fn alloc(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            value,
            prev: None,
            next: None,
        });
        NonNull::from(Box::leak(node))
    }

    /// Reclaims a node produced by [`Node::alloc`] and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`], must not be freed already and
    /// must no longer be reachable from any other node or sequence.
    pub(crate) unsafe fn free(node: NonNull<Node<T>>) -> T {
        let node = Box::from_raw(node.as_ptr());
        debug_assert!(node.prev.is_none() && node.next.is_none());
        node.value
    }
}

/// A borrowed view of one node of a [`Sequence`] and its neighbours.
///
/// [`Sequence`]: crate::Sequence
pub struct NodeRef<'a, T> {
    node: NonNull<Node<T>>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> NodeRef<'a, T> {
    /// # Safety
    ///
    /// `node` must stay linked and unmodified for `'a`.
    pub(crate) unsafe fn new(node: NonNull<Node<T>>) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    fn link(&self, pick: fn(&Node<T>) -> Link<T>) -> Option<NodeRef<'a, T>> {
        // SAFETY: neighbours of a live node are live for as long as the
        // sequence stays borrowed.
        unsafe { pick(self.node.as_ref()).map(|node| NodeRef::new(node)) }
    }

    pub fn value(&self) -> &'a T {
        unsafe { &self.node.as_ref().value }
    }

    /// Value of the preceding node, `None` at the head.
    pub fn prev(&self) -> Option<&'a T> {
        self.prev_node().map(|node| node.value())
    }

    /// Value of the following node, `None` at the tail.
    pub fn next(&self) -> Option<&'a T> {
        self.next_node().map(|node| node.value())
    }

    pub fn prev_node(&self) -> Option<NodeRef<'a, T>> {
        self.link(|node| node.prev)
    }

    pub fn next_node(&self) -> Option<NodeRef<'a, T>> {
        self.link(|node| node.next)
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

struct Neighbour<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Neighbour<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}

/// Renders as `Node(3) | Prev: 7 | Next: None`.
impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node({}) | Prev: {} | Next: {}",
            self.value(),
            Neighbour(self.prev()),
            Neighbour(self.next())
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("prev", &self.prev())
            .field("next", &self.next())
            .finish()
    }
}
