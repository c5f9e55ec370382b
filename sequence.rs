use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::error::{InvariantViolation, SequenceError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{Link, Node, NodeRef};

/// End of the sequence a positional lookup starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    FromHead,
    FromTail,
}

/// How a positional lookup reaches its node: the starting end and the number
/// of links followed from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walk {
    pub direction: Direction,
    pub hops: usize,
}

impl Walk {
    /// Indices strictly below half the length are reached from the head.
    fn plan(index: usize, len: usize) -> Self {
        if index.saturating_mul(2) < len {
            Walk {
                direction: Direction::FromHead,
                hops: index,
            }
        } else {
            Walk {
                direction: Direction::FromTail,
                hops: len - 1 - index,
            }
        }
    }
}

/// A doubly-linked, positionally indexed sequence.
///
/// A sequence is always constructed from a seed value and may later be
/// emptied by removals.
pub struct Sequence<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the sequence uniquely owns its nodes, same as `std::collections::LinkedList`.
unsafe impl<T: Send> Send for Sequence<T> {}
unsafe impl<T: Sync> Sync for Sequence<T> {}

impl<T> Sequence<T> {
    /// Creates a sequence holding `value` as both head and tail.
    pub fn new(value: T) -> Self {
        let node = Node::alloc(value);
        Self {
            head: Some(node),
            tail: Some(node),
            len: 1,
            _marker: PhantomData,
        }
    }

    const fn empty() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<&T> {
        // SAFETY: `head` is live while `self` is borrowed.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn tail(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn head_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn tail_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Links `value` after the current tail.
    pub fn append(&mut self, value: T) {
        let node = Node::alloc(value);
        match self.tail {
            // SAFETY: `tail` and the fresh node are both live and distinct.
            Some(tail) => unsafe {
                (*tail.as_ptr()).next = Some(node);
                (*node.as_ptr()).prev = Some(tail);
            },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Links `value` before the current head.
    pub fn prepend(&mut self, value: T) {
        let node = Node::alloc(value);
        match self.head {
            Some(head) => unsafe {
                (*head.as_ptr()).prev = Some(node);
                (*node.as_ptr()).next = Some(head);
            },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Unlinks the tail and returns its value.
    pub fn pop(&mut self) -> Result<T, SequenceError> {
        self.take_last().ok_or_else(|| {
            debug!("pop rejected, sequence is empty");
            SequenceError::Empty
        })
    }

    /// Unlinks the head and returns its value.
    pub fn pop_first(&mut self) -> Result<T, SequenceError> {
        self.take_first().ok_or_else(|| {
            debug!("pop_first rejected, sequence is empty");
            SequenceError::Empty
        })
    }

    pub(crate) fn take_last(&mut self) -> Option<T> {
        self.tail.map(|tail| unsafe {
            // SAFETY: `tail` is live and owned by `self`; it is detached from
            // its predecessor before being freed.
            self.tail = (*tail.as_ptr()).prev.take();
            match self.tail {
                Some(new_tail) => (*new_tail.as_ptr()).next = None,
                None => self.head = None,
            }
            self.len -= 1;
            Node::free(tail)
        })
    }

    pub(crate) fn take_first(&mut self) -> Option<T> {
        self.head.map(|head| unsafe {
            self.head = (*head.as_ptr()).next.take();
            match self.head {
                Some(new_head) => (*new_head.as_ptr()).prev = None,
                None => self.tail = None,
            }
            self.len -= 1;
            Node::free(head)
        })
    }

    /// Reports which end a lookup of `index` starts from and how many links
    /// it follows.
    ///
    /// ```
    /// use doubly_linked_sequence::{Direction, Sequence};
    ///
    /// let mut seq = Sequence::new(1);
    /// seq.extend([2, 3, 4, 5]);
    /// let walk = seq.walk(3).unwrap();
    /// assert_eq!(walk.direction, Direction::FromTail);
    /// assert_eq!(walk.hops, 1);
    /// ```
    pub fn walk(&self, index: usize) -> Result<Walk, SequenceError> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        Ok(Walk::plan(index, self.len))
    }

    fn out_of_range(&self, index: usize) -> SequenceError {
        debug!("index {} rejected, length is {}", index, self.len);
        SequenceError::OutOfRange {
            index,
            len: self.len,
        }
    }

    fn locate(&self, index: usize) -> Result<NonNull<Node<T>>, SequenceError> {
        let walk = self.walk(index)?;
        trace!(
            "index {} located {:?} in {} hops",
            index,
            walk.direction,
            walk.hops
        );
        let start = match walk.direction {
            Direction::FromHead => self.head,
            Direction::FromTail => self.tail,
        };
        let mut node = start.ok_or_else(|| self.out_of_range(index))?;
        for _ in 0..walk.hops {
            // SAFETY: `hops` stays within the `len` live nodes.
            let links = unsafe { node.as_ref() };
            let step = match walk.direction {
                Direction::FromHead => links.next,
                Direction::FromTail => links.prev,
            };
            node = step.ok_or_else(|| self.out_of_range(index))?;
        }
        Ok(node)
    }

    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        let node = self.locate(index)?;
        Ok(unsafe { &(*node.as_ptr()).value })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SequenceError> {
        let node = self.locate(index)?;
        Ok(unsafe { &mut (*node.as_ptr()).value })
    }

    /// Inspects the node at `index` together with its neighbours.
    pub fn node(&self, index: usize) -> Result<NodeRef<'_, T>, SequenceError> {
        let node = self.locate(index)?;
        // SAFETY: the view borrows `self`, so the chain cannot change under it.
        Ok(unsafe { NodeRef::new(node) })
    }

    /// Overwrites the value at `index`, returning the one it replaced.
    pub fn set_value(&mut self, index: usize, value: T) -> Result<T, SequenceError> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Inserts `value` so that it ends up at `index`. `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), SequenceError> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        if index == 0 {
            self.prepend(value);
            return Ok(());
        }
        if index == self.len {
            self.append(value);
            return Ok(());
        }

        let before = self.locate(index - 1)?;
        let node = Node::alloc(value);
        // SAFETY: `before` is interior, so its successor exists and is live.
        unsafe {
            let after = (*before.as_ptr()).next;
            (*node.as_ptr()).prev = Some(before);
            (*node.as_ptr()).next = after;
            (*before.as_ptr()).next = Some(node);
            if let Some(after) = after {
                (*after.as_ptr()).prev = Some(node);
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Unlinks the node at `index` and returns its value.
    pub fn remove(&mut self, index: usize) -> Result<T, SequenceError> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        if index == 0 {
            return self.pop_first();
        }
        if index == self.len - 1 {
            return self.pop();
        }

        let node = self.locate(index)?;
        // SAFETY: an interior node has live neighbours on both sides.
        unsafe {
            let prev = (*node.as_ptr()).prev.take();
            let next = (*node.as_ptr()).next.take();
            if let Some(prev) = prev {
                (*prev.as_ptr()).next = next;
            }
            if let Some(next) = next {
                (*next.as_ptr()).prev = prev;
            }
            self.len -= 1;
            Ok(Node::free(node))
        }
    }

    /// Flips the sequence in place: every node swaps its links and head and
    /// tail trade places.
    pub fn reverse(&mut self) {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // SAFETY: each live node is visited once through its old `next`.
            unsafe {
                let node = &mut *node.as_ptr();
                mem::swap(&mut node.prev, &mut node.next);
                cursor = node.prev;
            }
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.tail, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.tail, self.len)
    }

    /// Snapshot of the values, head to tail.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Walks both chains and reports the first broken structural rule.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let (head, tail) = match (self.head, self.tail) {
            (None, None) if self.len == 0 => return Ok(()),
            (Some(head), Some(tail)) if self.len > 0 => (head, tail),
            _ => return Err(InvariantViolation::DanglingEnds { len: self.len }),
        };

        // SAFETY: both walks stop after `len + 1` nodes, so a corrupted chain
        // is reported instead of looping.
        unsafe {
            let (first, last) = (head.as_ref(), tail.as_ref());
            if self.len == 1 && (head != tail || first.next.is_some() || first.prev.is_some()) {
                return Err(InvariantViolation::SingletonLinks);
            }
            if first.prev.is_some() {
                return Err(InvariantViolation::HeadHasPrev);
            }
            if last.next.is_some() {
                return Err(InvariantViolation::TailHasNext);
            }

            let mut forward = Vec::with_capacity(self.len);
            let mut cursor = Some(head);
            while let Some(node) = cursor {
                if forward.len() > self.len {
                    break;
                }
                if let Some(&prev) = forward.last() {
                    if node.as_ref().prev != Some(prev) {
                        return Err(InvariantViolation::BrokenBackLink {
                            index: forward.len(),
                        });
                    }
                }
                forward.push(node);
                cursor = node.as_ref().next;
            }

            let mut backward = Vec::with_capacity(self.len);
            let mut cursor = Some(tail);
            while let Some(node) = cursor {
                if backward.len() > self.len {
                    break;
                }
                backward.push(node);
                cursor = node.as_ref().prev;
            }

            if forward.len() != self.len || backward.len() != self.len {
                return Err(InvariantViolation::LengthMismatch {
                    len: self.len,
                    forward: forward.len(),
                    backward: backward.len(),
                });
            }
            if let Some(index) = forward
                .iter()
                .zip(backward.iter().rev())
                .position(|(ahead, behind)| ahead != behind)
            {
                return Err(InvariantViolation::ChainsDisagree { index });
            }
        }
        Ok(())
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        while self.take_first().is_some() {}
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::empty();
        copy.extend(self.iter().cloned());
        copy
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `None <- 7 <-> 9 <-> 3 -> None`.
impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None <- None -> None");
        }
        f.write_str("None <- ")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" <-> ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(" -> None")
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
