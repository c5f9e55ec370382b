use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::Link;
use crate::Sequence;

/// Borrowing iterator over a [`Sequence`], head to tail. Reversible.
pub struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(head: Link<T>, tail: Link<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: `len` bounds the walk to nodes still owned by the
            // borrowed sequence.
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self::new(self.head, self.tail, self.len)
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

/// Mutably borrowing iterator over a [`Sequence`].
pub struct IterMut<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: Link<T>, tail: Link<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: each node is yielded at most once, front and back
            // cursors never cross because of `len`.
            let node = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            let node = unsafe { &mut *node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &mut node.value
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, drains the sequence from either end.
pub struct IntoIter<T> {
    sequence: Sequence<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(sequence: Sequence<T>) -> Self {
        Self { sequence }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sequence.take_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.len(), Some(self.sequence.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.sequence.take_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.sequence).finish()
    }
}
