//! Binary min-heap keyed by a caller-supplied comparator
//!
//! The comparator is part of the queue's type and fixed at construction, so
//! one queue type serves both sides of the greedy matcher (creditors ordered
//! by negated balance, debtors by raw balance).
//!
//! # Invariant
//!
//! For every non-root slot `i`, `cmp(items[parent(i)], items[i])` is not
//! `Greater`. Order among equal keys is unspecified.

use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Min-heap over `T` ordered by `F`
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Complete binary tree in array form
    items: Vec<T>,

    /// Total order on items; the smallest item is popped first
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty queue
    pub fn new(cmp: F) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    /// Create an empty queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest item, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Insert an item, O(log n)
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest item, O(log n)
    pub fn pop(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(Error::EmptyQueue);
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop().ok_or(Error::EmptyQueue)?;
        self.sift_down(0);

        Ok(top)
    }

    /// Drain the queue in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    fn is_smaller(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.is_smaller(child, parent) {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut root: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * root + 1;
            let right = left + 1;
            let mut smallest = root;

            if left < len && self.is_smaller(left, smallest) {
                smallest = left;
            }
            if right < len && self.is_smaller(right, smallest) {
                smallest = right;
            }
            if smallest == root {
                break;
            }

            self.items.swap(root, smallest);
            root = smallest;
        }
    }

    #[cfg(test)]
    fn holds_invariant(&self) -> bool {
        (1..self.items.len()).all(|i| !self.is_smaller(i, (i - 1) / 2))
    }
}

impl<T, F> fmt::Debug for PriorityQueue<T, F>
where
    T: fmt::Debug,
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
