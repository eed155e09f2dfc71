//! Append-ordered singly-linked list of readings.

use crate::observer::{ListEvent, ListObserver, TracingObserver};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Numeric value that can be stored in an [`OrderedList`].
pub trait Reading: Copy + PartialOrd + fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Additive identity, the starting value of the running sum.
    const ZERO: Self;

    /// Adds `rhs` to the running sum in the reading's own type.
    fn accumulate(self, rhs: Self) -> Self;

    /// Widens the value to `f64`.
    fn widen(self) -> f64;
}

impl Reading for i32 {
    const ZERO: Self = 0;

    fn accumulate(self, rhs: Self) -> Self {
        // Two's complement wraparound on overflow
        self.wrapping_add(rhs)
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }
}

impl Reading for f32 {
    const ZERO: Self = 0.0;

    fn accumulate(self, rhs: Self) -> Self {
        self + rhs
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }
}

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// Singly-linked list that keeps readings in insertion order.
///
/// Appends walk to the tail, so they are O(n). The count is kept alongside
/// the chain and is zero exactly when there is no head node. Every mutation
/// is reported to the list's [`ListObserver`].
pub struct OrderedList<T: Reading> {
    head: Option<Box<Node<T>>>,
    len: usize,
    observer: Arc<dyn ListObserver<T>>,
}

impl<T: Reading> OrderedList<T> {
    /// Creates an empty list reporting to [`TracingObserver`].
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Creates an empty list reporting to `observer`.
    pub fn with_observer(observer: Arc<dyn ListObserver<T>>) -> Self {
        Self {
            head: None,
            len: 0,
            observer,
        }
    }

    /// Appends a value at the tail.
    pub fn append(&mut self, value: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;

        self.observer
            .on_list_event(&ListEvent::Appended { value, len: self.len });
    }

    /// Returns true if any stored value equals `value`.
    pub fn contains(&self, value: T) -> bool {
        self.iter().any(|&v| v == value)
    }

    /// Returns the oldest value.
    pub fn first(&self) -> Result<T> {
        self.head
            .as_ref()
            .map(|node| node.value)
            .ok_or(Error::EmptyContainer)
    }

    /// Returns the smallest value.
    pub fn minimum(&self) -> Result<T> {
        self.position_of_minimum()
            .map(|(_, value)| value)
            .ok_or(Error::EmptyContainer)
    }

    /// Unlinks the first node holding the smallest value.
    ///
    /// Returns false only when the list was already empty.
    pub fn remove_minimum(&mut self) -> bool {
        let Some((index, _)) = self.position_of_minimum() else {
            return false;
        };
        let Some(value) = self.unlink(index) else {
            return false;
        };
        self.len -= 1;

        self.observer
            .on_list_event(&ListEvent::MinimumRemoved { value, len: self.len });
        true
    }

    /// Returns the arithmetic mean of all values.
    ///
    /// The sum is taken in `T` and only widened to `f64` for the division.
    pub fn average(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let sum = self.iter().fold(T::ZERO, |acc, &v| acc.accumulate(v));
        Ok(sum.widen() / self.len as f64)
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Releases every node.
    pub fn clear(&mut self) {
        let released = self.release();
        self.observer
            .on_list_event(&ListEvent::Cleared { released });
    }

    /// Iterates over the values in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Index and value of the first minimal node. Equal values never
    /// replace an earlier candidate.
    fn position_of_minimum(&self) -> Option<(usize, T)> {
        let mut values = self.iter().copied().enumerate();
        let mut best = values.next()?;
        for (index, value) in values {
            if value < best.1 {
                best = (index, value);
            }
        }
        Some(best)
    }

    /// Detaches the node at `index` and relinks its neighbours.
    fn unlink(&mut self, index: usize) -> Option<T> {
        let mut cursor = &mut self.head;
        for _ in 0..index {
            cursor = &mut cursor.as_mut()?.next;
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        Some(node.value)
    }

    /// Drops the chain one node at a time and returns how many were freed.
    fn release(&mut self) -> usize {
        let mut released = 0;
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
            released += 1;
        }
        self.len = 0;
        released
    }
}

impl<T: Reading> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reading> Clone for OrderedList<T> {
    /// Copies every node into an independent chain. The observer is shared.
    fn clone(&self) -> Self {
        let mut copy = Self::with_observer(Arc::clone(&self.observer));
        let mut tail = &mut copy.head;
        for &value in self.iter() {
            tail = &mut tail.insert(Box::new(Node { value, next: None })).next;
        }
        copy.len = self.len;
        copy
    }
}

impl<T: Reading> Drop for OrderedList<T> {
    fn drop(&mut self) {
        // Iterative release keeps long chains from recursing through Box drops
        self.release();
    }
}

impl<T: Reading> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Reading> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over an [`OrderedList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::testing::Recorder;

    fn list_of<T: Reading>(values: &[T]) -> OrderedList<T> {
        let mut list = OrderedList::new();
        for &v in values {
            list.append(v);
        }
        list
    }

    fn values<T: Reading>(list: &OrderedList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let list = list_of(&[3, 1, 2]);
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert_eq!(list.len(), 3);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_append_reports_new_length() {
        let recorder = Arc::new(Recorder::<i32>::default());
        let mut list = OrderedList::with_observer(recorder.clone());
        list.append(7);
        list.append(9);
        assert_eq!(
            recorder.events(),
            vec![
                ListEvent::Appended { value: 7, len: 1 },
                ListEvent::Appended { value: 9, len: 2 },
            ]
        );
    }

    #[test]
    fn test_contains() {
        let list = list_of(&[1.5f32, 2.5]);
        assert!(list.contains(2.5));
        assert!(!list.contains(3.0));
        assert!(!OrderedList::<i32>::new().contains(0));
    }

    #[test]
    fn test_first_and_minimum() {
        let list = list_of(&[4, 2, 8, 2]);
        assert_eq!(list.first(), Ok(4));
        assert_eq!(list.minimum(), Ok(2));
    }

    #[test]
    fn test_empty_list_errors() {
        let list = OrderedList::<i32>::new();
        assert_eq!(list.first(), Err(Error::EmptyContainer));
        assert_eq!(list.minimum(), Err(Error::EmptyContainer));
        assert_eq!(list.average(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_average() {
        assert_eq!(list_of(&[10, 20, 30]).average(), Ok(20.0));
        assert_eq!(list_of(&[15.0f32, 20.0]).average(), Ok(17.5));
    }

    #[test]
    fn test_integer_average_is_not_truncated() {
        assert_eq!(list_of(&[1, 2]).average(), Ok(1.5));
    }

    #[test]
    fn test_integer_sum_wraps_on_overflow() {
        assert_eq!(
            list_of(&[i32::MAX, 1]).average(),
            Ok(f64::from(i32::MIN) / 2.0)
        );
    }

    #[test]
    fn test_remove_minimum_on_empty() {
        let mut list = OrderedList::<f32>::new();
        assert!(!list.remove_minimum());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_remove_minimum_single_element() {
        let mut list = list_of(&[5]);
        assert!(list.remove_minimum());
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.first(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_remove_minimum_at_head() {
        let mut list = list_of(&[1, 5, 3]);
        assert!(list.remove_minimum());
        assert_eq!(values(&list), vec![5, 3]);
    }

    #[test]
    fn test_remove_minimum_in_middle() {
        let mut list = list_of(&[15.0f32, 10.0, 20.0]);
        assert!(list.remove_minimum());
        assert_eq!(values(&list), vec![15.0, 20.0]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_minimum_at_tail() {
        let mut list = list_of(&[9, 8, 7]);
        assert!(list.remove_minimum());
        assert_eq!(values(&list), vec![9, 8]);
        list.append(1);
        assert_eq!(values(&list), vec![9, 8, 1]);
    }

    #[test]
    fn test_head_not_removed_when_smaller_value_follows_later() {
        // Head is <= its neighbour but is not the minimum of the list
        let mut list = list_of(&[5, 6, 1]);
        assert!(list.remove_minimum());
        assert_eq!(values(&list), vec![5, 6]);
    }

    #[test]
    fn test_remove_minimum_tie_takes_first_occurrence() {
        let recorder = Arc::new(Recorder::<i32>::default());
        let mut list = OrderedList::with_observer(recorder.clone());
        for v in [4, 2, 7, 2] {
            list.append(v);
        }
        assert!(list.remove_minimum());
        assert_eq!(values(&list), vec![4, 7, 2]);
        assert_eq!(
            recorder.events().last(),
            Some(&ListEvent::MinimumRemoved { value: 2, len: 3 })
        );
    }

    #[test]
    fn test_len_tracks_appends_minus_removals() {
        let mut list = OrderedList::new();
        let mut removed = 0;
        for (i, v) in [3, 9, 1, 4, 1, 5, 9, 2, 6].into_iter().enumerate() {
            list.append(v);
            if i % 3 == 2 && list.remove_minimum() {
                removed += 1;
            }
            assert_eq!(list.len(), i + 1 - removed);
            assert_eq!(list.iter().count(), list.len());
        }
        assert_eq!(values(&list), vec![3, 9, 4, 5, 9, 6]);
    }

    #[test]
    fn test_removed_value_is_never_above_remaining() {
        let mut list = list_of(&[6, 3, 8, 3, 1, 9]);
        while !list.is_empty() {
            let min = list.minimum().unwrap();
            assert!(list.remove_minimum());
            assert!(list.iter().all(|&v| v >= min));
        }
    }

    #[test]
    fn test_clear() {
        let recorder = Arc::new(Recorder::<i32>::default());
        let mut list = OrderedList::with_observer(recorder.clone());
        list.append(1);
        list.append(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        list.clear();
        assert_eq!(
            &recorder.events()[2..],
            &[
                ListEvent::Cleared { released: 2 },
                ListEvent::Cleared { released: 0 },
            ]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let original = list_of(&[3, 1, 2]);
        let mut copy = original.clone();
        assert_eq!(values(&copy), vec![3, 1, 2]);
        assert_eq!(copy.len(), 3);

        copy.remove_minimum();
        copy.append(10);
        assert_eq!(values(&copy), vec![3, 2, 10]);
        assert_eq!(values(&original), vec![3, 1, 2]);
        assert_eq!(original.len(), 3);
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let mut list = OrderedList::with_observer(Arc::new(Recorder::<i32>::default()));
        for v in 0..200_000 {
            list.head = Some(Box::new(Node {
                value: v,
                next: list.head.take(),
            }));
            list.len += 1;
        }
        drop(list);
    }

    #[test]
    fn test_debug_lists_values() {
        assert_eq!(format!("{:?}", list_of(&[1, 2])), "[1, 2]");
    }
}
