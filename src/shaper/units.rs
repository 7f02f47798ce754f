//! `Units`: the caller-owned, capacity-bounded output collection.

use thiserror::Error;

/// The output collection is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("output collection is full ({limit} units)")]
pub struct CapacityError {
    /// Capacity of the collection.
    pub limit: usize,
}

/// A growable list of rendered units with a hard upper bound.
///
/// Sprite-based renderers can only show so many objects at once; the bound
/// models that. The typewriter only ever appends to the end, truncates back
/// to a committed length, or moves units of the line being typed.
#[derive(Debug, Clone)]
pub struct Units<U> {
    items: Vec<U>,
    limit: usize,
}

impl<U> Units<U> {
    /// Create a collection that holds at most `limit` units.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit,
        }
    }

    /// Create a collection without a practical bound.
    pub fn unbounded() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Maximum number of units.
    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of units.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another push would fail.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    /// Append a unit.
    pub fn push(&mut self, unit: U) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError { limit: self.limit });
        }
        self.items.push(unit);
        Ok(())
    }

    /// Drop every unit at index `len` and above.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Remove all units.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Units as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[U] {
        &self.items
    }

    /// Iterate over the units.
    pub fn iter(&self) -> std::slice::Iter<'_, U> {
        self.items.iter()
    }

    /// Mutable access to the units in `range`, clamped to the current length.
    pub fn range_mut(&mut self, range: std::ops::Range<usize>) -> &mut [U] {
        let end = range.end.min(self.items.len());
        let start = range.start.min(end);
        &mut self.items[start..end]
    }
}

impl<U> std::ops::Deref for Units<U> {
    type Target = [U];

    fn deref(&self) -> &[U] {
        &self.items
    }
}

impl<'a, U> IntoIterator for &'a Units<U> {
    type Item = &'a U;
    type IntoIter = std::slice::Iter<'a, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
