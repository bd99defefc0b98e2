use std::collections::VecDeque;

/// How many entries a [`History`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep every entry ever recorded.
    #[default]
    Unbounded,
    /// Keep only the newest `n` entries; `Last(0)` records nothing.
    Last(usize),
}

/// Append-only record of per-step values under a [`Retention`] policy.
///
/// With `Retention::Last(n)` the history behaves as a ring buffer: once full,
/// each push evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    items: VecDeque<T>,
    retention: Retention,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(Retention::Unbounded)
    }
}

impl<T> History<T> {
    pub fn new(retention: Retention) -> Self {
        Self {
            items: VecDeque::new(),
            retention,
        }
    }

    /// Append a value, evicting the oldest entry if the retention cap is reached.
    pub fn push(&mut self, value: T) {
        match self.retention {
            Retention::Unbounded => self.items.push_back(value),
            Retention::Last(0) => {}
            Retention::Last(n) => {
                while self.items.len() >= n {
                    self.items.pop_front();
                }
                self.items.push_back(value);
            }
        }
    }

    /// Overwrite the newest entry; no-op when empty.
    pub(crate) fn replace_last(&mut self, value: T) {
        if let Some(last) = self.items.back_mut() {
            *last = value;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<T: Clone> History<T> {
    /// Copy of the retained entries, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
