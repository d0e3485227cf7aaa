use std::fmt::Debug;

/// Fixed-capacity FIFO window backed by an array and a head index.
///
/// Once `N` values are held, every `push` overwrites the oldest one.
#[derive(Clone, Debug)]
pub struct RingBuffer<T: Copy + Default, const N: usize> {
    slots: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        RingBuffer {
            slots: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// Append a value, evicting the oldest one when full.
    /// Returns the evicted value, if any.
    pub fn push(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }

        let evicted = if self.len == N {
            Some(self.slots[self.head])
        } else {
            self.len += 1;
            None
        };

        self.slots[self.head] = value;
        self.head = (self.head + 1) % N;

        evicted
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    fn oldest_index(&self) -> usize {
        (self.head + N - self.len) % N
    }
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

pub struct RingBufferIter<'a, T: Copy + Default, const N: usize> {
    ring: &'a RingBuffer<T, N>,
    offset: usize,
}

impl<T: Copy + Default, const N: usize> Iterator for RingBufferIter<'_, T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.ring.len {
            return None;
        }

        let index = (self.ring.oldest_index() + self.offset) % N;
        self.offset += 1;

        Some(self.ring.slots[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T: Copy + Default, const N: usize> ExactSizeIterator for RingBufferIter<'_, T, N> {}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    /// Iterate from oldest to newest.
    pub fn iter(&self) -> RingBufferIter<'_, T, N> {
        RingBufferIter {
            ring: self,
            offset: 0,
        }
    }
}

impl<T: Copy + Default, const N: usize> Extend<T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
