//! Inclusive integer ranges and balanced partitioning into shards.

use std::fmt;

use serde::Serialize;

/// Inclusive range `[begin, end]` of integers whose product is wanted.
///
/// A range with `begin > end` is empty and contributes the
/// multiplicative identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    /// First integer in the range.
    pub begin: u64,
    /// Last integer in the range (inclusive).
    pub end: u64,
}

impl Range {
    /// Canonical empty range.
    pub const EMPTY: Self = Self { begin: 1, end: 0 };

    /// Create a range. Bounds are stored as given.
    #[must_use]
    pub const fn new(begin: u64, end: u64) -> Self {
        Self { begin, end }
    }

    /// `true` when the range holds no integers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.begin > self.end
    }

    /// Swap inverted bounds, turning `[b, a]` with `b > a` into `[a, b]`.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.begin > self.end {
            Self {
                begin: self.end,
                end: self.begin,
            }
        } else {
            self
        }
    }

    /// Number of integers in the range. `[0, u64::MAX]` holds `2^64`.
    #[must_use]
    pub fn len(&self) -> u128 {
        if self.is_empty() {
            0
        } else {
            u128::from(self.end - self.begin) + 1
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("(empty)")
        } else {
            write!(f, "{}..={}", self.begin, self.end)
        }
    }
}

/// Number of workers to use for a range of `len` integers.
///
/// Never more workers than integers, never fewer than one.
#[must_use]
pub fn worker_count(requested: usize, len: u128) -> usize {
    let requested = requested.max(1);
    match usize::try_from(len) {
        Ok(len) => requested.min(len).max(1),
        Err(_) => requested,
    }
}

/// Split `range` into `parts` contiguous shards in ascending order.
///
/// The first `len % parts` shards hold one extra integer, so sizes differ
/// by at most one. When the range holds fewer integers than `parts`, the
/// trailing shards are [`Range::EMPTY`]. `parts == 0` is treated as 1.
///
/// # Example
/// ```
/// use factmod_core::range::{partition, Range};
///
/// let shards = partition(Range::new(1, 10), 3);
/// assert_eq!(shards, vec![Range::new(1, 4), Range::new(5, 7), Range::new(8, 10)]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn partition(range: Range, parts: usize) -> Vec<Range> {
    let parts = parts.max(1);
    let total = range.len();
    let base = total / parts as u128;
    let extra = total % parts as u128;

    let mut shards = Vec::with_capacity(parts);
    let mut cursor = u128::from(range.begin);
    for i in 0..parts {
        let size = base + u128::from((i as u128) < extra);
        if size == 0 {
            shards.push(Range::EMPTY);
            continue;
        }
        let last = cursor + size - 1;
        // `last <= range.end`, so both bounds fit in u64.
        shards.push(Range::new(cursor as u64, last as u64));
        cursor = last + 1;
    }
    shards
}
