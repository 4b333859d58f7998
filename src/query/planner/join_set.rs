// Join Subsets
//
// A `JoinSet` is a subset of the query's join descriptors encoded as a
// bitmask over their positions in the optimizer's (immutable) join list.
// The encoding is order-independent, so it doubles as the plan cache key.

use std::fmt;

/// Largest number of joins a `JoinSet` can address
pub const MAX_JOINS: usize = u64::BITS as usize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct JoinSet(u64);

fn bit(index: usize) -> u64 {
    if index < MAX_JOINS { 1u64 << index } else { 0 }
}

impl JoinSet {
    pub const EMPTY: JoinSet = JoinSet(0);

    /// Set containing joins `0..n`
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_JOINS, "join set supports at most {} joins", MAX_JOINS);
        if n == MAX_JOINS {
            JoinSet(u64::MAX)
        } else {
            JoinSet((1u64 << n) - 1)
        }
    }

    /// Indices at or past `MAX_JOINS` have no bit and give the empty set
    pub fn single(index: usize) -> Self {
        JoinSet(bit(index))
    }

    pub fn from_bits(bits: u64) -> Self {
        JoinSet(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, index: usize) -> bool {
        self.0 & bit(index) != 0
    }

    pub fn with(self, index: usize) -> Self {
        JoinSet(self.0 | bit(index))
    }

    pub fn without(self, index: usize) -> Self {
        JoinSet(self.0 & !bit(index))
    }

    /// Member indices in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let index = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(index)
            }
        })
    }

    /// Every subset of exactly `k` joins drawn from joins `0..n`
    pub fn combinations(n: usize, k: usize) -> Combinations {
        Combinations::new(n, k)
    }
}

impl fmt::Debug for JoinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Exact-size subset enumeration in increasing bitmask order.
///
/// Steps from one k-bit mask to the next larger mask with the same number
/// of bits set (Gosper's hack), stopping once a bit at position `n` or
/// above would be needed.
pub struct Combinations {
    next: Option<u64>,
    limit: u64,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        assert!(n <= MAX_JOINS, "join set supports at most {} joins", MAX_JOINS);
        let next = if k > n {
            None
        } else if k == 0 {
            Some(0)
        } else {
            Some(JoinSet::full(k).bits())
        };
        Combinations {
            next,
            limit: JoinSet::full(n).bits(),
        }
    }
}

impl Iterator for Combinations {
    type Item = JoinSet;

    fn next(&mut self) -> Option<JoinSet> {
        let current = self.next?;
        self.next = if current == 0 {
            None
        } else {
            let lowest = current & current.wrapping_neg();
            match current.checked_add(lowest) {
                Some(ripple) => {
                    let ones = ((current ^ ripple) >> 2) / lowest;
                    let candidate = ripple | ones;
                    (candidate & !self.limit == 0).then_some(candidate)
                }
                None => None,
            }
        };
        Some(JoinSet(current))
    }
}
