use std::fmt;

use serde::{Deserialize, Serialize};

/// CRC-32 checksum of one archive entry's raw bytes.
pub type Checksum = u32;

/// Sorted multiset of checksums belonging to one logical class name.
///
/// A logical class with two nested classes contributes two checksums, even
/// when the values are numerically equal. The sequence is kept sorted
/// ascending by inserting each checksum at its ordered position as entries
/// are discovered; there is never a trailing sort pass, so two multisets
/// compare with plain positional equality at read time.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecksumSet(Vec<Checksum>);

impl ChecksumSet {
    /// Create an empty multiset.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a multiset holding a single checksum.
    pub fn single(checksum: Checksum) -> Self {
        Self(vec![checksum])
    }

    /// Insert a checksum at its ordered position.
    ///
    /// The new value lands before the first existing value that exceeds it,
    /// or at the end if none does. Duplicates are retained.
    pub fn insert(&mut self, checksum: Checksum) {
        match self.0.iter().position(|&existing| existing > checksum) {
            Some(idx) => self.0.insert(idx, checksum),
            None => self.0.push(checksum),
        }
    }

    /// Number of checksums, counting duplicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the multiset holds no checksums.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The checksums in ascending order.
    pub fn as_slice(&self) -> &[Checksum] {
        &self.0
    }

    /// Iterate the checksums in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Checksum> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Debug for ChecksumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl FromIterator<Checksum> for ChecksumSet {
    fn from_iter<I: IntoIterator<Item = Checksum>>(iter: I) -> Self {
        let mut set = Self::new();
        for checksum in iter {
            set.insert(checksum);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_sorted(set: &ChecksumSet) -> bool {
        set.as_slice().windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut set = ChecksumSet::new();
        set.insert(30);
        set.insert(10);
        set.insert(20);
        assert_eq!(set.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn duplicates_are_retained() {
        let mut set = ChecksumSet::new();
        set.insert(7);
        set.insert(7);
        assert_eq!(set.as_slice(), &[7, 7]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn equality_is_positional() {
        let a: ChecksumSet = [3, 1, 2].into_iter().collect();
        let b: ChecksumSet = [1, 2, 3].into_iter().collect();
        assert_eq!(a, b);

        let c: ChecksumSet = [1, 2].into_iter().collect();
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn insertion_order_never_matters(values in proptest::collection::vec(any::<u32>(), 0..32)) {
            let forward: ChecksumSet = values.iter().copied().collect();
            let reversed: ChecksumSet = values.iter().rev().copied().collect();
            prop_assert_eq!(&forward, &reversed);
            prop_assert!(is_sorted(&forward));
            prop_assert_eq!(forward.len(), values.len());
        }
    }
}
