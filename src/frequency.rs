/// Occurrence counts for every distinct byte in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        Self::from_array(counts)
    }

    /// Builds a table from explicit counts. Zero counts are dropped and
    /// repeated bytes are summed, saturating at `u64::MAX`.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; 256];
        for (byte, count) in pairs {
            counts[byte as usize] = counts[byte as usize].saturating_add(count);
        }
        Self::from_array(counts)
    }

    fn from_array(counts: [u64; 256]) -> Self {
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self { counts, distinct }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct bytes.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Present bytes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HuffmanTree;

    #[test]
    fn gophers() {
        let freq = FrequencyTable::from_bytes(b"go go gophers");
        assert_eq!(freq.len(), 8);
        assert_eq!(freq.total(), 13);
        assert_eq!(freq.get(b'g'), 3);
        assert_eq!(freq.get(b'o'), 3);
        assert_eq!(freq.get(b' '), 2);
        for b in *b"phers" {
            assert_eq!(freq.get(b), 1);
        }
        assert_eq!(freq.get(b'z'), 0);
    }

    #[test]
    fn empty_input() {
        let freq = FrequencyTable::from_bytes(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }

    #[test]
    fn from_counts_drops_zeros() {
        let freq = FrequencyTable::from_counts([(7, 0), (3, 2), (3, 1), (255, 4)]);
        assert_eq!(freq.len(), 2);
        assert_eq!(freq.iter().collect::<Vec<_>>(), vec![(3, 3), (255, 4)]);
    }

    #[test]
    fn huge_counts_saturate() {
        let freq = FrequencyTable::from_counts([(1, u64::MAX), (1, 5), (2, u64::MAX - 1)]);
        assert_eq!(freq.len(), 2);
        assert_eq!(freq.get(1), u64::MAX);
        assert_eq!(freq.get(2), u64::MAX - 1);
        assert_eq!(freq.total(), u64::MAX);

        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.node(tree.root()).weight, u64::MAX);
    }
}
