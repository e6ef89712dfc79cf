use crate::node::NodeIndex;

/// Highlight membership over node indices, backed by a bitset.
///
/// Ordering contract:
/// - Iteration yields indices in ascending order, so two sets with the same
///   members always iterate identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    words: Vec<u64>,
    len: usize,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        let (word, bit) = word_bit(node);
        self.words
            .get(word)
            .is_some_and(|w| (w & (1u64 << bit)) != 0)
    }

    /// Returns `true` if the set changed.
    pub fn insert(&mut self, node: NodeIndex) -> bool {
        let (word, bit) = word_bit(node);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        self.len += 1;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            (0..64u32)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| NodeIndex(wi as u32 * 64 + bit))
        })
    }
}

impl FromIterator<NodeIndex> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> Self {
        let mut set = Self::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

fn word_bit(node: NodeIndex) -> (usize, u32) {
    ((node.0 / 64) as usize, node.0 % 64)
}

#[cfg(test)]
mod tests {
    use super::SelectionSet;
    use crate::node::NodeIndex;

    #[test]
    fn insert_and_contains() {
        let mut s = SelectionSet::new();
        assert!(s.is_empty());
        assert!(s.insert(NodeIndex(3)));
        assert!(!s.insert(NodeIndex(3)));
        assert!(s.contains(NodeIndex(3)));
        assert!(!s.contains(NodeIndex(300)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn iteration_is_sorted_regardless_of_insert_order() {
        let a: SelectionSet = [65, 2, 10].into_iter().map(NodeIndex).collect();
        let b: SelectionSet = [10, 65, 2].into_iter().map(NodeIndex).collect();
        let got: Vec<u32> = a.iter().map(|n| n.0).collect();
        assert_eq!(got, vec![2, 10, 65]);
        assert_eq!(a, b);
    }
}
