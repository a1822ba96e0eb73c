use std::collections::BTreeSet;

use crate::model::question::QuestionKind;

/// Presented-option indices the learner currently has picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the selection policy for `kind`.
    ///
    /// `Single` replaces any prior pick, `Multi` toggles membership. Indices
    /// at or beyond `option_count` are ignored. Returns `true` if accepted.
    pub fn toggle(&mut self, kind: QuestionKind, index: usize, option_count: usize) -> bool {
        if index >= option_count {
            return false;
        }
        match kind {
            QuestionKind::Single => {
                self.indices.clear();
                self.indices.insert(index);
            }
            QuestionKind::Multi => {
                if !self.indices.remove(&index) {
                    self.indices.insert(index);
                }
            }
        }
        true
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_replaces_previous_pick() {
        let mut s = Selection::new();
        assert!(s.toggle(QuestionKind::Single, 0, 3));
        assert!(s.toggle(QuestionKind::Single, 2, 3));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2]);

        // picking the same one again keeps it selected
        s.toggle(QuestionKind::Single, 2, 3);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn multi_toggles_membership() {
        let mut s = Selection::new();
        s.toggle(QuestionKind::Multi, 0, 3);
        s.toggle(QuestionKind::Multi, 1, 3);
        assert_eq!(s.len(), 2);
        s.toggle(QuestionKind::Multi, 0, 3);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut s = Selection::new();
        assert!(!s.toggle(QuestionKind::Multi, 3, 3));
        assert!(s.is_empty());
    }
}
