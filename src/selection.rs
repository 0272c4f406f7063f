//! Selection of risks to simulate.

/// Set of selected risk names.
///
/// Iterates in the order names were first selected, which is the order the
/// orchestrator processes them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `name` if selected, otherwise add it.
    ///
    /// Returns whether `name` is selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    /// Add `name` unless already selected. Returns true if it was added.
    pub fn select(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for name in iter {
            set.select(name.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set: SelectionSet = ["Market"].into_iter().collect();
        let before = set.clone();

        assert!(set.toggle("Credit"));
        assert!(!set.toggle("Credit"));
        assert_eq!(set, before);

        assert!(!set.toggle("Market"));
        assert!(set.toggle("Market"));
        assert_eq!(set, before);
    }

    #[test]
    fn test_no_duplicates_and_selection_order() {
        let set: SelectionSet = ["Market", "Credit", "Market", "Liquidity"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["Market", "Credit", "Liquidity"]
        );
    }

    #[test]
    fn test_reselect_moves_to_end() {
        let mut set: SelectionSet = ["Market", "Credit"].into_iter().collect();
        set.toggle("Market");
        set.toggle("Market");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Credit", "Market"]);
    }

    #[test]
    fn test_empty_is_valid() {
        let mut set = SelectionSet::new();
        assert!(set.is_empty());
        set.toggle("Market");
        set.clear();
        assert!(set.is_empty());
    }
}
