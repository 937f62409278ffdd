//! Grouped observations for multi-series density plots

/// Observations keyed by group label
///
/// Groups keep their first-insertion order so plots list series in the order
/// they appear in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSamples {
    groups: Vec<(String, Vec<f64>)>,
}

impl GroupedSamples {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation to `group`, creating the group if needed
    pub fn push(&mut self, group: &str, value: f64) {
        match self.position(group) {
            Some(pos) => self.groups[pos].1.push(value),
            None => self.groups.push((group.to_string(), vec![value])),
        }
    }

    /// Append a batch of observations to `group`, creating the group if needed
    ///
    /// An empty batch still registers the group.
    pub fn insert(&mut self, group: impl Into<String>, values: Vec<f64>) {
        let group = group.into();
        match self.position(&group) {
            Some(pos) => self.groups[pos].1.extend(values),
            None => self.groups.push((group, values)),
        }
    }

    /// Observations of a single group
    pub fn get(&self, group: &str) -> Option<&[f64]> {
        self.position(group).map(|pos| self.groups[pos].1.as_slice())
    }

    /// Group labels in order
    pub fn groups(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterate over `(group, observations)` in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.groups
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of observations over all groups
    pub fn total_observations(&self) -> usize {
        self.groups.iter().map(|(_, values)| values.len()).sum()
    }

    /// All observations pooled in group order
    pub fn all_values(&self) -> Vec<f64> {
        self.groups
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .collect()
    }

    fn position(&self, group: &str) -> Option<usize> {
        self.groups.iter().position(|(name, _)| name == group)
    }
}
