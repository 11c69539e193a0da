//! Per-invocation query options

use crate::build::Channel;

/// Options applied to list responses and latest-build lookups
///
/// Built once from configuration and CLI flags, then passed by reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Keep only the newest N entries of a list response
    pub limit: Option<usize>,
    /// Default channel filter for build listings and latest-build lookups
    pub channel: Option<Channel>,
}

impl QueryOptions {
    #[must_use]
    pub fn new(limit: Option<usize>, channel: Option<Channel>) -> Self {
        Self { limit, channel }
    }

    /// Truncate a list to its newest entries, assuming oldest-first order
    #[must_use]
    pub fn apply_limit<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if let Some(limit) = self.limit {
            if items.len() > limit {
                items.drain(..items.len() - limit);
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_keeps_newest() {
        let opts = QueryOptions::new(Some(2), None);
        assert_eq!(opts.apply_limit(vec![1, 2, 3, 4]), vec![3, 4]);
    }

    #[test]
    fn test_limit_larger_than_list() {
        let opts = QueryOptions::new(Some(10), None);
        assert_eq!(opts.apply_limit(vec![1, 2]), vec![1, 2]);
        assert_eq!(QueryOptions::default().apply_limit(vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_zero_limit_empties() {
        let opts = QueryOptions::new(Some(0), Some(Channel::Stable));
        assert!(opts.apply_limit(vec![1, 2]).is_empty());
    }
}
