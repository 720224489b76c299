//! List filter criteria and their projection onto request query parameters.

use crate::model::{Priority, Status};
use serde::{Deserialize, Serialize};

/// Filter criteria applied to the workorder list.
///
/// `None`/empty means "all" for the corresponding field. This is also the
/// shape persisted by the filter store, so it round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterSet {
    /// Substring match on the title.
    pub title: String,
    /// Exact status match, or `None` for all.
    pub status: Option<Status>,
    /// Exact priority match, or `None` for all.
    pub priority: Option<Priority>,
}

impl FilterSet {
    /// Returns true if any field differs from `defaults` and is non-empty.
    ///
    /// Drives the empty-state messaging: an empty result set offers "clear
    /// filters" only when this is true.
    #[must_use]
    pub fn has_active(&self, defaults: &Self) -> bool {
        (self.title != defaults.title && !self.title.is_empty())
            || (self.status != defaults.status && self.status.is_some())
            || (self.priority != defaults.priority && self.priority.is_some())
    }

    /// Query parameters for the active fields. Blank fields are omitted
    /// entirely, never sent as empty strings.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.title.is_empty() {
            pairs.push(("title", self.title.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_active_filters() {
        let defaults = FilterSet::default();
        assert!(!defaults.clone().has_active(&defaults));
    }

    #[test]
    fn any_set_field_is_active() {
        let defaults = FilterSet::default();
        let titled = FilterSet {
            title: "x".into(),
            ..FilterSet::default()
        };
        assert!(titled.has_active(&defaults));

        let by_status = FilterSet {
            status: Some(Status::Done),
            ..FilterSet::default()
        };
        assert!(by_status.has_active(&defaults));

        let by_priority = FilterSet {
            priority: Some(Priority::High),
            ..FilterSet::default()
        };
        assert!(by_priority.has_active(&defaults));
    }

    #[test]
    fn blank_fields_are_omitted_from_query() {
        let filters = FilterSet::default();
        assert!(filters.query_pairs().is_empty());
    }

    #[test]
    fn active_fields_project_to_wire_values() {
        let filters = FilterSet {
            title: "pump".into(),
            status: Some(Status::InProgress),
            priority: Some(Priority::Critical),
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("title", "pump".to_string()),
                ("status", "IN_PROGRESS".to_string()),
                ("priority", "CRITICAL".to_string()),
            ]
        );
    }

    #[test]
    fn persisted_blob_round_trips() {
        let filters = FilterSet {
            title: "boiler".into(),
            status: Some(Status::Open),
            priority: None,
        };
        let json = serde_json::to_string(&filters).expect("serialize");
        let back: FilterSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, filters);
    }
}
