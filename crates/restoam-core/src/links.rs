//! URL builders for the sibling asset and location applications.
//!
//! Nothing but the identifier crosses these links; the collaborator apps are
//! independently deployed and only reachable by URL.

/// Edit link into a collaborator app: `{app}/edit/{id}`.
#[must_use]
pub fn edit_url(app_base: &str, id: &str) -> String {
    format!("{}/edit/{id}", app_base.trim_end_matches('/'))
}

/// Pre-filtered list link into a collaborator app: `{app}?{param}={id}`.
#[must_use]
pub fn filtered_list_url(app_base: &str, filter_param: &str, id: &str) -> String {
    format!("{}?{filter_param}={id}", app_base.trim_end_matches('/'))
}
