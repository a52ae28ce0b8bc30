use crate::extract::RawProductNode;

/// Keeps the nodes whose full, untruncated title contains `query`,
/// ignoring case. An empty result is a valid outcome.
#[must_use]
pub fn filter_by_query(nodes: Vec<RawProductNode>, query: &str) -> Vec<RawProductNode> {
    let needle = query.to_lowercase();
    nodes
        .into_iter()
        .filter(|node| node.title_text.to_lowercase().contains(&needle))
        .collect()
}
