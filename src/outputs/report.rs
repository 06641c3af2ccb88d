//! End-of-run summary.

use crate::models::FeedItem;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::info;

/// Programme names listed in the summary.
const TOP_PROGRAMS: usize = 5;

#[derive(Debug, Default, PartialEq)]
pub struct FeedSummary {
    pub total: usize,
    pub with_content: usize,
    pub with_broadcast_info: usize,
    pub per_source: BTreeMap<String, usize>,
    /// Most frequently detected programmes, most frequent first.
    pub top_programs: Vec<(String, usize)>,
}

impl FeedSummary {
    pub fn from_items(items: &[FeedItem]) -> Self {
        let per_source = items
            .iter()
            .map(|i| i.stub.source.clone())
            .counts()
            .into_iter()
            .collect();

        let top_programs = items
            .iter()
            .filter_map(|i| i.content.as_ref()?.detected_programs.as_ref())
            .flatten()
            .cloned()
            .counts()
            .into_iter()
            .sorted_by(|(a, na), (b, nb)| nb.cmp(na).then_with(|| a.cmp(b)))
            .take(TOP_PROGRAMS)
            .collect();

        Self {
            total: items.len(),
            with_content: items.iter().filter(|i| i.content.is_some()).count(),
            with_broadcast_info: items
                .iter()
                .filter(|i| {
                    i.content
                        .as_ref()
                        .and_then(|c| c.has_broadcast_info)
                        .unwrap_or(false)
                })
                .count(),
            per_source,
            top_programs,
        }
    }

    pub fn log(&self) {
        info!(
            total = self.total,
            with_content = self.with_content,
            with_broadcast_info = self.with_broadcast_info,
            sources = %self.per_source.keys().join(", "),
            "Feed summary"
        );
        for (source, count) in &self.per_source {
            info!(%source, count, "Items per source");
        }
        for (program, count) in &self.top_programs {
            info!(%program, count, "Detected programme");
        }
    }
}
