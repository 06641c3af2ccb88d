//! Feed assembly: merge per-source items into one newest-first collection.

use crate::models::FeedItem;
use itertools::Itertools;

/// Concatenate source batches in the order given and sort newest first.
pub fn assemble(batches: impl IntoIterator<Item = Vec<FeedItem>>) -> Vec<FeedItem> {
    let mut items = batches.into_iter().concat();
    sort_newest_first(&mut items);
    items
}

/// Order by `scraped_at`, descending. The sort is stable, so items captured
/// at the same instant keep their discovery order. `scraped_at` is
/// fixed-width UTC, so string order is time order.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.stub.scraped_at.cmp(&a.stub.scraped_at));
}
