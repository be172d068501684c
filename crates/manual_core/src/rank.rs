use std::cmp::Reverse;

use crate::Item;

/// Orders merged items by view count, highest first.
///
/// The sort is stable: items with equal counts keep their merge order, which
/// carries the upstream relevance ranking.
pub fn rank_items(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by_key(|item| Reverse(item.view_metric));
    items
}
