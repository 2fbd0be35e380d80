use crate::domain::model::{Grouping, ReduceResult};

/// One space-joined line per class with more than one member, in grouping order.
pub fn reduce(grouping: &Grouping) -> Vec<String> {
    grouping
        .classes()
        .filter(|class| class.len() > 1)
        .map(|class| class.to_line())
        .collect()
}

pub fn reduce_with_stats(grouping: &Grouping) -> ReduceResult {
    ReduceResult {
        lines: reduce(grouping),
        classes_seen: grouping.len(),
        words_seen: grouping.word_count(),
    }
}
