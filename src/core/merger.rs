use crate::domain::model::Grouping;

/// Combines groupings in iteration order.
///
/// For a key present in several inputs, the merged class is their classes
/// concatenated in that same order. No input words are dropped or repeated.
pub fn merge<I>(groupings: I) -> Grouping
where
    I: IntoIterator<Item = Grouping>,
{
    let mut groupings = groupings.into_iter();
    // 第一份直接沿用，避免空表逐一搬移
    let Some(mut merged) = groupings.next() else {
        return Grouping::new();
    };

    for grouping in groupings {
        merged.absorb(grouping);
    }
    merged
}
