use crate::domain::model::CanonicalKey;

/// Lowercases `word` (Unicode default mapping, no locale) and sorts its characters.
pub fn canonical_key(word: &str) -> CanonicalKey {
    let mut chars: Vec<char> = word.to_lowercase().chars().collect();
    // 相同字元之間沒有先後之分，不需要穩定排序
    chars.sort_unstable();
    CanonicalKey::from_sorted(chars.into_iter().collect())
}
