//! Name matching against the reference table.

use crate::table::{ReferenceTable, TableEntry};

/// Exact lookup of a normalised query.
#[must_use]
pub fn exact_match<'t>(table: &'t ReferenceTable, query: &str) -> Option<&'t TableEntry> {
    table.get(query)
}

/// First entry, in declaration order, whose name contains the query or is
/// contained in it.
///
/// The query must be non-empty; the empty string is a substring of every key.
#[must_use]
pub fn substring_match<'t>(table: &'t ReferenceTable, query: &str) -> Option<&'t TableEntry> {
    if query.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|entry| entry.name.contains(query) || query.contains(entry.name.as_str()))
}

/// Table names within a small edit distance of the query, closest first.
///
/// Used for "did you mean" hints when nothing resolves. A name qualifies when
/// at most half of the longer string's characters need editing.
#[must_use]
pub fn nearest_names<'t>(table: &'t ReferenceTable, query: &str, limit: usize) -> Vec<&'t str> {
    let query_len = query.chars().count();
    if query_len == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, usize, &str)> = table
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let distance = levenshtein_distance(&entry.name, query);
            let longest = query_len.max(entry.name.chars().count());
            (distance * 2 <= longest).then_some((distance, position, entry.name.as_str()))
        })
        .collect();

    // Declaration order breaks ties
    scored.sort_unstable_by_key(|&(distance, position, _)| (distance, position));
    scored.into_iter().take(limit).map(|(_, _, name)| name).collect()
}

/// Calculate Levenshtein edit distance between two strings.
///
/// Counts characters, not bytes, so CJK names compare correctly.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Nutrients;
    use crate::table::Category;

    fn table(names: &[&str]) -> ReferenceTable {
        ReferenceTable::from_entries(
            names
                .iter()
                .map(|name| TableEntry::new(*name, Category::Other, Nutrients::default(), 0.5))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_exact_match() {
        let t = table(&["牛奶", "酸奶"]);
        assert_eq!(exact_match(&t, "酸奶").map(|e| e.name.as_str()), Some("酸奶"));
        assert!(exact_match(&t, "奶").is_none());
    }

    #[test]
    fn test_substring_both_directions() {
        let t = ReferenceTable::builtin();
        // key inside query
        assert_eq!(substring_match(&t, "新鲜苹果").map(|e| e.name.as_str()), Some("苹果"));
        // query inside key
        assert_eq!(substring_match(&t, "胸肉").map(|e| e.name.as_str()), Some("鸡胸肉"));
    }

    #[test]
    fn test_substring_first_declared_wins() {
        let t = table(&["牛奶", "酸奶"]);
        assert_eq!(substring_match(&t, "奶").map(|e| e.name.as_str()), Some("牛奶"));

        let t = table(&["酸奶", "牛奶"]);
        assert_eq!(substring_match(&t, "奶").map(|e| e.name.as_str()), Some("酸奶"));
    }

    #[test]
    fn test_substring_rejects_empty() {
        assert!(substring_match(&ReferenceTable::builtin(), "").is_none());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("西兰花", "西蓝花"), 1);
    }

    #[test]
    fn test_nearest_names() {
        let t = ReferenceTable::builtin();
        let names = nearest_names(&t, "西蓝花", 3);
        assert_eq!(names.first().copied(), Some("西兰花"));

        assert!(nearest_names(&t, "xyz", 3).is_empty());
        assert!(nearest_names(&t, "", 3).is_empty());
    }
}
