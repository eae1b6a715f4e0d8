use std::collections::BTreeMap;

use obra_types::{FieldValue, Record};

/// SQL `LIKE` over plain strings: `%` matches any run of characters,
/// everything else is literal. No escape syntax, same as the wire contract.
pub fn like_match(value: &str, pattern: &str) -> bool {
    if !pattern.contains('%') {
        return value == pattern;
    }
    let segments: Vec<&str> = pattern.split('%').collect();
    let last = segments.len() - 1;
    let mut rest = value;
    for (i, seg) in segments.iter().enumerate() {
        if seg.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(seg) {
                Some(tail) => rest = tail,
                None => return false,
            }
        } else if i == last {
            return rest.ends_with(seg);
        } else {
            match rest.find(seg) {
                Some(pos) => rest = &rest[pos + seg.len()..],
                None => return false,
            }
        }
    }
    true
}

/// Applies every filter pair to one record. Text fields get contains
/// semantics (the value is wrapped in `%`, wildcards inside it still
/// apply); other kinds compare exactly. Unknown keys are ignored, like
/// unknown query parameters.
pub fn matches_filters<T: Record>(record: &T, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(key, raw)| match record.field(key) {
        Some(FieldValue::Text(text)) => like_match(&text, &format!("%{}%", raw)),
        Some(FieldValue::Empty) => false,
        Some(other) => other.to_string() == *raw,
        None => true,
    })
}

/// Sorts rows by one column key. Rows missing the key keep their relative
/// position at the front.
pub fn sort_rows<T: Record>(rows: &mut [T], sort_by: &str, asc: bool) {
    rows.sort_by(|a, b| {
        let left = a.field(sort_by).unwrap_or(FieldValue::Empty);
        let right = b.field(sort_by).unwrap_or(FieldValue::Empty);
        let ordering = left.compare(&right);
        if asc {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use obra_types::Project;
    use rstest::rstest;

    #[rstest]
    #[case("PRJ-001", "PRJ-001", true)]
    #[case("PRJ-001", "PRJ-002", false)]
    #[case("PRJ-001", "PRJ%", true)]
    #[case("PRJ-001", "%001", true)]
    #[case("PRJ-001", "%J-0%", true)]
    #[case("PRJ-001", "P%1", true)]
    #[case("PRJ-001", "%XYZ%", false)]
    #[case("aa", "a%a", true)]
    #[case("a", "a%a", false)]
    #[case("anything", "%%", true)]
    #[case("", "", true)]
    #[case("", "%", true)]
    fn like_match_follows_sql_semantics(
        #[case] value: &str,
        #[case] pattern: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(like_match(value, pattern), expected);
    }

    fn filters(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn project(code: &str, title: &str) -> Project {
        Project {
            id: Some(1),
            code: code.into(),
            title: title.into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn text_filters_use_contains() {
        let row = project("PRJ-001", "Harbour bridge");
        assert!(matches_filters(&row, &filters(&[("title", "bridge")])));
        assert!(matches_filters(&row, &filters(&[("code", "PRJ%1")])));
        assert!(!matches_filters(&row, &filters(&[("title", "tunnel")])));
    }

    #[test]
    fn numeric_filters_compare_exactly() {
        let row = project("PRJ-001", "Harbour bridge");
        assert!(matches_filters(&row, &filters(&[("id", "1")])));
        assert!(!matches_filters(&row, &filters(&[("id", "10")])));
    }

    #[test]
    fn unknown_filter_keys_are_ignored() {
        let row = project("PRJ-001", "Harbour bridge");
        assert!(matches_filters(&row, &filters(&[("nonsense", "x")])));
    }

    #[test]
    fn all_filters_must_hold() {
        let row = project("PRJ-001", "Harbour bridge");
        assert!(matches_filters(
            &row,
            &filters(&[("code", "PRJ"), ("title", "bridge")])
        ));
        assert!(!matches_filters(
            &row,
            &filters(&[("code", "PRJ"), ("title", "tunnel")])
        ));
    }

    #[test]
    fn sort_rows_orders_by_key_both_ways() {
        let mut rows = vec![
            project("B", "two"),
            project("C", "three"),
            project("A", "one"),
        ];
        sort_rows(&mut rows, "code", true);
        let codes: Vec<&str> = rows.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);

        sort_rows(&mut rows, "code", false);
        let codes: Vec<&str> = rows.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "B", "A"]);
    }
}
