//! Header row cleanup shared by every file format.

use std::collections::HashSet;

/// Trim whitespace and a stray byte-order mark from a header cell.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Turn raw header cells into unique, non-empty column names.
///
/// Blank cells become `Column N` (1-based position). Repeated names get a
/// `.1`, `.2`, ... suffix in order of appearance.
pub fn clean_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let name = normalize_header(value.as_ref());
            if name.is_empty() {
                format!("Column {}", index + 1)
            } else {
                name
            }
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::with_capacity(named.len());
    let mut columns = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("\u{feff}Name"), "Name");
    }

    #[test]
    fn test_blank_headers_get_positions() {
        assert_eq!(
            clean_headers(["Name", "", "  ", "Vendor"]),
            ["Name", "Column 2", "Column 3", "Vendor"]
        );
    }

    #[test]
    fn test_duplicate_headers_get_suffixes() {
        assert_eq!(
            clean_headers(["Name", "Name", "Name.1", "Name"]),
            ["Name", "Name.1", "Name.1.1", "Name.2"]
        );
    }
}
