//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no status lookups happen here.

/// Format `key = value` rows with the `=` signs aligned.
pub fn format_rows<K: AsRef<str>>(rows: &[(K, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.as_ref().len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{:<width$} = {value}\n", key.as_ref()))
        .collect()
}

/// Print `key = value` rows with the `=` signs aligned.
pub fn print_rows<K: AsRef<str>>(rows: &[(K, String)]) {
    print!("{}", format_rows(rows));
}

/// Format an optional value for display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned() {
        let rows = [("a", "1".to_string()), ("long", "2".to_string())];
        assert_eq!(format_rows(&rows), "a    = 1\nlong = 2\n");
    }

    #[test]
    fn no_rows_format_to_nothing() {
        let rows: [(&str, String); 0] = [];
        assert_eq!(format_rows(&rows), "");
    }

    #[test]
    fn optional_default() {
        assert_eq!(format_optional(None::<u32>, "-"), "-");
        assert_eq!(format_optional(Some(15), "-"), "15");
    }
}
