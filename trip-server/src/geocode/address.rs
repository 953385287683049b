//! Address formatting.

/// Join address lines into a single display string.
///
/// Blank lines are dropped and each line is trimmed.
///
/// # Examples
///
/// ```
/// use trip_server::geocode::format_address;
///
/// let lines = ["Kanatna St, 22", "", " Odesa ", "Ukraine"];
/// assert_eq!(format_address(lines), "Kanatna St, 22, Odesa, Ukraine");
/// ```
pub fn format_address<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalize free-form address text for use as a cache key.
pub fn normalize_query(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_comma() {
        assert_eq!(format_address(["a", "b", "c"]), "a, b, c");
    }

    #[test]
    fn empty_input() {
        assert_eq!(format_address(Vec::<String>::new()), "");
        assert_eq!(format_address(["  ", ""]), "");
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_query("  Chycherina   Vulytsya "), "chycherina vulytsya");
    }
}
