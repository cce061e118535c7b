use tracing::warn;

/// BibTeX's predefined month macros, January first.
pub const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Turn a month value into a BibTeX month expression.
///
/// Accepts a month number (`3`), a name (`March`, `mar.`) or a hyphenated range
/// (`March-April`, rendered as `mar # "-" # apr`). Returns `None` for anything
/// else, e.g. the `????` placeholders some sites emit.
pub fn normalize_month(raw: &str) -> Option<String> {
    if let Ok(n) = raw.trim().parse::<i64>() {
        if (1..=12).contains(&n) {
            return Some(MONTHS[(n - 1) as usize].to_string());
        }
        warn!(month = raw, "month number out of range, skipping");
        return None;
    }

    let mut parts = Vec::new();
    for segment in raw.split('-') {
        let abbr: String = segment.chars().take(3).collect::<String>().to_lowercase();
        match MONTHS.iter().find(|m| **m == abbr) {
            Some(m) => parts.push(*m),
            None => {
                warn!(month = raw, "unknown month value, skipping");
                return None;
            }
        }
    }
    Some(parts.join(" # \"-\" # "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_map_to_macros() {
        assert_eq!(normalize_month("3").as_deref(), Some("mar"));
        assert_eq!(normalize_month("12").as_deref(), Some("dec"));
        assert_eq!(normalize_month(" 1 ").as_deref(), Some("jan"));
        assert_eq!(normalize_month("0"), None);
        assert_eq!(normalize_month("13"), None);
    }

    #[test]
    fn names_and_ranges() {
        assert_eq!(normalize_month("March").as_deref(), Some("mar"));
        assert_eq!(normalize_month("SEPT").as_deref(), Some("sep"));
        assert_eq!(
            normalize_month("March-April").as_deref(),
            Some("mar # \"-\" # apr")
        );
        assert_eq!(
            normalize_month("dec-jan").as_deref(),
            Some("dec # \"-\" # jan")
        );
    }

    #[test]
    fn unknown_values_are_dropped() {
        assert_eq!(normalize_month("????"), None);
        assert_eq!(normalize_month("March-????"), None);
        assert_eq!(normalize_month(""), None);
    }

    #[test]
    fn every_month_number_resolves() {
        proptest::proptest!(|(n in 1u32..=12)| {
            let m = normalize_month(&n.to_string()).expect("valid month");
            proptest::prop_assert_eq!(m.as_str(), MONTHS[(n - 1) as usize]);
        })
    }
}
