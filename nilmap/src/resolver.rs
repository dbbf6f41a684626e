//! Field name resolution

/// Find the source field matching a destination field name.
///
/// Exact match first; when `case_insensitive` is set, falls back to the first
/// candidate equal under Unicode lowercasing. Returns the candidate's index.
pub fn resolve(name: &str, candidates: &[&str], case_insensitive: bool) -> Option<usize> {
    if let Some(index) = candidates.iter().position(|c| *c == name) {
        return Some(index);
    }
    if !case_insensitive {
        return None;
    }
    let folded = name.to_lowercase();
    candidates.iter().position(|c| c.to_lowercase() == folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let names = ["FieldA", "FieldB", "FieldC"];
        assert_eq!(resolve("FieldB", &names, true), Some(1));
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let names = ["Title", "ProductionLicenseId", "ProductionLocationId"];
        assert_eq!(resolve("ProductionLicenseID", &names, true), Some(1));
        assert_eq!(resolve("ProductionLicenseID", &names, false), None);
    }

    #[test]
    fn test_exact_beats_earlier_fold() {
        let names = ["name", "Name"];
        assert_eq!(resolve("Name", &names, true), Some(1));
        assert_eq!(resolve("NAME", &names, true), Some(0));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(resolve("Missing", &["A", "B"], true), None);
        assert_eq!(resolve("A", &[], true), None);
    }

    #[test]
    fn test_unicode_folding() {
        assert_eq!(resolve("ÄRGER", &["ärger"], true), Some(0));
    }
}
