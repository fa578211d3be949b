// src/extractors/categories.rs

/// Submittal categories, in match priority order.
///
/// Detection is a plain case-insensitive substring test against this list and
/// the first hit wins, so the order here decides the outcome whenever one label
/// is contained in another piece of text (e.g. "another" hits "Other").
pub const SUBMITTAL_TYPES: [&str; 37] = [
    "As-Builts",
    "Attic Stock",
    "Certificates",
    "Closeout",
    "Deferred Submittals",
    "Delegated Design",
    "Calculations",
    "Document",
    "General",
    "Installation Instructions",
    "LEED Submittals",
    "Maintenance Data",
    "Meeting",
    "Mixed Designs",
    "Mock-up",
    "O&M Manuals",
    "Other",
    "Pay request",
    "Payroll",
    "Photos",
    "Plans",
    "Prints",
    "Product data",
    "Product information",
    "Product Manual",
    "Qualification data",
    "Quality Assurance",
    "Reports",
    "Safety",
    "Sample",
    "Schedule",
    "Shop Drawing",
    "Source/Field Quality Control",
    "Specification",
    "Test/Inspections",
    "Training",
    "Warranty",
];

/// Returns the first category whose label occurs in `description`, or "".
pub fn detect_submittal_type(description: &str) -> &'static str {
    let desc_lower = description.to_lowercase();
    SUBMITTAL_TYPES
        .iter()
        .find(|label| desc_lower.contains(&label.to_lowercase()))
        .copied()
        .unwrap_or("")
}

/// Resolves a user supplied label to its canonical spelling.
pub fn lookup(label: &str) -> Option<&'static str> {
    let wanted = label.trim();
    SUBMITTAL_TYPES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(wanted))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_single_category() {
        assert_eq!(detect_submittal_type("Contractor shall submit samples of all concrete mix designs."), "Sample");
        assert_eq!(detect_submittal_type("Provide WARRANTY for roofing"), "Warranty");
        assert_eq!(detect_submittal_type("nothing relevant here"), "");
        assert_eq!(detect_submittal_type(""), "");
    }

    #[test]
    fn test_first_label_in_list_order_wins() {
        // "Product data" precedes "Warranty" in the list regardless of text position
        assert_eq!(detect_submittal_type("Submit warranty and product data."), "Product data");
        // "Document" precedes both "Other" and "Shop Drawing"
        assert_eq!(detect_submittal_type("Submit shop drawings and other documents"), "Document");
    }

    #[test]
    fn test_substring_matching_is_literal() {
        // Known mismatch: "another" contains "other", which outranks "Shop Drawing".
        // Pinned so a change to the matching rule is a deliberate decision.
        assert_eq!(detect_submittal_type("Provide another copy of the shop drawing"), "Other");
        // "general" inside "generalized"
        assert_eq!(detect_submittal_type("Provide generalized layout"), "General");
        // bare "data" is a keyword, not a category
        assert_eq!(detect_submittal_type("Submit data"), "");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("shop drawing"), Some("Shop Drawing"));
        assert_eq!(lookup("  O&M MANUALS "), Some("O&M Manuals"));
        assert_eq!(lookup("Product"), None);
    }

    #[test]
    fn test_every_label_detects_itself_or_an_earlier_label() {
        for (idx, label) in SUBMITTAL_TYPES.iter().enumerate() {
            let detected = detect_submittal_type(label);
            let pos = SUBMITTAL_TYPES.iter().position(|l| *l == detected).unwrap();
            assert!(pos <= idx, "{} detected as later label {}", label, detected);
        }
    }
}
