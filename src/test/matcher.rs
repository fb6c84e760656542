#[cfg(test)]
mod tests {
    use crate::app::matcher::{NameMatcher, normalize, rewrite, tokenize};
    use crate::error::LedgerError;
    use crate::models::CatalogEntry;
    use crate::store::FundCatalog;

    fn catalog(entries: &[(&str, u32)]) -> FundCatalog {
        FundCatalog::from_entries(
            entries
                .iter()
                .map(|(name, id)| CatalogEntry::new(name.to_string(), *id)),
        )
    }

    fn set(tokens: &[&str]) -> std::collections::BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tokenize_splits_on_spaces_and_hyphens() {
        assert_eq!(
            tokenize("  Axis Liquid Fund - Growth "),
            set(&["axis", "liquid", "fund", "growth"])
        );
        assert_eq!(tokenize("Mid-Cap"), set(&["mid", "cap"]));
        assert_eq!(
            tokenize("Axis\u{a0}Liquid\tFund - Growth"),
            set(&["axis\u{a0}liquid\tfund", "growth"])
        );
    }

    #[test]
    fn rewrite_drops_noise_and_expands_compounds() {
        assert_eq!(
            normalize("HDFC Smallcap Fund - Direct Plan - Growth Option"),
            set(&["hdfc", "small", "cap", "direct", "growth"])
        );
        assert_eq!(
            normalize("SBI Bluechip Fund Growth"),
            set(&["sbi", "blue", "chip", "growth", "regular"])
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let names = [
            "Axis Liquid Fund - Growth",
            "HDFC Smallcap Fund - Direct Plan - Growth Option",
            "Kotak Midcap Largecap Bluechip Plan",
            "Regular Plan",
            "",
            "fund - plan - option",
        ];

        for name in names {
            let once = normalize(name);
            assert_eq!(rewrite(once.clone()), once, "not idempotent for '{}'", name);
        }
    }

    #[test]
    fn exact_name_matches_with_zero_distance() {
        let catalog = catalog(&[
            ("Axis Liquid Fund - Growth", 1),
            ("Axis Long Term Equity Fund - Growth", 2),
            ("HDFC Mid-Cap Opportunities Fund - Growth", 3),
        ]);
        let matcher = NameMatcher::new(&catalog, 3).unwrap();

        let found = matcher.best_match("Axis Liquid Fund - Growth").unwrap();
        assert_eq!(*found.fund_id(), 1);
        assert_eq!(*found.distance(), 0);

        assert_eq!(matcher.resolve("HDFC Midcap Opportunities - Growth").unwrap(), 3);
    }

    #[test]
    fn ties_go_to_smallest_catalog_name() {
        let catalog = catalog(&[("Beta Growth", 1), ("Alpha Growth", 2)]);
        let matcher = NameMatcher::new(&catalog, 3).unwrap();

        let found = matcher.best_match("Growth").unwrap();
        assert_eq!(*found.distance(), 1);
        assert_eq!(found.catalog_name(), "Alpha Growth");
        assert_eq!(*found.fund_id(), 2);
    }

    #[test]
    fn matching_is_repeatable() {
        let catalog = catalog(&[
            ("Gamma Equity Growth", 7),
            ("Beta Equity Growth", 5),
            ("Alpha Equity Growth", 9),
        ]);
        let matcher = NameMatcher::new(&catalog, 3).unwrap();

        let first = matcher.resolve("Equity Growth").unwrap();
        for _ in 0..20 {
            assert_eq!(matcher.resolve("Equity Growth").unwrap(), first);
        }
        assert_eq!(first, 9);
    }

    #[test]
    fn poor_match_still_returns_an_id() {
        let catalog = catalog(&[("Axis Liquid Fund - Growth", 1)]);
        let matcher = NameMatcher::new(&catalog, 1).unwrap();

        let found = matcher.best_match("Completely Different Scheme").unwrap();
        assert_eq!(*found.fund_id(), 1);
        assert!(*found.distance() > 1);
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let err = NameMatcher::new(&FundCatalog::default(), 3).unwrap_err();
        assert!(matches!(err, LedgerError::FatalConfig(_)));
    }
}
