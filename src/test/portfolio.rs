#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use crate::app::Portfolio;
    use crate::config::Config;
    use crate::error::LedgerError;
    use crate::models::{Action, CatalogEntry};
    use crate::store::FundCatalog;
    use crate::test::day;

    const STATEMENT: &str = r#"
Consolidated Account Statement
Folio No : 91026529743 PAN: ABCDE1234F KYC : OK PAN : OK
Axis Liquid Fund - Growth (Advisor:ARN-1)       Registrar : KARVY
Opening Unit Balance 0.000
10-OCT-2016 Purchase 5,000.00 1,743.3603 2.868 1,743.3603
Closing Unit Balance: 1,743.3603 NAV on 12-OCT-2016 : INR 2.870
"#;

    #[test]
    fn statement_to_ledger_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("mf_code_names.csv"),
            "1,Axis Liquid Fund - Growth\n2,Axis Long Term Equity Fund - Growth\n",
        )
        .unwrap();
        fs::write(root.join("Consolidated.txt"), STATEMENT).unwrap();
        fs::create_dir_all(root.join("nav")).unwrap();
        fs::write(root.join("nav").join("1.csv"), "2016-10-10,2.868\n2016-10-11,2.870\n").unwrap();

        let root_str = root.display().to_string();
        let config = Config::from_lookup(|_| None)
            .unwrap()
            .with_catalog_path(&format!("{}/mf_code_names.csv", root_str))
            .with_statement_path(&format!("{}/Consolidated.txt", root_str))
            .with_price_dir(&format!("{}/nav", root_str))
            .with_output_path(&format!("{}/out/transactions.csv", root_str));

        let portfolio = Portfolio::from_config(&config).unwrap();
        let summary = portfolio.reconcile(&config, day(2016, 10, 12)).unwrap();

        assert_eq!(*summary.rows(), 3);
        assert_eq!(*summary.open_positions().get(&1).unwrap().units(), dec!(1743.3603));

        let out = fs::read_to_string(root.join("out").join("transactions.csv")).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,Fund ID,Action,Units,Price,Amount,Total Units,Total Cost,Total Value",
                "2016-10-10,1,BUY,1743.3603,2.868,5000.00,1743.3603,5000,4999.9573",
                "2016-10-11,1,,,,,1743.3603,5000,5003.4441",
                "2016-10-12,1,,,,,1743.3603,5000,",
            ]
        );
    }

    #[test]
    fn scenario_resolves_and_validates_axis_liquid() {
        let catalog =
            FundCatalog::from_entries([CatalogEntry::new("Axis Liquid Fund - Growth".to_string(), 1)]);
        let portfolio = Portfolio::new(catalog, 3).unwrap();

        let found = portfolio
            .matcher()
            .best_match("Axis Liquid Fund - Growth (Advisor:ARN-1)")
            .unwrap();
        assert_eq!(*found.fund_id(), 1);

        let ledger = portfolio.parse_statement(STATEMENT).unwrap();
        assert_eq!(ledger.len(), 1);

        let t = ledger.get(day(2016, 10, 10), 1).unwrap();
        assert_eq!(*t.action(), Action::Buy);
        assert_eq!(*t.units(), dec!(1743.3603));
        assert_eq!(*t.price(), dec!(2.868));
        assert_eq!(*t.amount(), dec!(5000.00));
    }

    #[test]
    fn empty_catalog_cannot_build_a_portfolio() {
        let err = Portfolio::new(FundCatalog::default(), 3).unwrap_err();
        assert!(matches!(err, LedgerError::FatalConfig(_)));
    }

    #[test]
    fn block_mismatch_aborts_before_writing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("catalog.csv"), "1,Axis Liquid Fund - Growth\n").unwrap();
        fs::write(
            root.join("statement.txt"),
            STATEMENT.replace("Purchase 5,000.00 1,743.3603", "Redemption (5,000.00) (1,743.3603)"),
        )
        .unwrap();

        let root_str = root.display().to_string();
        let config = Config::from_lookup(|_| None)
            .unwrap()
            .with_catalog_path(&format!("{}/catalog.csv", root_str))
            .with_statement_path(&format!("{}/statement.txt", root_str))
            .with_price_dir(&root_str)
            .with_output_path(&format!("{}/transactions.csv", root_str));

        let portfolio = Portfolio::from_config(&config).unwrap();
        let err = portfolio.reconcile(&config, day(2016, 10, 12)).unwrap_err();
        assert!(matches!(err, LedgerError::BlockTotalMismatch { .. }));
        assert!(!root.join("transactions.csv").exists());
    }
}
