//! End-to-end pipeline tests against a DuckDB file.

mod common;

use std::path::PathBuf;

use basket_pnl::{DatabaseConfig, NoData, NoticeLevel, Outcome, PnlDashboard, Settings};
use common::names;

#[test]
fn report_from_seeded_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());

    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(&path))
        .build()
        .unwrap();
    let report = dashboard.report();
    assert!(report.notices.is_empty(), "{:?}", report.notices);

    let summary = report.outcome.summary().expect("summary");
    assert_eq!(summary.live_intra, common::LATEST_INTRA);
    assert_eq!(summary.live_daily, common::LATEST_DAILY);
    assert_eq!(summary.total_live, common::LATEST_INTRA + common::LATEST_DAILY);
    assert_eq!(summary.paper, common::LATEST_PAPER);
    assert_eq!(summary.last_update.to_string(), "02-01-2024, 15:30");

    assert_eq!(names(&summary.intra_baskets), ["ALPHA", "BRAVO"]);
    assert_eq!(names(&summary.daily_baskets), ["CHARLIE", "FOXTROT", "DELTA"]);
    assert_eq!(names(&summary.paper_baskets), ["DELTA"]);
}

#[test]
fn each_report_sees_fresh_data() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());
    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(&path))
        .build()
        .unwrap();

    let before = dashboard.report();
    assert_eq!(before.outcome.summary().unwrap().live_intra, common::LATEST_INTRA);

    let writer = duckdb::Connection::open(&path).unwrap();
    writer
        .execute_batch(
            "INSERT INTO pnlhtts VALUES ('2024-01-03', '10:00:00', 1.0, 2.0, 3.00, 4.0, 5.0)",
        )
        .unwrap();
    drop(writer);

    let after = dashboard.report();
    let summary = after.outcome.summary().unwrap();
    assert_eq!(summary.live_intra, 3.0);
    assert_eq!(summary.last_update.to_string(), "03-01-2024, 10:00");
}

#[test]
fn missing_database_is_no_data_with_notice() {
    let dashboard = PnlDashboard::builder()
        .settings(Settings::default())
        .database(DatabaseConfig::DuckDb {
            path: PathBuf::from("/nonexistent/pnl.duckdb"),
        })
        .build()
        .unwrap();

    let report = dashboard.report();
    assert_eq!(
        report.outcome,
        Outcome::NoData {
            reason: NoData::Baskets
        }
    );
    assert_eq!(report.notices.len(), 1);
    assert_eq!(report.notices[0].level, NoticeLevel::Error);
}

#[test]
fn empty_snapshot_table_is_no_data() {
    let tmp = tempfile::tempdir().unwrap();
    let sql = format!("{}\nDELETE FROM pnlhtts;", common::SEED_SQL);
    let path = common::seed_file_with(tmp.path(), &sql);

    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(&path))
        .build()
        .unwrap();

    let report = dashboard.report();
    assert_eq!(report.outcome, Outcome::NoData { reason: NoData::Pnl });
    assert!(report.notices.is_empty());
}

#[test]
fn missing_pnl_table_reports_query_error() {
    let tmp = tempfile::tempdir().unwrap();
    let sql = format!("{}\nDROP TABLE pnlhtts;", common::SEED_SQL);
    let path = common::seed_file_with(tmp.path(), &sql);

    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(&path))
        .build()
        .unwrap();

    let report = dashboard.report();
    assert_eq!(report.outcome, Outcome::NoData { reason: NoData::Pnl });
    assert_eq!(report.notices.len(), 1);
    assert!(report.notices[0].message.starts_with("Error fetching last row:"));
}

#[test]
fn custom_table_names_from_toml() {
    let tmp = tempfile::tempdir().unwrap();
    let sql = format!(
        "{}\nALTER TABLE httsbaskets RENAME TO baskets;\nALTER TABLE pnlhtts RENAME TO pnl_live;",
        common::SEED_SQL
    );
    let path = common::seed_file_with(tmp.path(), &sql);

    let config = tmp.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[database]\nkind = \"duckdb\"\npath = {:?}\n\n[tables]\nbaskets = \"baskets\"\npnl = \"pnl_live\"\n",
            path.to_str().unwrap()
        ),
    )
    .unwrap();

    let dashboard = PnlDashboard::builder().config_file(&config).build().unwrap();
    let report = dashboard.report();
    assert_eq!(
        report.outcome.summary().unwrap().paper,
        common::LATEST_PAPER
    );
}

#[test]
fn missing_config_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let result = PnlDashboard::builder()
        .config_file(tmp.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn sql_escape_hatch_returns_rows_and_notices() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::seed_file(tmp.path());
    let dashboard = PnlDashboard::builder()
        .settings(common::settings_for(&path))
        .build()
        .unwrap();

    let (rows, notices) = dashboard.sql("SELECT BASKETNAME FROM httsbaskets WHERE OWNED = 'PAPER'");
    assert_eq!(rows.len(), 2);
    assert!(notices.is_empty());

    let (rows, notices) = dashboard.sql("SELEC nonsense");
    assert!(rows.is_empty());
    assert_eq!(notices.len(), 1);
}
