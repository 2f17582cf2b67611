use super::*;
use crate::schema;
use vxmeta_db::DuckDbStore;

const NOW: i64 = 1_700_000_000;

async fn seeded_store() -> (DuckDbStore, Config) {
    let store = DuckDbStore::in_memory().unwrap();
    let cfg = Config::default();
    schema::prepare(&store, &cfg).await.unwrap();
    store
        .execute_batch(
            "CREATE SCHEMA mv_demo;
             CREATE TABLE mv_demo.line_data_sl1l2 (
                 stat_header_id BIGINT, fcst_lead BIGINT, fcst_valid_beg TIMESTAMP);
             INSERT INTO mv_demo.line_data_sl1l2 VALUES
                 (1, 0, TIMESTAMP '1970-01-01 00:16:40'),
                 (1, 60000, TIMESTAMP '1970-01-01 00:20:00'),
                 (2, 120000, TIMESTAMP '1970-01-01 00:33:20'),
                 (2, 30, TIMESTAMP '1970-01-01 00:25:00');",
        )
        .await
        .unwrap();
    (store, cfg)
}

#[tokio::test]
async fn creates_profile_from_whole_database() {
    let (store, cfg) = seeded_store().await;
    let profile = get_or_create(&store, &cfg, "mv_demo", "GFS", NOW)
        .await
        .unwrap();

    assert_eq!(profile.fcst_leads, vec!["0", "6", "12", "30"]);
    assert_eq!(profile.fcst_leads_orig, vec!["dflt"; 4]);
    assert_eq!(profile.max_date, NOW);
    assert_eq!(profile.min_date, NOW - 5 * 365 * 86_400);
}

#[tokio::test]
async fn second_call_returns_cached_value() {
    let (store, cfg) = seeded_store().await;
    let first = get_or_create(&store, &cfg, "mv_demo", "GFS", NOW)
        .await
        .unwrap();

    // Underlying data changes; the cached profile must not.
    store
        .execute("INSERT INTO mv_demo.line_data_sl1l2 VALUES (3, 240000, TIMESTAMP '1970-01-01 01:00:00')")
        .await
        .unwrap();

    let second = get_or_create(&store, &cfg, "mv_demo", "GFS", NOW + 1000)
        .await
        .unwrap();
    assert_eq!(first, second);

    let count = store
        .query(&format!(
            "SELECT count(*) AS n FROM {}",
            Tables::new(&cfg).default_leads()
        ))
        .await
        .unwrap();
    assert_eq!(count.rows[0].try_i64("n").unwrap(), 1);
}

#[tokio::test]
async fn profiles_are_keyed_by_database_and_model() {
    let (store, cfg) = seeded_store().await;
    get_or_create(&store, &cfg, "mv_demo", "GFS", NOW)
        .await
        .unwrap();
    get_or_create(&store, &cfg, "mv_demo", "NAM", NOW)
        .await
        .unwrap();

    let count = store
        .query(&format!(
            "SELECT count(*) AS n FROM {}",
            Tables::new(&cfg).default_leads()
        ))
        .await
        .unwrap();
    assert_eq!(count.rows[0].try_i64("n").unwrap(), 2);
}
