use super::*;

fn sample_row() -> MetadataRow {
    MetadataRow {
        database: "mv_demo".to_string(),
        model: "GFS".to_string(),
        display_text: MetadataRow::display_text_for("GFS"),
        regions: vec!["CONUS".to_string(), "EAST".to_string()],
        levels: vec!["P500".to_string(), "P850".to_string()],
        fcst_lens: vec!["0".to_string(), "6".to_string(), "12".to_string()],
        fcst_orig: vec!["0".to_string(), "60000".to_string(), "120000".to_string()],
        variables: vec!["TMP".to_string()],
        min_date: 1000,
        max_date: 2000,
        record_count: 5,
        updated_at: 3000,
    }
}

#[test]
fn display_text_substitutes_dots() {
    assert_eq!(MetadataRow::display_text_for("GFS.v16"), "GFS_v16");
    assert_eq!(MetadataRow::display_text_for("GFS"), "GFS");
}

#[test]
fn complete_row_is_publishable() {
    assert!(sample_row().is_publishable());
}

#[test]
fn any_empty_set_field_blocks_publication() {
    for strip in 0..4 {
        let mut row = sample_row();
        match strip {
            0 => row.regions.clear(),
            1 => row.levels.clear(),
            2 => row.fcst_lens.clear(),
            _ => row.variables.clear(),
        }
        assert!(!row.is_publishable(), "field {strip} should gate publication");
    }
}

#[test]
fn default_profile_window_is_five_years() {
    let now = 1_700_000_000;
    let leads: std::collections::BTreeSet<i64> = [0, 6, 12].into_iter().collect();
    let profile = DefaultProfile::new(&leads, now);
    assert_eq!(profile.max_date, now);
    assert_eq!(profile.min_date, now - 5 * 365 * 86_400);
    assert_eq!(profile.fcst_leads, vec!["0", "6", "12"]);
    assert_eq!(profile.fcst_leads_orig, vec!["dflt", "dflt", "dflt"]);
}

#[test]
fn coverage_groups_dedupe_databases() {
    let mut groups = CoverageGroups::new();
    groups.add("ops", "mv_a");
    groups.add("ops", "mv_a");
    groups.add("ops", "mv_b");
    groups.add_ungrouped("mv_c");

    let collected: Vec<(String, Vec<String>)> = groups
        .iter()
        .map(|(label, dbs)| (label.clone(), dbs.iter().cloned().collect()))
        .collect();
    assert_eq!(
        collected,
        vec![
            (
                UNGROUPED_LABEL.to_string(),
                vec!["mv_c".to_string()]
            ),
            (
                "ops".to_string(),
                vec!["mv_a".to_string(), "mv_b".to_string()]
            ),
        ]
    );
}
