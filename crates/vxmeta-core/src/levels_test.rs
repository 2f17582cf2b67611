use super::*;

#[test]
fn strips_unit_marker() {
    assert_eq!(level_sort_key("P500"), Some(500));
    assert_eq!(level_sort_key("P850"), Some(850));
    assert_eq!(level_sort_key("Z10"), Some(10));
}

#[test]
fn strips_range_suffix() {
    assert_eq!(level_sort_key("P50-100"), Some(50));
    assert_eq!(level_sort_key("P0-90"), Some(0));
}

#[test]
fn unparseable_codes_have_no_key() {
    assert_eq!(level_sort_key("P"), None);
    assert_eq!(level_sort_key("PXYZ"), None);
    assert_eq!(level_sort_key(""), None);
}

#[test]
fn sorts_numerically_not_lexically() {
    // Lexical order would put P1000 before P500.
    let mut levels = vec![
        "P850".to_string(),
        "P1000".to_string(),
        "P500".to_string(),
    ];
    sort_levels(&mut levels);
    assert_eq!(levels, vec!["P500", "P850", "P1000"]);
}

#[test]
fn pressure_levels_order_by_value() {
    let mut levels = vec!["P850".to_string(), "P500".to_string()];
    sort_levels(&mut levels);
    assert_eq!(levels, vec!["P500", "P850"]);
}

#[test]
fn unparseable_codes_sort_last() {
    let mut levels = vec![
        "PXYZ".to_string(),
        "P500".to_string(),
        "PABC".to_string(),
    ];
    sort_levels(&mut levels);
    assert_eq!(levels, vec!["P500", "PABC", "PXYZ"]);
}

#[test]
fn range_codes_interleave_with_plain_codes() {
    let mut levels = vec![
        "P500".to_string(),
        "P50-100".to_string(),
        "P250".to_string(),
    ];
    sort_levels(&mut levels);
    assert_eq!(levels, vec!["P50-100", "P250", "P500"]);
}
