use super::*;

fn row(columns: &[&str], values: Vec<Value>) -> Row {
    Row::new(
        Arc::new(columns.iter().map(|c| c.to_string()).collect()),
        values,
    )
}

#[test]
fn lookup_is_case_insensitive() {
    let r = row(&["MinDate"], vec![Value::Int(1000)]);
    assert_eq!(r.try_i64("mindate").unwrap(), 1000);
}

#[test]
fn opt_i64_maps_null_to_none() {
    let r = row(&["mindate"], vec![Value::Null]);
    assert_eq!(r.opt_i64("mindate").unwrap(), None);
}

#[test]
fn try_i64_rejects_null_and_text() {
    let r = row(&["a", "b"], vec![Value::Null, Value::Text("x".into())]);
    assert!(matches!(r.try_i64("a"), Err(StoreError::ColumnError(_))));
    assert!(matches!(r.try_i64("b"), Err(StoreError::ColumnError(_))));
}

#[test]
fn missing_column_is_an_error() {
    let r = row(&["a"], vec![Value::Int(1)]);
    assert!(matches!(r.try_str("zzz"), Err(StoreError::ColumnError(_))));
}

#[test]
fn column_strings_collects_in_order() {
    let columns = Arc::new(vec!["model".to_string()]);
    let result = QueryResult {
        columns: columns.clone(),
        rows: vec![
            Row::new(columns.clone(), vec![Value::Text("GFS".into())]),
            Row::new(columns.clone(), vec![Value::Text("NAM".into())]),
        ],
    };
    assert_eq!(result.column_strings("model").unwrap(), vec!["GFS", "NAM"]);
}
