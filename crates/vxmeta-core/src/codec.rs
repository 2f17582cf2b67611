//! JSON list codec for set-valued metadata columns.
//!
//! Collection fields (regions, levels, forecast leads, variables) are stored
//! as JSON arrays in VARCHAR columns. All set operations decode to native
//! sets first; stored text is never string-manipulated directly.

use crate::error::CoreResult;
use crate::levels::compare_levels;
use std::collections::BTreeSet;

/// Canonical ordering for a collection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Plain lexical order (regions, variables).
    Lexical,
    /// Ascending numeric order; non-numeric entries last (forecast leads).
    Numeric,
    /// Level-code order via [`compare_levels`] (vertical levels).
    Level,
}

/// Encode items as a JSON array string.
pub fn encode<S: AsRef<str>>(items: &[S]) -> CoreResult<String> {
    let refs: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    Ok(serde_json::to_string(&refs)?)
}

/// Decode a JSON array string into its items.
pub fn decode(encoded: &str) -> CoreResult<Vec<String>> {
    Ok(serde_json::from_str(encoded)?)
}

/// Sort items in place per the field's canonical ordering.
pub fn sort(items: &mut [String], order: ListOrder) {
    match order {
        ListOrder::Lexical => items.sort(),
        ListOrder::Numeric => items.sort_by(|a, b| {
            let ka = a.parse::<i64>().ok();
            let kb = b.parse::<i64>().ok();
            match (ka, kb) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        }),
        ListOrder::Level => items.sort_by(|a, b| compare_levels(a, b)),
    }
}

/// Set-union any number of encoded lists, re-serialized in canonical order.
pub fn union_all<'a, I>(encoded: I, order: ListOrder) -> CoreResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = BTreeSet::new();
    for e in encoded {
        set.extend(decode(e)?);
    }
    let mut items: Vec<String> = set.into_iter().collect();
    sort(&mut items, order);
    encode(&items)
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
