//! Column-name sanitization for formula identifiers

use polars::prelude::*;

/// Strip every character that is not an ASCII letter
///
/// ```
/// use anova_polars::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("Test Score (%)"), "TestScore");
/// assert_eq!(sanitize_identifier("group_2"), "group");
/// assert_eq!(sanitize_identifier("123"), "");
/// ```
pub fn sanitize_identifier(label: &str) -> String {
    label.chars().filter(char::is_ascii_alphabetic).collect()
}

/// Report label for a sanitized factor name: first letter upper-cased,
/// the rest lower-cased
pub fn factor_label(sanitized: &str) -> String {
    let mut chars = sanitized.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Frame holding only the `referenced` columns, renamed to their sanitized form
///
/// A reference resolves to the column of that exact name, or else to the one
/// column whose sanitized name matches. Unresolved references are left out so
/// the model reports them as unknown. Fails if two distinct referenced columns
/// sanitize to the same name.
pub(crate) fn sanitize_columns(data: &DataFrame, referenced: &[&str]) -> PolarsResult<DataFrame> {
    let mut picked: Vec<&str> = Vec::with_capacity(referenced.len());
    let mut columns = Vec::with_capacity(referenced.len());
    for &name in referenced {
        let Some(column) = find_column(data, name) else {
            continue;
        };
        if picked.contains(&column.name().as_str()) {
            continue;
        }
        picked.push(column.name().as_str());
        columns.push(column.clone().with_name(sanitize_identifier(name).into()));
    }
    DataFrame::new(columns)
}

fn find_column<'a>(data: &'a DataFrame, name: &str) -> Option<&'a Column> {
    if let Ok(column) = data.column(name) {
        return Some(column);
    }
    let target = sanitize_identifier(name);
    let mut matches = data
        .get_columns()
        .iter()
        .filter(|c| sanitize_identifier(c.name().as_str()) == target);
    match (matches.next(), matches.next()) {
        (Some(column), None) => Some(column),
        _ => None,
    }
}
