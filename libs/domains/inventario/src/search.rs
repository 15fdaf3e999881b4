//! Case-insensitive substring matching, in memory and in SQL.

use sea_orm::sea_query::{Expr, IntoCondition};

/// `%fragment%`, lowercased, with LIKE wildcards escaped.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `LOWER("table"."column") LIKE '%fragment%'`
pub(crate) fn contains_ignore_case(table: &str, column: &str, fragment: &str) -> impl IntoCondition {
    Expr::cust_with_values(
        format!(r#"LOWER("{table}"."{column}") LIKE $1"#),
        [like_pattern(fragment)],
    )
}

pub(crate) fn contains_lowercase(haystack: &str, fragment: &str) -> bool {
    haystack.to_lowercase().contains(&fragment.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Café"), "%café%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
    }

    #[test]
    fn test_contains_lowercase() {
        assert!(contains_lowercase("Electrodomésticos", "DOMÉST"));
        assert!(!contains_lowercase("Bebidas", "comida"));
    }
}
