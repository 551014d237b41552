//! What's a project without a util module.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "add", "all", "alter", "and", "as", "asc", "between", "by", "case", "check", "column",
        "create", "database", "default", "delete", "desc", "distinct", "drop", "else", "exists",
        "for", "from", "group", "having", "in", "index", "insert", "interval", "into", "is",
        "join", "key", "keys", "left", "like", "limit", "not", "null", "on", "or", "order",
        "right", "select", "set", "table", "then", "to", "union", "unique", "update", "use",
        "values", "when", "where",
    ])
});

/// Quote an identifier with back-ticks, unless it's a plain identifier
/// that isn't a reserved word.
pub fn format_ident(ident: &str) -> String {
    let plain = ident
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain && !RESERVED.contains(ident.to_ascii_lowercase().as_str()) {
        ident.to_string()
    } else {
        format!("`{}`", escape_identifier(ident))
    }
}

/// Escape back-ticks inside a quoted identifier.
pub fn escape_identifier(s: &str) -> String {
    s.replace('`', "``")
}

/// Encode a string as a single-quoted SQL literal.
pub fn encode_sql_string(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() + 2);
    encoded.push('\'');
    for c in s.chars() {
        match c {
            '\0' => encoded.push_str("\\0"),
            '\'' => encoded.push_str("\\'"),
            '"' => encoded.push_str("\\\""),
            '\u{8}' => encoded.push_str("\\b"),
            '\n' => encoded.push_str("\\n"),
            '\r' => encoded.push_str("\\r"),
            '\t' => encoded.push_str("\\t"),
            '\u{1a}' => encoded.push_str("\\Z"),
            '\\' => encoded.push_str("\\\\"),
            c => encoded.push(c),
        }
    }
    encoded.push('\'');
    encoded
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_ident() {
        assert_eq!(format_ident("user"), "user");
        assert_eq!(format_ident("user_id2"), "user_id2");
        assert_eq!(format_ident("Order"), "`Order`");
        assert_eq!(format_ident("first name"), "`first name`");
        assert_eq!(format_ident("1col"), "`1col`");
        assert_eq!(format_ident("we`ird"), "`we``ird`");
        assert_eq!(format_ident(""), "``");
    }

    #[test]
    fn test_encode_sql_string() {
        assert_eq!(encode_sql_string("a"), "'a'");
        assert_eq!(encode_sql_string("it's"), "'it\\'s'");
        assert_eq!(encode_sql_string("a\nb\\c"), "'a\\nb\\\\c'");
    }
}
