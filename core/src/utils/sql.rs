//! SQL utility functions

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Detect whether a SQL statement already carries a top-level WHERE clause
///
/// Only a `WHERE` keyword at parenthesis depth zero, outside string
/// literals and followed by whitespace counts; a `WHERE` buried in a
/// fully-enclosed sub-select does not.
///
/// # Example
///
/// ```
/// use viewgate_core::utils::sql::has_where_predicate;
///
/// assert!(has_where_predicate("SELECT * FROM FOOS WHERE 1=2"));
/// assert!(!has_where_predicate(
///     "SELECT * FROM (SELECT * FROM EVENTS WHERE ID = 10)"
/// ));
/// ```
pub fn has_where_predicate(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\'' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'\'' => in_string = true,
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'W' | b'w' if depth == 0 => {
                let at_boundary = i == 0 || !is_ident_byte(bytes[i - 1]);
                if at_boundary
                    && bytes.len() > i + 5
                    && bytes[i..i + 5].eq_ignore_ascii_case(b"WHERE")
                    && bytes[i + 5].is_ascii_whitespace()
                {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
