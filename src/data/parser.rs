//! Delimited Text Parser Module
//! Turns raw CSV text into a grid of cells, tolerating malformed quoting.

use tracing::debug;

/// A parsed row of raw (untrimmed) cells.
pub type Row = Vec<String>;

/// Primary delimiter tried first by auto-detection.
pub const SEMICOLON: char = ';';
/// Fallback delimiter when the semicolon parse looks too narrow.
pub const COMMA: char = ',';

/// Parse `text` into rows using `delimiter`.
///
/// Quotes toggle quoted mode wherever they appear; a doubled quote inside a
/// quoted field yields a literal `"`. Rows whose cells are all blank are
/// dropped. An unterminated quote at end of input is not an error: whatever
/// was accumulated is flushed as the final row.
pub fn parse(text: &str, delimiter: char) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut value = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                value.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == delimiter && !in_quotes {
            row.push(std::mem::take(&mut value));
        } else if (ch == '\n' || ch == '\r') && !in_quotes {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(std::mem::take(&mut value));
            push_row(&mut rows, std::mem::take(&mut row));
        } else {
            value.push(ch);
        }
    }

    if !value.is_empty() || !row.is_empty() {
        row.push(value);
        push_row(&mut rows, row);
    }

    rows
}

/// Parse with `;`, falling back to `,` when the first row has at most two
/// columns. The fallback only applies when there are at least two rows.
pub fn parse_auto(text: &str) -> Vec<Row> {
    let rows = parse(text, SEMICOLON);
    match rows.first() {
        Some(header) if rows.len() >= 2 && header.len() <= 2 => {
            debug!(columns = header.len(), "semicolon parse too narrow, retrying with comma");
            parse(text, COMMA)
        }
        _ => rows,
    }
}

fn push_row(rows: &mut Vec<Row>, row: Row) {
    if row.iter().any(|cell| !cell.trim().is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[Row]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_quoted_field_with_delimiter_and_escaped_quote() {
        let rows = parse("\"a,b\"\"c\",d\n", ',');
        assert_eq!(cells(&rows), vec![vec!["a,b\"c", "d"]]);
    }

    #[test]
    fn test_quoted_newline_stays_in_cell() {
        let rows = parse("x,\"line1\nline2\"\ny,z", ',');
        assert_eq!(cells(&rows), vec![vec!["x", "line1\nline2"], vec!["y", "z"]]);
    }

    #[test]
    fn test_crlf_is_single_terminator() {
        let rows = parse("a;b\r\nc;d\re;f\n", ';');
        assert_eq!(
            cells(&rows),
            vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]
        );
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let rows = parse("a,b\n , \n,,,\n\n\nc,d\n\n", ',');
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_final_row_without_newline_is_flushed() {
        let rows = parse("a,b\nc,", ',');
        assert_eq!(cells(&rows), vec![vec!["a", "b"], vec!["c", ""]]);
    }

    #[test]
    fn test_unterminated_quote_is_best_effort() {
        let rows = parse("a,\"open\nstill open", ',');
        assert_eq!(cells(&rows), vec![vec!["a", "open\nstill open"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("", ',').is_empty());
        assert!(parse_auto("").is_empty());
    }

    #[test]
    fn test_auto_keeps_semicolon_for_wide_header() {
        let rows = parse_auto("a;b;c\n1,5;2;3\n");
        assert_eq!(cells(&rows), vec![vec!["a", "b", "c"], vec!["1,5", "2", "3"]]);
    }

    #[test]
    fn test_auto_falls_back_to_comma_for_narrow_header() {
        let rows = parse_auto("a,b,c\n1,2,3\n");
        assert_eq!(cells(&rows), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_auto_two_semicolon_columns_retries_comma() {
        let rows = parse_auto("a;b\n1;2\n");
        assert_eq!(cells(&rows), vec![vec!["a;b"], vec!["1;2"]]);
    }

    #[test]
    fn test_auto_single_row_is_not_retried() {
        let rows = parse_auto("a,b,c");
        assert_eq!(cells(&rows), vec![vec!["a,b,c"]]);
    }
}
