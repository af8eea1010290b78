use super::RowError;

/// Number of logical fields in a source row: tag, category, weight, alternates.
const MAX_FIELDS: usize = 4;
/// Rows with fewer fields than this carry no weight and are skipped.
const MIN_FIELDS: usize = 3;

/// One parsed row of the tag source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub tag: String,
    /// Read but not used for ranking.
    pub category: String,
    /// `None` when the weight field is not a non-negative integer.
    pub weight: Option<u64>,
    pub alternates: Vec<String>,
}

/// Split one line into comma-separated fields.
///
/// A field wrapped in double quotes may contain literal commas; a doubled
/// quote inside a quoted field is a literal quote. An unterminated quote
/// runs to the end of the line.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

/// Parse a weight field: ASCII digits only, anything else is `None`.
fn parse_weight(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse one source line into a row.
///
/// Fields past the fourth are ignored; the alternates field is itself a
/// comma-separated list and is normally quoted.
pub fn parse_row(line: &str) -> Result<SourceRow, RowError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(RowError::EmptyRow);
    }

    let mut fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return Err(RowError::TooFewFields(fields.len()));
    }
    fields.truncate(MAX_FIELDS);
    fields.resize(MAX_FIELDS, String::new());

    let mut it = fields.into_iter();
    let tag = it.next().unwrap_or_default().trim().to_string();
    let category = it.next().unwrap_or_default().trim().to_string();
    let weight = parse_weight(&it.next().unwrap_or_default());
    let alternates = it
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(SourceRow {
        tag,
        category,
        weight,
        alternates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_fields() {
        assert_eq!(split_fields("safe,0,2204259"), vec!["safe", "0", "2204259"]);
    }

    #[test]
    fn split_quoted_field_with_commas() {
        assert_eq!(
            split_fields(r#"safe,0,10,"sfw,clean""#),
            vec!["safe", "0", "10", "sfw,clean"]
        );
    }

    #[test]
    fn split_escaped_quote() {
        assert_eq!(
            split_fields(r#""say ""hi""",1,2"#),
            vec![r#"say "hi""#, "1", "2"]
        );
    }

    #[test]
    fn split_unterminated_quote_runs_to_end() {
        assert_eq!(split_fields(r#"a,1,2,"b,c"#), vec!["a", "1", "2", "b,c"]);
    }

    #[test]
    fn split_trailing_empty_field() {
        assert_eq!(split_fields("a,1,2,"), vec!["a", "1", "2", ""]);
    }

    #[test]
    fn parse_full_row() {
        let row = parse_row(r#"rainbow_dash,4,350000,"rd,dashie""#).unwrap();
        assert_eq!(row.tag, "rainbow_dash");
        assert_eq!(row.category, "4");
        assert_eq!(row.weight, Some(350000));
        assert_eq!(row.alternates, vec!["rd", "dashie"]);
    }

    #[test]
    fn parse_row_without_alternates() {
        let row = parse_row("safe,0,2204259\r\n").unwrap();
        assert_eq!(row.weight, Some(2204259));
        assert!(row.alternates.is_empty());
    }

    #[test]
    fn parse_row_non_numeric_weight() {
        assert_eq!(parse_row("safe,0,lots").unwrap().weight, None);
        assert_eq!(parse_row("safe,0,-5").unwrap().weight, None);
        assert_eq!(parse_row("safe,0,").unwrap().weight, None);
        assert_eq!(parse_row("safe,0, 42 ").unwrap().weight, Some(42));
    }

    #[test]
    fn parse_row_overflowing_weight() {
        assert_eq!(
            parse_row("safe,0,99999999999999999999999").unwrap().weight,
            None
        );
    }

    #[test]
    fn parse_row_too_few_fields() {
        assert_eq!(parse_row("safe,0"), Err(RowError::TooFewFields(2)));
        assert_eq!(parse_row("safe"), Err(RowError::TooFewFields(1)));
    }

    #[test]
    fn parse_row_empty() {
        assert_eq!(parse_row(""), Err(RowError::EmptyRow));
        assert_eq!(parse_row("   \r\n"), Err(RowError::EmptyRow));
    }

    #[test]
    fn parse_row_ignores_extra_fields() {
        let row = parse_row("a,0,5,b,c,d").unwrap();
        assert_eq!(row.alternates, vec!["b"]);
    }
}
