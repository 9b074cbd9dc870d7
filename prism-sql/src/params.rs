/// A single bind value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// `NULL`, for `()` and for absent values when asked to
    Null,
    /// Boolean
    Bool(bool),
    /// Any integer up to 64 bits
    Int(i64),
    /// Any float
    Real(f64),
    /// Strings, chars and 128-bit integers (as decimal text)
    Text(String),
    /// `prism::ByteBuf`
    Blob(Vec<u8>),
}

/// How placeholders are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL)
    Numbered,
}

impl PlaceholderStyle {
    /// The placeholder for the parameter at `position` (1-based).
    pub fn placeholder(self, position: usize) -> String {
        match self {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Numbered => format!("${position}"),
        }
    }
}

/// A value flattened into bind parameters. The three lists line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    /// Bind values, in traversal order
    pub values: Vec<SqlValue>,
    /// One placeholder per value
    pub placeholders: Vec<String>,
    /// One column name per value: its path, joined with `_`
    pub columns: Vec<String>,
}

impl Params {
    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `?, ?, ?` or `$1, $2, $3`.
    pub fn placeholder_list(&self) -> String {
        self.placeholders.join(", ")
    }

    /// `INSERT INTO table ("col", ...) VALUES (?, ...)`.
    ///
    /// Columns come from member names and map keys, so each one is quoted
    /// with [`quote_identifier`]. `table` is written as given, which allows a
    /// schema-qualified name; it must not come from untrusted input.
    pub fn insert_statement(&self, table: &str) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            self.placeholder_list()
        )
    }

    /// Column names paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(String::as_str).zip(&self.values)
    }
}

/// Quotes `name` as a delimited SQL identifier: `"name"`, with embedded
/// quotes doubled.
///
/// ```
/// assert_eq!(prism_sql::quote_identifier(r#"a"b"#), r#""a""b""#);
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_testhelpers::test;

    fn sample(style: PlaceholderStyle) -> Params {
        Params {
            values: vec![SqlValue::Int(1), SqlValue::Text("a".into())],
            placeholders: vec![style.placeholder(1), style.placeholder(2)],
            columns: vec!["id".into(), "name".into()],
        }
    }

    #[test]
    fn placeholder_styles() {
        assert_eq!(sample(PlaceholderStyle::Question).placeholder_list(), "?, ?");
        assert_eq!(sample(PlaceholderStyle::Numbered).placeholder_list(), "$1, $2");
    }

    #[test]
    fn insert_statement_lists_every_column() {
        assert_eq!(
            sample(PlaceholderStyle::Question).insert_statement("people"),
            r#"INSERT INTO people ("id", "name") VALUES (?, ?)"#
        );
    }

    #[test]
    fn hostile_column_names_stay_identifiers() {
        let params = Params {
            values: vec![SqlValue::Int(1)],
            placeholders: vec!["?".into()],
            columns: vec![r#"x") VALUES (1); DROP TABLE t; --"#.into()],
        };
        assert_eq!(
            params.insert_statement("t"),
            r#"INSERT INTO t ("x"") VALUES (1); DROP TABLE t; --") VALUES (?)"#
        );
    }

    #[test]
    fn iter_pairs_columns_with_values() {
        let params = sample(PlaceholderStyle::Question);
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, [("id", &SqlValue::Int(1)), ("name", &SqlValue::Text("a".into()))]);
    }
}
