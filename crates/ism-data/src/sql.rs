//! SQL literal rendering and `INSERT` statement layout.

use std::fmt::Write;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const INDENT: &str = "    ";

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A single literal in a `VALUES` list.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    /// The server-side `NOW()` call, emitted unquoted.
    Now,
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn int(value: impl Into<i64>) -> Self {
        SqlValue::Int(value.into())
    }

    pub fn render(&self) -> String {
        match self {
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Text(s) => format!("'{}'", escape_string(s)),
            SqlValue::Now => "NOW()".to_string(),
        }
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE)
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, dropping sub-seconds.
pub fn format_timestamp(ts: PrimitiveDateTime) -> Result<String, time::error::Format> {
    ts.format(TIMESTAMP)
}

/// A generated record that maps onto one row of a table.
pub trait SqlRow {
    const TABLE: &'static str;
    /// Column names, grouped the way they are laid out in the statement header.
    const COLUMN_LINES: &'static [&'static [&'static str]];

    /// Values in column order.
    fn values(&self) -> Result<Vec<SqlValue>, time::error::Format>;

    fn column_count() -> usize {
        Self::COLUMN_LINES.iter().map(|line| line.len()).sum()
    }

    fn to_insert(&self) -> Result<String, time::error::Format> {
        Ok(render_insert(Self::TABLE, Self::COLUMN_LINES, &self.values()?))
    }
}

/// Renders a multi-line `INSERT`: one header line per column group, one value per line.
pub fn render_insert(table: &str, column_lines: &[&[&str]], values: &[SqlValue]) -> String {
    debug_assert_eq!(
        column_lines.iter().map(|line| line.len()).sum::<usize>(),
        values.len(),
        "column/value count mismatch for {table}"
    );

    let mut out = String::new();
    let _ = writeln!(out, "INSERT INTO {table} (");
    for (i, line) in column_lines.iter().enumerate() {
        let separator = if i + 1 < column_lines.len() { "," } else { "" };
        let _ = writeln!(out, "{INDENT}{}{separator}", line.join(", "));
    }
    out.push_str(") VALUES (\n");

    for (i, value) in values.iter().enumerate() {
        out.push_str(INDENT);
        out.push_str(&value.render());
        if i + 1 < values.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str(");");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Month, Time};

    #[test]
    fn test_render_values() {
        assert_eq!(SqlValue::int(42u32).render(), "42");
        assert_eq!(SqlValue::Now.render(), "NOW()");
        assert_eq!(SqlValue::text("DC").render(), "'DC'");
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(SqlValue::text("Macy's Herald Sq").render(), "'Macy''s Herald Sq'");
    }

    #[test]
    fn test_insert_layout() {
        let sql = render_insert(
            "widgets",
            &[&["id", "name"], &["created_at"]],
            &[SqlValue::int(1), SqlValue::text("a"), SqlValue::Now],
        );

        assert_eq!(
            sql,
            "INSERT INTO widgets (\n    id, name,\n    created_at\n) VALUES (\n    1,\n    'a',\n    NOW()\n);"
        );
    }

    #[test]
    fn test_timestamp_format() {
        let date = Date::from_calendar_date(2024, Month::March, 7).unwrap();
        let ts = PrimitiveDateTime::new(date, Time::from_hms_nano(9, 5, 3, 123_456).unwrap());

        assert_eq!(format_date(date).unwrap(), "2024-03-07");
        assert_eq!(format_timestamp(ts).unwrap(), "2024-03-07 09:05:03");
    }
}
