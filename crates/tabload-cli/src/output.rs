//! Rendering of normalized query results.

use std::io::Write;

use colored::Colorize;
use tabload::NormalizedResult;
use tabload::results::{RowObject, StatementOutcome};

use crate::cli::OutputFormat;

type OutputResult = Result<(), Box<dyn std::error::Error>>;

/// Print `result` to stdout in the requested format.
pub fn print_result(result: &NormalizedResult, format: OutputFormat) -> OutputResult {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, format)?;
    out.flush()?;
    Ok(())
}

/// Write `result` in the requested format.
pub fn write_result<W: Write>(out: &mut W, result: &NormalizedResult, format: OutputFormat) -> OutputResult {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    match result {
        NormalizedResult::Rows(rows) => write_rows(out, rows, format),
        NormalizedResult::Message { message } => write_message(out, message),
        NormalizedResult::Multiple(outcomes) => {
            for (index, outcome) in outcomes.iter().enumerate() {
                if index > 0 {
                    writeln!(out)?;
                }
                if format == OutputFormat::Table {
                    let title = format!("Result set {}", index + 1);
                    writeln!(out, "{}", title.cyan().bold())?;
                }
                match outcome {
                    StatementOutcome::Rows(rows) => write_rows(out, rows, format)?,
                    StatementOutcome::Message { message } => write_message(out, message)?,
                }
            }
            Ok(())
        }
    }
}

fn write_message<W: Write>(out: &mut W, message: &str) -> OutputResult {
    writeln!(out, "{}", message.yellow())?;
    Ok(())
}

fn write_rows<W: Write>(out: &mut W, rows: &[RowObject], format: OutputFormat) -> OutputResult {
    let Some(first) = rows.first() else {
        if format == OutputFormat::Table {
            writeln!(out, "{}", "(nothing to show)".dimmed())?;
        }
        return Ok(());
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    match format {
        OutputFormat::Csv => write_delimited(out, &columns, rows, b','),
        OutputFormat::Tsv => write_delimited(out, &columns, rows, b'\t'),
        _ => write_table(out, &columns, rows),
    }
}

fn cells<'a>(columns: &'a [&str], row: &'a RowObject) -> impl Iterator<Item = String> + 'a {
    columns
        .iter()
        .map(move |c| row.get(*c).map(|v| v.to_string()).unwrap_or_default())
}

fn write_delimited<W: Write>(out: &mut W, columns: &[&str], rows: &[RowObject], delimiter: u8) -> OutputResult {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(cells(columns, row))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, columns: &[&str], rows: &[RowObject]) -> OutputResult {
    let body: Vec<Vec<String>> = rows.iter().map(|row| cells(columns, row).collect()).collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", header.bold())?;

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-");
    writeln!(out, "{}", rule.dimmed())?;

    for row in &body {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(out, "{}", line.trim_end())?;
    }

    let count = format!("({} row{})", rows.len(), if rows.len() == 1 { "" } else { "s" });
    writeln!(out, "{}", count.dimmed())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tabload::Value;
    use tabload::results::{NO_ROWS_RETURNED, RawStatementResult, normalize};

    use super::*;

    fn render(result: &NormalizedResult, format: OutputFormat) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_result(&mut buf, result, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn people() -> NormalizedResult {
        normalize(&[Some(RawStatementResult::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Value::Integer(1), Value::from("Alice")],
                vec![Value::Integer(2), Value::from("Smith, Bob")],
            ],
        ))])
    }

    #[test]
    fn test_csv_quotes_embedded_delimiters() {
        assert_eq!(render(&people(), OutputFormat::Csv), "id,name\n1,Alice\n2,\"Smith, Bob\"\n");
    }

    #[test]
    fn test_tsv() {
        assert_eq!(render(&people(), OutputFormat::Tsv), "id\tname\n1\tAlice\n2\tSmith, Bob\n");
    }

    #[test]
    fn test_table_alignment() {
        let text = render(&people(), OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id | name      ");
        assert_eq!(lines[1], "---+-----------");
        assert_eq!(lines[2], "1  | Alice");
        assert_eq!(lines[4], "(2 rows)");
    }

    #[test]
    fn test_json_keeps_column_order() {
        let text = render(&people(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["name"], "Smith, Bob");
        assert!(text.find("\"id\"").unwrap() < text.find("\"name\"").unwrap());
    }

    #[test]
    fn test_message_is_printed() {
        let result = normalize(&[Some(RawStatementResult::new(vec!["a".to_string()], vec![]))]);
        assert_eq!(render(&result, OutputFormat::Csv), format!("{}\n", NO_ROWS_RETURNED));
    }

    #[test]
    fn test_multiple_result_sets() {
        let one = RawStatementResult::new(vec!["a".to_string()], vec![vec![Value::Integer(1)]]);
        let result = normalize(&[Some(one.clone()), Some(one)]);
        let text = render(&result, OutputFormat::Table);
        assert!(text.contains("Result set 1"));
        assert!(text.contains("Result set 2"));
    }

    #[test]
    fn test_empty_rows() {
        let text = render(&NormalizedResult::Rows(vec![]), OutputFormat::Table);
        assert_eq!(text, "(nothing to show)\n");
    }
}
