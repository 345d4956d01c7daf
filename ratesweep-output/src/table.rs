//! Box-drawing table rendering

use colored::*;

/// Renders rows of cells under a header line
#[derive(Debug, Clone)]
pub struct TableFormatter {
    colorize: bool,
}

enum Border {
    Top,
    Middle,
    Bottom,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { colorize: true }
    }

    /// A formatter that never emits ANSI escapes
    pub fn plain() -> Self {
        Self { colorize: false }
    }

    /// Render a table with headers and rows.
    ///
    /// Rows shorter than the header are padded with empty cells; extra
    /// cells are dropped.
    pub fn render(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut col_widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in col_widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        self.push_border(&mut out, &col_widths, Border::Top);

        out.push('│');
        for (header, width) in headers.iter().zip(&col_widths) {
            let padded = format!("{:<width$}", header, width = width);
            if self.colorize {
                out.push_str(&format!(" {} │", padded.bright_cyan().bold()));
            } else {
                out.push_str(&format!(" {} │", padded));
            }
        }
        out.push('\n');
        self.push_border(&mut out, &col_widths, Border::Middle);

        for row in rows {
            out.push('│');
            for (i, width) in col_widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&format!(" {:>width$} │", cell, width = width));
            }
            out.push('\n');
        }

        self.push_border(&mut out, &col_widths, Border::Bottom);
        out
    }

    fn push_border(&self, out: &mut String, col_widths: &[usize], border: Border) {
        let (left, join, right) = match border {
            Border::Top => ('┌', '┬', '┐'),
            Border::Middle => ('├', '┼', '┤'),
            Border::Bottom => ('└', '┴', '┘'),
        };

        out.push(left);
        for (i, &width) in col_widths.iter().enumerate() {
            if i > 0 {
                out.push(join);
            }
            out.push_str(&"─".repeat(width + 2));
        }
        out.push(right);
        out.push('\n');
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_table() {
        let table = TableFormatter::plain().render(
            &["rate", "req/s"],
            &[
                vec!["10".to_string(), "9.9".to_string()],
                vec!["100".to_string(), "99.7".to_string()],
            ],
        );

        let expected = "\
┌──────┬───────┐
│ rate │ req/s │
├──────┼───────┤
│   10 │   9.9 │
│  100 │  99.7 │
└──────┴───────┘
";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = TableFormatter::plain().render(&["a", "b"], &[vec!["1".to_string()]]);
        assert!(table.contains("│ 1 │   │"));
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let table = TableFormatter::plain().render(&["uri"], &[]);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("│ uri │"));
    }
}
