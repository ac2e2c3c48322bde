//! Table rendering for formatted output.

use console::measure_text_width;

/// Marker appended to truncated cells.
const ELLIPSIS: &str = "...";

/// A simple box-drawn table.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    max_widths: Vec<Option<usize>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();
        let max_widths = vec![None; headers.len()];

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            max_widths,
        }
    }

    /// Cap column widths. Longer cells are cut and end in `...`.
    pub fn with_max_widths(mut self, widths: &[usize]) -> Self {
        for (slot, width) in self.max_widths.iter_mut().zip(widths) {
            *slot = Some(*width);
        }
        self
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| match self.max_widths.get(i).copied().flatten() {
                Some(max) => truncate(cell, max),
                None => cell.to_string(),
            })
            .collect();

        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
            }
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_border('┌', '┬', '┐'));
        output.push('\n');

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_border('├', '┼', '┤'));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output.push_str(&self.render_border('└', '┴', '┘'));

        output
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, width) in self.column_widths.iter().enumerate() {
            s.push_str(&"─".repeat(width + 2));
            if i < self.column_widths.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        s
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(|s| s.as_str()).unwrap_or("");
            // `{:width$}` pads by chars, not display columns.
            let padding = width.saturating_sub(measure_text_width(cell));
            s.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }

        s
    }
}

/// Cut `text` to at most `max` display columns, ending in `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if measure_text_width(text) <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = measure_text_width(c.encode_utf8(&mut [0; 4]));
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(vec!["A", "B"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        let output = table.render();
        assert!(output.contains("A"));
        assert!(output.contains("B"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(vec!["Name", "Config"]);
        table.add_row(vec!["mail", "✓"]);
        table.add_row(vec!["sms", "✗"]);

        assert_eq!(table.row_count(), 2);
        let output = table.render();
        assert!(output.contains("mail"));
        assert!(output.contains("✗"));
    }

    #[test]
    fn table_handles_missing_cells() {
        let mut table = Table::new(vec!["A", "B", "C"]);
        table.add_row(vec!["only", "two"]);

        let output = table.render();
        assert!(output.contains("only"));
        assert!(output.contains("two"));
    }

    #[test]
    fn table_rows_align_with_wide_chars() {
        let mut table = Table::new(vec!["Name"]);
        table.add_row(vec!["あい"]);
        table.add_row(vec!["abcd"]);

        let widths: Vec<usize> = table.render().lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn table_render_consistency() {
        let mut table = Table::new(vec!["Provider", "Status", "Result/Error"]);
        table.add_row(vec!["a", "✓ Success", "1"]);
        table.add_row(vec!["b", "✗ Error", "boom"]);

        let lines: Vec<_> = table.render().lines().map(str::to_string).collect();
        // top border, header, separator, 2 data rows, bottom border
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn max_widths_truncate_cells() {
        let mut table = Table::new(vec!["Text"]).with_max_widths(&[8]);
        table.add_row(vec!["a long description"]);
        assert!(table.render().contains("a lon..."));
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("0123456789abc", 10), "0123456...");
    }
}
