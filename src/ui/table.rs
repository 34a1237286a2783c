//! Column-aligned tables for `status` and `list`.

use console::measure_text_width;

/// A table whose columns are padded to their widest cell.
///
/// Widths are measured without ANSI escapes, so styled cells line up.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing trailing cells render empty; extra cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render header, rule and rows. The last column is not padded.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let last = widths.len().saturating_sub(1);

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.clone()
                    } else {
                        let pad = widths[i].saturating_sub(measure_text_width(cell));
                        format!("{}{}", cell, " ".repeat(pad))
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers));
        out.push(rule.join("  "));
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_header() {
        let table = Table::new(&["Component", "State"]);
        assert!(table.is_empty());
        let output = table.render();
        assert!(output.starts_with("Component  State"));
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::new(&["Component", "State", "Identifier"]);
        table.add_row(["fd", "present", "fd 9.0.0"]);
        table.add_row(["vim-csris", "absent", ""]);

        let lines: Vec<String> = table.render().lines().map(String::from).collect();
        assert_eq!(lines[0], "Component  State    Identifier");
        assert_eq!(lines[2], "fd         present  fd 9.0.0");
        assert_eq!(lines[3], "vim-csris  absent");
    }

    #[test]
    fn styled_cells_do_not_skew_width() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(["\u{1b}[32mok\u{1b}[0m", "x"]);
        let lines: Vec<String> = table.render().lines().map(String::from).collect();
        assert!(lines[2].ends_with("  x"));
        assert_eq!(measure_text_width(&lines[2]), "ok  x".len());
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(["only"]);
        assert!(table.render().lines().nth(2).unwrap().starts_with("only"));
    }
}
