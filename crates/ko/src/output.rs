//! Plain-text columnar output
//!
//! Command listings and upgrade previews print as aligned columns on
//! stdout. No colors, no unicode boxes; the output is meant to be piped.

/// Rows of equal-width columns with an optional header row.
#[derive(Debug, Default)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(titles: &[&str]) -> Self {
        Self {
            header: Some(titles.iter().map(ToString::to_string).collect()),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(ToString::to_string).collect());
    }

    /// Renders the table with columns separated by four spaces. The last
    /// column is never padded, keeping trailing whitespace out of the output.
    pub fn render(&self) -> String {
        let all_rows: Vec<&Vec<String>> = self.header.iter().chain(self.rows.iter()).collect();

        let columns = all_rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &all_rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in all_rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i].saturating_sub(cell.chars().count()) + 4;
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
