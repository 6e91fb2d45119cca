//! Shared helper functions for CLI commands.

use console::{measure_text_width, pad_str, truncate_str, Alignment};

use crate::repository::Roster;

/// Truncate a string for display, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_width: usize) -> String {
    truncate_str(s, max_width, "…").into_owned()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

/// Render rows as a psql-style table. The first column is the row index.
pub fn render_table(columns: &[String], rows: &[Vec<String>], max_width: usize) -> String {
    let mut header: Vec<String> = vec![String::new()];
    header.extend(columns.iter().map(|c| truncate(c, max_width)));

    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![i.to_string()];
            cells.extend(row.iter().map(|c| truncate(c, max_width)));
            cells.resize(header.len(), String::new());
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header[col])
                .chain(body.iter().map(|r| &r[col]))
                .map(|c| measure_text_width(c))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Index column and all-numeric columns are right-aligned.
    let right: Vec<bool> = (0..header.len())
        .map(|col| {
            col == 0
                || (body.iter().any(|r| !r[col].is_empty())
                    && body.iter().all(|r| r[col].is_empty() || is_numeric(&r[col])))
        })
        .collect();

    let border = |junction: char| {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("{}{}{}", junction, segments.join(&junction.to_string()), junction)
    };
    let line = |cells: &[String], align_right: bool| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .zip(&right)
            .map(|((c, w), r)| {
                let align = if align_right && *r {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                format!(" {} ", pad_str(c, *w, align, None))
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let edge = border('+');
    let mut out = Vec::with_capacity(body.len() + 4);
    out.push(edge.clone());
    out.push(line(&header, false));
    out.push(format!("|{}|", &edge[1..edge.len() - 1]));
    for row in &body {
        out.push(line(row, true));
    }
    out.push(edge);
    out.join("\n")
}

/// Render the whole roster as a table.
pub fn render_roster(roster: &Roster, max_width: usize) -> String {
    let rows: Vec<Vec<String>> = roster
        .rows()
        .iter()
        .map(|univ| {
            roster
                .columns()
                .iter()
                .map(|c| univ.cell(c).to_string())
                .collect()
        })
        .collect();
    render_table(roster.columns(), &rows, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a very long university name", 8);
        assert!(cut.starts_with("a very"));
        assert!(cut.ends_with('…'));
        assert!(measure_text_width(&cut) <= 8);
    }

    #[test]
    fn test_render_table() {
        let columns = vec!["Name".to_string(), "Students".to_string()];
        let rows = vec![
            vec!["Example U".to_string(), "1234".to_string()],
            vec!["Other".to_string(), "56".to_string()],
        ];
        let table = render_table(&columns, &rows, 40);
        let expected = "\
+---+-----------+----------+
|   | Name      | Students |
|---+-----------+----------|
| 0 | Example U |     1234 |
| 1 | Other     |       56 |
+---+-----------+----------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_render_roster_short_rows() {
        let roster = Roster::from_reader("Name,fblink\nSolo U\n".as_bytes()).unwrap();
        let table = render_roster(&roster, 40);
        assert!(table.contains("| 0 | Solo U |        |"));
    }
}
