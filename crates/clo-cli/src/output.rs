use serde::Serialize;

/// Widest a table column may grow before cells are cut with "...".
const MAX_COL_WIDTH: usize = 72;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn clip(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count()).min(MAX_COL_WIDTH);
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:w$}", clip(c, w))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().map(|h| h.to_string()).collect()));
    out.push(line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push(line(row.clone()));
    }
    out
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    for line in render_table(headers, &rows) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align() {
        let lines = render_table(
            &["ID", "OUTCOME"],
            vec![vec!["1".into(), "PLO3".into()], vec!["12".into(), "PLO10".into()]].as_slice(),
        );
        assert_eq!(lines[0], "ID  OUTCOME");
        assert_eq!(lines[1], "--  -------");
        assert_eq!(lines[2], "1   PLO3");
        assert_eq!(lines[3], "12  PLO10");
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(100);
        let lines = render_table(&["CLO"], &[vec![long]]);
        assert_eq!(lines[2].chars().count(), MAX_COL_WIDTH);
        assert!(lines[2].ends_with("..."));
    }
}
