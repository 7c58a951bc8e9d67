//! HTML report writer
//!
//! Produces a single self-contained page: summary cards per squad followed
//! by the full report table.

use chrono::Local;

use super::{ReportTable, SquadSummary, TableWriter, COLUMNS, HTML_FILE};
use crate::coverage::Coverage;

/// Writes the table as a standalone HTML page
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    pub title: String,
    pub generated_at: String,
}

impl HtmlWriter {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl TableWriter for HtmlWriter {
    fn file_name(&self) -> &str {
        HTML_FILE
    }

    fn render(&self, table: &ReportTable) -> String {
        build_html(&self.title, &self.generated_at, table)
    }
}

fn build_html(title: &str, generated_at: &str, table: &ReportTable) -> String {
    let total = table.len();
    let undetermined = table.undetermined_count();
    let classified = total - undetermined;

    let squad_cards: String = table.squads.iter().map(build_squad_card).collect();

    let header_cells: String = COLUMNS
        .iter()
        .map(|c| format!("<th>{}</th>", html_escape(c)))
        .collect();

    let body_rows: String = if table.is_empty() {
        format!(
            "            <tr class=\"empty\">\n              <td colspan=\"{}\">No files in coverage export</td>\n            </tr>\n",
            COLUMNS.len() + 1
        )
    } else {
        table
            .indexed_rows()
            .map(|(index, row)| {
                let cells: String = row
                    .cells()
                    .iter()
                    .map(|c| format!("<td>{}</td>", html_escape(c)))
                    .collect();
                let class = if row.squad().is_some() { "squad" } else { "undetermined" };
                format!(
                    "            <tr class=\"{}\">\n              <th>{}</th>{}\n            </tr>\n",
                    class, index, cells
                )
            })
            .collect()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0f0f1a;
            color: #eee;
        }}
        .header {{
            background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
            padding: 20px 30px;
            border-bottom: 1px solid #2d2d44;
        }}
        .header h1 {{ color: #00d4ff; font-size: 28px; margin-bottom: 5px; }}
        .header p {{ color: #888; font-size: 14px; }}
        .summary {{
            display: flex;
            gap: 20px;
            padding: 20px 30px;
            background: #1a1a2e;
            border-bottom: 1px solid #2d2d44;
            flex-wrap: wrap;
        }}
        .summary-card {{
            background: #16213e;
            padding: 15px 25px;
            border-radius: 10px;
            text-align: center;
            min-width: 140px;
            border-left: 4px solid #00d4ff;
        }}
        .summary-card.high {{ border-left-color: #26a69a; }}
        .summary-card.medium {{ border-left-color: #ffd700; }}
        .summary-card.low {{ border-left-color: #ef5350; }}
        .summary-card.none {{ border-left-color: #666; }}
        .summary-value {{ font-size: 28px; font-weight: bold; }}
        .summary-label {{ font-size: 12px; color: #888; margin-top: 5px; }}
        .content {{ padding: 30px; }}
        .dataframe {{ width: 100%; border-collapse: collapse; }}
        .dataframe th, .dataframe td {{
            padding: 10px 12px;
            text-align: left;
            border: 1px solid #2d2d44;
        }}
        .dataframe thead th {{ background: #16213e; color: #00d4ff; }}
        .dataframe tbody tr:nth-child(even) {{ background: rgba(22, 33, 62, 0.5); }}
        .dataframe tbody tr.undetermined {{ color: #aaa; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>{title}</h1>
        <p>Generated {generated_at} - {classified} of {total} file(s) assigned to a squad, {undetermined} undetermined</p>
    </div>

    <div class="summary">
{squad_cards}    </div>

    <div class="content">
        <table border="1" class="dataframe">
          <thead>
            <tr>
              <th></th>{header_cells}
            </tr>
          </thead>
          <tbody>
{body_rows}          </tbody>
        </table>
    </div>
</body>
</html>
"##,
        title = html_escape(title),
        generated_at = html_escape(generated_at),
        classified = classified,
        total = total,
        undetermined = undetermined,
        squad_cards = squad_cards,
        header_cells = header_cells,
        body_rows = body_rows,
    )
}

fn build_squad_card(squad: &SquadSummary) -> String {
    format!(
        r##"        <div class="summary-card {level}">
            <div class="summary-value">{coverage}</div>
            <div class="summary-label">{name} ({files} file(s), {missing} of {configured} filename(s) missing)</div>
        </div>
"##,
        level = coverage_level(squad.coverage),
        coverage = squad.coverage,
        name = html_escape(&squad.name),
        files = squad.files,
        missing = squad.missing,
        configured = squad.configured,
    )
}

fn coverage_level(coverage: Coverage) -> &'static str {
    match coverage.percentage() {
        None => "none",
        Some(p) if p >= 80.0 => "high",
        Some(p) if p >= 50.0 => "medium",
        Some(_) => "low",
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
