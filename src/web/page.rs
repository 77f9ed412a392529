//! Dashboard page markup.
//!
//! The page is a single HTML document with three tabs. Static figures are
//! embedded as JSON and drawn with plotly.js on load; the subject chart is
//! fetched from `/api/subjects/{subject}` whenever the dropdown changes.

use crate::data::schema::{DEFAULT_SUBJECT, SUBJECTS};
use crate::stats::GroupComparison;

use super::state::Overview;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize for an inline `<script>` block.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn subject_options() -> String {
    SUBJECTS
        .iter()
        .map(|subject| {
            let selected = if *subject == DEFAULT_SUBJECT { " selected" } else { "" };
            let value = escape_html(subject);
            format!(r#"<option value="{value}"{selected}>{value}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn stat_cell(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn comparison_table(comparison: &GroupComparison) -> String {
    let rows: String = comparison
        .groups
        .iter()
        .map(|gs| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&gs.group_name),
                gs.count,
                stat_cell(gs.mean),
                stat_cell(gs.median),
                stat_cell(gs.std),
                stat_cell(gs.min),
                stat_cell(gs.max),
            )
        })
        .collect();

    let p_value = match comparison.p_value {
        Some(p) if comparison.is_significant => format!("Welch t-test p = {p:.4} (significant)"),
        Some(p) => format!("Welch t-test p = {p:.4}"),
        None => "Welch t-test needs two groups with at least two students each".to_string(),
    };

    format!(
        r#"<table class="stats">
<thead><tr><th>Sex</th><th>N</th><th>Mean</th><th>Median</th><th>Std</th><th>Min</th><th>Max</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<p class="p-value">{p_value}</p>"#
    )
}

/// Render the full dashboard document.
pub fn render(overview: &Overview) -> Result<String, serde_json::Error> {
    let grade = script_json(&overview.grade_distribution)?;
    let points = script_json(&overview.points_distribution)?;
    let gender = script_json(&overview.gender_points)?;
    let options = subject_options();
    let table = comparison_table(&overview.gender_comparison);

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>KCSE 2024 Results Analysis</title>
<script src="{PLOTLY_JS}"></script>
<style>
body {{ font-family: sans-serif; margin: 24px; }}
.tabs {{ display: flex; border-bottom: 1px solid #d6d6d6; }}
.tab {{ padding: 10px 20px; cursor: pointer; border: 1px solid transparent; background: #f9f9f9; }}
.tab.active {{ background: #fff; border-color: #d6d6d6 #d6d6d6 #fff; border-top: 2px solid #3498db; }}
.panel {{ display: none; padding: 12px 0; }}
.panel.active {{ display: block; }}
.stats {{ border-collapse: collapse; }}
.stats th, .stats td {{ border: 1px solid #ccc; padding: 4px 10px; text-align: right; }}
.stats td:first-child {{ text-align: left; }}
</style>
</head>
<body>
<h1>KCSE 2024 Results Analysis</h1>
<div class="tabs">
<div class="tab active" data-panel="overall">Overall Performance</div>
<div class="tab" data-panel="subject">Subject Performance</div>
<div class="tab" data-panel="gender">Gender Comparison</div>
</div>

<div class="panel active" id="overall">
<h2>Grade Distribution</h2>
<div id="grade-graph"></div>
<h2>Points Distribution</h2>
<div id="points-graph"></div>
</div>

<div class="panel" id="subject">
<label for="subject-dropdown">Select a Subject:</label>
<select id="subject-dropdown">
{options}
</select>
<div id="subject-graph"></div>
</div>

<div class="panel" id="gender">
<h2>Performance Comparison by Gender</h2>
<div id="gender-graph"></div>
{table}
</div>

<script>
const figures = {{
  "grade-graph": {grade},
  "points-graph": {points},
  "gender-graph": {gender}
}};
for (const [id, fig] of Object.entries(figures)) {{
  Plotly.newPlot(id, fig.data, fig.layout, {{responsive: true}});
}}

document.querySelectorAll(".tab").forEach((tab) => {{
  tab.addEventListener("click", () => {{
    document.querySelectorAll(".tab, .panel").forEach((el) => el.classList.remove("active"));
    tab.classList.add("active");
    const panel = document.getElementById(tab.dataset.panel);
    panel.classList.add("active");
    panel.querySelectorAll(".js-plotly-plot").forEach((plot) => Plotly.Plots.resize(plot));
  }});
}});

const dropdown = document.getElementById("subject-dropdown");
async function updateSubjectGraph() {{
  const res = await fetch("/api/subjects/" + encodeURIComponent(dropdown.value));
  if (!res.ok) return;
  const view = await res.json();
  Plotly.react("subject-graph", view.figure.data, view.figure.layout, {{responsive: true}});
}}
dropdown.addEventListener("change", updateSubjectGraph);
updateSubjectGraph();
</script>
</body>
</html>
"##
    ))
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
