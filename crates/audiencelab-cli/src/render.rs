//! Terminal rendering for research answers, citations and chart rows.

use std::fmt::Write as _;
use std::sync::LazyLock;

use audiencelab_core::{ChartDataItem, ComparisonChartDataItem, Source};
use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(p|div|h[1-6]|ul|ol|li)\s*>").expect("valid regex")
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Convert the simple HTML the model is asked to produce into plain text.
///
/// Block ends become line breaks, list items get a `- ` bullet, every other
/// tag is dropped and the common entities are decoded.
pub(crate) fn html_to_text(html: &str) -> String {
    let text = LINE_BREAK.replace_all(html, "\n");
    let text = BLOCK_END.replace_all(&text, "\n");
    let text = LIST_ITEM.replace_all(&text, "- ");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    BLANK_RUN
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Numbered citation list, or an empty string when there are none.
pub(crate) fn format_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut out = String::from("Sources:\n");
    for (i, source) in sources.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} <{}>", i + 1, source.title, source.uri);
    }
    out
}

pub(crate) fn format_chart(items: &[ChartDataItem]) -> String {
    let rows: Vec<[&str; 2]> = items
        .iter()
        .map(|item| [item.label.as_str(), item.value.as_str()])
        .collect();
    format_table(&["LABEL", "VALUE"], &rows)
}

pub(crate) fn format_comparison_chart(
    items: &[ComparisonChartDataItem],
    name_a: &str,
    name_b: &str,
) -> String {
    let rows: Vec<[&str; 3]> = items
        .iter()
        .map(|item| {
            [
                item.label.as_str(),
                item.audience_a_value.as_str(),
                item.audience_b_value.as_str(),
            ]
        })
        .collect();
    format_table(&["LABEL", name_a, name_b], &rows)
}

/// Left-aligned columns sized to the widest cell, two spaces apart.
fn format_table<const N: usize>(header: &[&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = header.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(header).chain(rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
