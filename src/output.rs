use serde::Serialize;

use crate::config::OutputFormat;
use crate::eval::TraceEvent;
use crate::model::{Color, Expr, Warmth};

#[derive(Debug, Serialize)]
pub struct WarmthReport {
    pub color: Color,
    pub warmth: Warmth,
}

#[derive(Debug, Serialize)]
pub struct MixReport {
    pub left: Color,
    pub right: Color,
    pub result: Color,
}

#[derive(Debug, Serialize)]
pub struct EvalReport {
    /// Where the expression came from: a file path or `inline`
    pub source: String,
    pub expr: String,
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEvent>>,
    /// Outline lines from `expr_tree`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<String>>,
}

/// Indent every line of text by the given number of spaces
pub fn indent(text: &str, spaces: usize) -> String {
    let prefix = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one outline entry with two spaces of indentation per level
pub fn tree_entry(label: &str, depth: usize) -> String {
    format!("{}- {}", "  ".repeat(depth), label)
}

/// Render an expression as an indented outline, one line per node
pub fn expr_tree(expr: &Expr) -> Vec<String> {
    let mut out = Vec::new();
    write_expr_tree(&mut out, expr, 0);
    out
}

fn write_expr_tree(out: &mut Vec<String>, expr: &Expr, depth: usize) {
    match expr {
        Expr::Num(n) => out.push(tree_entry(&format!("Num {}", n), depth)),
        Expr::Sum { left, right } => {
            out.push(tree_entry("Sum", depth));
            write_expr_tree(out, left, depth + 1);
            write_expr_tree(out, right, depth + 1);
        }
    }
}

pub fn render_warmth(report: &WarmthReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => report.warmth.to_string(),
        OutputFormat::Json => to_json(report),
    }
}

pub fn render_mix(report: &MixReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => report.result.to_string(),
        OutputFormat::Json => to_json(report),
    }
}

pub fn render_table(rows: &[(Color, Color, Color)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => rows
            .iter()
            .map(|(a, b, result)| format!("{} + {} = {}", a, b, result))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let reports: Vec<MixReport> = rows
                .iter()
                .map(|(left, right, result)| MixReport {
                    left: *left,
                    right: *right,
                    result: *result,
                })
                .collect();
            to_json(&reports)
        }
    }
}

/// Text form: outline and trace lines (if any) followed by the value
pub fn render_eval(report: &EvalReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut lines: Vec<String> = report.tree.iter().flatten().cloned().collect();
            lines.extend(
                report
                    .trace
                    .iter()
                    .flatten()
                    .map(|event| event.to_string()),
            );
            lines.push(report.value.to_string());
            lines.join("\n")
        }
        OutputFormat::Json => to_json(report),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
