use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::eval::EvalError;
use crate::model::Expr;

const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Decode one expression from JSON text.
///
/// serde_json's own recursion limit is lifted so that `max_depth` alone
/// bounds the tree; documents nesting deeper fail with `EvalError::TooDeep`
/// before any recursive decoding starts.
pub fn parse_expr_json(text: &str, max_depth: usize) -> Result<Expr> {
    // Num is one object level, each Sum adds two (`{"sum": {"left": ...}}`)
    let max_levels = max_depth.saturating_mul(2).saturating_sub(1);
    if json_nesting(text) > max_levels {
        return Err(EvalError::TooDeep { max_depth }.into());
    }

    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let expr = Expr::deserialize(&mut de).map_err(|e| decode_error(&e.to_string()))?;
    de.end().map_err(|e| decode_error(&e.to_string()))?;
    Ok(expr)
}

/// Decode one expression from TOML text
pub fn parse_expr_toml(text: &str) -> Result<Expr> {
    toml::from_str(text).map_err(|e| decode_error(e.message()))
}

/// Load an expression from a `.json` or `.toml` file
pub fn load_expr_file(path: &Path, max_depth: usize) -> Result<Expr> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    match extension(path) {
        Some("json") => parse_expr_json(&content, max_depth),
        Some("toml") => parse_expr_toml(&content),
        _ => Err(anyhow!("Unsupported file type (expected .json or .toml)")),
    }
    .with_context(|| format!("Failed to load expression from {}", path.display()))
}

/// Expand each path: files are kept as given, directories are walked for
/// expression documents in sorted order.
pub fn collect_expr_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| extension(p).map_or(false, |ext| EXTENSIONS.contains(&ext)))
                .collect();
            found.sort();
            files.extend(found);
        } else if path.exists() {
            files.push(path.clone());
        } else {
            bail!("No such file or directory: {}", path.display());
        }
    }

    Ok(files)
}

/// Deepest object/array nesting in a JSON text, ignoring brackets inside strings
fn json_nesting(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in text.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Unknown variant tags are the open-world counterpart of an unrecognized
/// expression node, so report them as such.
fn decode_error(message: &str) -> anyhow::Error {
    if message.contains("unknown variant") {
        anyhow!("Unknown expression: {}", message)
    } else {
        anyhow!("Malformed expression: {}", message)
    }
}
