//! Scores a financial data document offline and prints the API response.
//!
//! Usage: `score_file <path.json>` or `score_file -` to read from stdin.

use anyhow::Context;
use credit_score_api::offline::score_json;
use std::env;
use std::io::Read;

fn main() -> anyhow::Result<()> {
    let source = env::args()
        .nth(1)
        .context("usage: score_file <path.json | ->")?;

    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(&source).with_context(|| format!("failed to read {}", source))?
    };

    let response = score_json(&raw)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
