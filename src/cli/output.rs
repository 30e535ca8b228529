//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OnomaArgs, OutputFormat};
use crate::corpus::scan::ScanReport;
use crate::error::Result;

/// One step of an expansion trace, as printed.
#[derive(Debug, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: usize,
    pub stage: String,
    pub tokens: usize,
    pub distinct_texts: usize,
}

/// Result structure for name expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub input: String,
    pub mode: String,
    pub field: String,
    pub table_version: u64,
    pub tokens: Vec<Token>,
    pub query: String,
    pub trace: Option<Vec<TraceStep>>,
}

/// Result structure for a corpus scan.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub input: String,
    pub output: Option<String>,
    pub report: ScanReport,
    pub groups: Option<Vec<Vec<String>>>,
}

/// Result structure for matching.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub input: String,
    pub query: String,
    pub total_values: usize,
    pub matched: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &OnomaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &OnomaArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    if std::any::type_name::<T>().contains("ExpansionResult") {
        output_expansion_human(&value, args)
    } else {
        output_generic_human(&value, args)
    }
}

/// Output an expansion with one token per line.
fn output_expansion_human(value: &serde_json::Value, args: &OnomaArgs) -> Result<()> {
    for key in ["input", "mode", "field", "table_version"] {
        if let Some(val) = value.get(key) {
            println!("{key}: {}", format_value(val));
        }
    }

    if let Some(tokens) = value.get("tokens").and_then(|t| t.as_array()) {
        println!("tokens ({}):", tokens.len());
        for token in tokens {
            let text = token.get("text").map(format_value).unwrap_or_default();
            let kind = token.get("kind").map(format_value).unwrap_or_default();
            if args.verbosity() > 1 {
                let stage = token.get("stage").map(format_value).unwrap_or_default();
                println!("  {text:<40} {kind:<15} {stage}");
            } else {
                println!("  {text:<40} {kind}");
            }
        }
    }

    if let Some(steps) = value.get("trace").and_then(|t| t.as_array()) {
        println!("trace:");
        for step in steps {
            println!(
                "  {:>2} {:<24} {} tokens, {} distinct",
                format_value(&step["step"]),
                format_value(&step["stage"]),
                format_value(&step["tokens"]),
                format_value(&step["distinct_texts"]),
            );
        }
    }

    if let Some(query) = value.get("query") {
        println!("query: {}", format_value(query));
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &OnomaArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &OnomaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let fields = obj
                .iter()
                .map(|(k, v)| format!("{k}={}", format_value(v)))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{{{fields}}}")
        }
        serde_json::Value::Null => "null".to_string(),
    }
}
