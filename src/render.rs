// Output rendering
//
// Turns a definition set into the text a build system reads from our stdout.

use crate::sink::DefinitionSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How definitions are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `-DNAME=value` compiler flags (PlatformIO `build_flags = !...`)
    #[default]
    Flags,
    /// `cargo:rustc-env=NAME=value` lines for a build script
    Cargo,
    /// `NAME="value"` dotenv lines
    Env,
    /// JSON array of `{name, value}` objects
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Flags => "flags",
            OutputFormat::Cargo => "cargo",
            OutputFormat::Env => "env",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render `definitions` in `format`. The result has no trailing newline.
pub fn render(definitions: &DefinitionSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Flags => Ok(render_flags(definitions)),
        OutputFormat::Cargo => render_cargo(definitions),
        OutputFormat::Env => Ok(render_env(definitions)),
        OutputFormat::Json => serde_json::to_string_pretty(definitions.as_slice())
            .context("Failed to serialize definitions as JSON"),
    }
}

fn render_flags(definitions: &DefinitionSet) -> String {
    definitions
        .iter()
        .map(|d| shell_quote(&format!("-D{}={}", d.name, d.value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_cargo(definitions: &DefinitionSet) -> Result<String> {
    let mut lines = Vec::with_capacity(definitions.len());
    for d in definitions {
        if d.value.contains(['\n', '\r']) {
            anyhow::bail!(
                "Value of '{}' contains a line break and cannot be passed as a cargo directive",
                d.name
            );
        }
        // Cargo trims whitespace around directive values
        if d.value.starts_with(char::is_whitespace) || d.value.ends_with(char::is_whitespace) {
            anyhow::bail!(
                "Value of '{}' starts or ends with whitespace, which cargo would strip",
                d.name
            );
        }
        lines.push(format!("cargo:rustc-env={}={}", d.name, d.value));
    }
    Ok(lines.join("\n"))
}

fn render_env(definitions: &DefinitionSet) -> String {
    definitions
        .iter()
        .map(|d| format!("{}=\"{}\"", d.name, escape_double_quoted(&d.value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a word for a POSIX shell / shlex reader.
///
/// Words made only of safe characters are returned unchanged.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));

    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
