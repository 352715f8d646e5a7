//! Command-line argument parsing for the key-script runner
//!
//! Supports:
//! - Inline key scripts (`--keys`) and script files (`--script`)
//! - Plain or JSON output
//! - Overriding the configured font size

use clap::Parser;
use std::path::PathBuf;

/// Replay keyboard and click input against a plain-text editor state machine
#[derive(Parser, Debug)]
#[command(
    name = "plaintext-editor",
    version,
    about = "Replay key scripts against a plain-text editor state machine"
)]
pub struct CliArgs {
    /// Inline key script, e.g. '"hello" enter "world" ctrl+left'
    #[arg(short = 'k', long, value_name = "SCRIPT", conflicts_with = "script")]
    pub keys: Option<String>,

    /// Read the key script from a file
    #[arg(short = 's', long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the final document as JSON
    #[arg(long)]
    pub json: bool,

    /// Font size in pixels (overrides the config file)
    #[arg(long, value_name = "PX")]
    pub font_size: Option<u32>,
}

/// Where the key script comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// No input: print the empty document
    Empty,
    Inline(String),
    File(PathBuf),
}

/// How the final document is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rows as text with `|` at the caret
    Text,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: ScriptSource,
    pub format: OutputFormat,
    pub font_size_px: Option<u32>,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let source = match (self.keys, self.script) {
            (Some(_), Some(_)) => {
                return Err("--keys and --script cannot be combined".to_string());
            }
            (Some(keys), None) => ScriptSource::Inline(keys),
            (None, Some(path)) => ScriptSource::File(path),
            (None, None) => ScriptSource::Empty,
        };

        if self.font_size == Some(0) {
            return Err("--font-size must be positive".to_string());
        }

        Ok(RunConfig {
            source,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            font_size_px: self.font_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_keys() {
        let args = CliArgs::try_parse_from(["plaintext-editor", "--keys", "\"ab\" enter"]).unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.source, ScriptSource::Inline("\"ab\" enter".to_string()));
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_script_file_json() {
        let args = CliArgs::try_parse_from([
            "plaintext-editor",
            "--script",
            "input.keys",
            "--json",
            "--font-size",
            "18",
        ])
        .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.source, ScriptSource::File(PathBuf::from("input.keys")));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.font_size_px, Some(18));
    }

    #[test]
    fn test_keys_and_script_conflict() {
        assert!(
            CliArgs::try_parse_from(["plaintext-editor", "-k", "a", "-s", "f.keys"]).is_err()
        );
    }

    #[test]
    fn test_zero_font_size_rejected() {
        let args = CliArgs::try_parse_from(["plaintext-editor", "--font-size", "0"]).unwrap();
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_no_args_is_empty() {
        let config = CliArgs::try_parse_from(["plaintext-editor"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.source, ScriptSource::Empty);
    }
}
