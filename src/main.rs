use anyhow::{anyhow, Context, Result};
use clap::Parser;

use plaintext_editor::cli::{CliArgs, OutputFormat, RunConfig, ScriptSource};
use plaintext_editor::keymap::parse_script;
use plaintext_editor::model::{DocumentSnapshot, EditorKey};
use plaintext_editor::registry::EditorRegistry;
use plaintext_editor::EditorConfig;

fn main() -> Result<()> {
    plaintext_editor::tracing::init();

    let config = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    let snapshot = run(&config)?;

    match config.format {
        OutputFormat::Text => println!("{}", snapshot.render_with_caret()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize document")?
        ),
    }

    Ok(())
}

/// Replay the configured key script against a fresh editor instance
fn run(config: &RunConfig) -> Result<DocumentSnapshot> {
    let script = match &config.source {
        ScriptSource::Empty => String::new(),
        ScriptSource::Inline(keys) => keys.clone(),
        ScriptSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read key script {}", path.display()))?,
    };
    let actions = parse_script(&script).context("Invalid key script")?;

    let mut options = EditorConfig::load().options();
    if let Some(font_size_px) = config.font_size_px {
        options.font_size_px = font_size_px;
    }

    let registry = EditorRegistry::new(options);
    let key = EditorKey::new();
    registry.construct(key)?;
    registry.wait_until_ready(key)?;
    tracing::info!(%key, actions = actions.len(), "replaying key script");

    for action in actions {
        registry.dispatch(action.into_msg(key))?;
    }

    let document = registry.snapshot(key)?;
    Ok(DocumentSnapshot::from_document(&document))
}
