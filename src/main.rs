use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use quickjot::cli::{CliArgs, RunMode, ScriptSource};
use quickjot::config::OverlayConfig;
use quickjot::script::{parse_script, replay};
use quickjot::session::{Session, SessionOutcome};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    quickjot::tracing::init();

    let config = match &args.config {
        Some(path) => OverlayConfig::load_from(path),
        None => OverlayConfig::load(),
    };
    let mut session = Session::system(config);

    match args.run_mode() {
        RunMode::PrintKeymap => {
            for binding in session.router().keymap().bindings() {
                let when = binding
                    .when
                    .as_ref()
                    .map(|conds| format!("  (when {:?})", conds))
                    .unwrap_or_default();
                println!(
                    "{:<28} {}{}",
                    binding.display_string(),
                    binding.command.display_name(),
                    when
                );
            }
        }
        RunMode::WriteConfig(path) => {
            let saved = match &path {
                Some(path) => session.config().save_to(path),
                None => session.config().save(),
            };
            saved.map_err(anyhow::Error::msg)?;
        }
        RunMode::Replay { source, json } => {
            let yaml = read_script(&source)?;
            let steps = parse_script(&yaml)?;
            tracing::info!("Replaying {} steps", steps.len());
            let transcript = replay(&mut session, &steps)?;

            if json {
                for outcome in &transcript.outcomes {
                    println!("{}", serde_json::to_string(outcome)?);
                }
                println!("{}", serde_json::to_string(&transcript)?);
            } else {
                for outcome in &transcript.outcomes {
                    match outcome {
                        SessionOutcome::Submitted { buffer, text } => {
                            println!("submitted {}: {:?}", buffer, text)
                        }
                        SessionOutcome::Cancelled => println!("cancelled"),
                        SessionOutcome::Reinject { event } => {
                            println!("reinject {}", event.keystroke)
                        }
                        SessionOutcome::Consumed | SessionOutcome::PassThrough => {}
                    }
                }
                for (i, buffer) in transcript.buffers.iter().enumerate() {
                    let marker = if i == transcript.current { "*" } else { " " };
                    println!(
                        "{} {} cursor={} {:?}",
                        marker, buffer.id, buffer.cursor, buffer.content
                    );
                }
            }
        }
    }

    Ok(())
}

fn read_script(source: &ScriptSource) -> Result<String> {
    match source {
        ScriptSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        ScriptSource::Stdin => {
            let mut yaml = String::new();
            std::io::stdin()
                .read_to_string(&mut yaml)
                .context("Failed to read script from stdin")?;
            Ok(yaml)
        }
    }
}
