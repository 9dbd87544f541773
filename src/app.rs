use std::sync::Arc;

use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::SettingsFile;
use crate::console;
use crate::controller::{Controller, PickResult};
use crate::error::AppError;
use crate::output::{documents_json, documents_text, settings_json, settings_text};
use crate::scheduler::TickOutcome;
use crate::utils::{Timezone, format_moment};
use crate::vault::FsVault;

pub(crate) async fn run(cli: Cli) -> Result<(), AppError> {
    let file = SettingsFile::locate(cli.settings.clone())?;
    let settings = file.load();

    // Canonical root so listed paths strip cleanly to vault-relative form
    let root = std::fs::canonicalize(&cli.vault).unwrap_or_else(|_| cli.vault.clone());
    let vault = FsVault::new(root);
    debug!(vault = %vault.root().display(), settings = %file.path().display(), "starting");

    let mut controller = Controller::new(settings, file, Arc::new(vault));

    match cli.selected_command() {
        Commands::Run => run_updater(&mut controller).await,
        Commands::Tick => handle_tick(&controller),
        Commands::Show { json } => {
            let settings = controller.configuration();
            if json {
                println!("{}", settings_json(&settings, controller.settings_file()));
            } else {
                println!("{}", settings_text(&settings, controller.settings_file(), None));
            }
            Ok(())
        }
        Commands::SetNote { path } => {
            controller.set_note_path(&path)?;
            let note_path = controller.configuration().note_path;
            if note_path.is_empty() {
                println!("Note cleared");
            } else {
                println!("Note set to \"{note_path}\"");
            }
            Ok(())
        }
        Commands::Pick { query } => handle_pick(&mut controller, &query),
        Commands::List { query, json } => {
            let docs = controller.documents(query.as_deref().unwrap_or(""));
            if json {
                println!("{}", documents_json(&docs));
            } else {
                println!(
                    "{}",
                    documents_text(&docs, &controller.configuration().note_path)
                );
            }
            Ok(())
        }
        Commands::SetFormat { pattern } => {
            controller.set_format(&pattern)?;
            println!("Format set to \"{}\"", controller.configuration().format);
            Ok(())
        }
        Commands::SetInterval { seconds } => {
            controller.set_interval(&seconds)?;
            println!(
                "Interval set to {}s",
                controller.configuration().update_interval_seconds
            );
            Ok(())
        }
        Commands::SetTimezone { timezone } => {
            controller.set_timezone(&timezone)?;
            let timezone = controller.configuration().timezone;
            println!("Timezone set to {}", timezone.as_deref().unwrap_or("local"));
            Ok(())
        }
        Commands::Preview { pattern } => {
            let settings = controller.configuration();
            let timezone = Timezone::parse(settings.timezone.as_deref())?;
            let pattern = pattern.unwrap_or(settings.format);
            println!("{}", format_moment(&timezone.now(), &pattern));
            Ok(())
        }
    }
}

async fn run_updater(controller: &mut Controller) -> Result<(), AppError> {
    let settings = controller.configuration();
    if !settings.has_note() {
        warn!("no note configured yet, use `note <path>` or `pick <query>`");
    }

    controller.start();
    println!(
        "Updating every {}s. Type \"help\" for commands.",
        settings.update_interval_seconds
    );
    console::run(controller).await;
    controller.shutdown().await;
    Ok(())
}

fn handle_tick(controller: &Controller) -> Result<(), AppError> {
    let outcome = controller.tick_now();
    if let TickOutcome::Failed { .. } = outcome {
        return Err(AppError::UpdateFailed {
            message: outcome.to_string(),
        });
    }
    println!("{outcome}");
    Ok(())
}

fn handle_pick(controller: &mut Controller, query: &str) -> Result<(), AppError> {
    match controller.pick(query)? {
        PickResult::Selected(path) => println!("Note set to \"{path}\""),
        PickResult::Ambiguous(paths) => {
            println!("Several notes match \"{query}\", be more specific:");
            for path in paths {
                println!("  {path}");
            }
        }
    }
    Ok(())
}
