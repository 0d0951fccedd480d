//! Preference commands: settings, onboarding.

use clap::{Subcommand, ValueEnum};

use crate::inference::ModelInfo;
use crate::store::Store;

use super::format::{APP_DISCLAIMER, count_analyses, model_info};

#[derive(Debug, Subcommand)]
pub(super) enum SettingsCommand {
    /// Turn dark mode on or off.
    DarkMode {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum Toggle {
    On,
    Off,
}

pub(super) fn run(
    store: &mut Store,
    model: &ModelInfo,
    command: Option<SettingsCommand>,
) -> Result<(), String> {
    match command {
        None => {
            println!("{}", render(store, model));
            Ok(())
        }
        Some(SettingsCommand::DarkMode { state }) => {
            let on = state == Toggle::On;
            if store.state().is_dark_mode != on {
                store.set_dark_mode(on);
            }
            eprintln!("Dark mode {}", enabled(on).to_lowercase());
            Ok(())
        }
    }
}

/// Shows the introduction and records that it has been seen.
pub(super) fn cmd_onboarding(store: &mut Store) -> Result<(), String> {
    println!("🧠 Brain Tumor Detector");
    println!("Fast, accurate MRI analysis powered by AI");
    println!();
    println!("  1. Upload MRI Image   Take a photo or select from gallery");
    println!("  2. AI Analysis        Our model analyzes the scan");
    println!("  3. Get Results        Receive a detailed report with confidence");
    println!();
    println!("{APP_DISCLAIMER}");

    if !store.state().has_seen_onboarding {
        store.set_onboarding_complete();
    }
    Ok(())
}

fn render(store: &Store, model: &ModelInfo) -> String {
    let state = store.state();
    format!(
        "Settings\n  Dark Mode      {}\n  Onboarding     {}\n  History        {}\n\n{}\n\n{APP_DISCLAIMER}",
        enabled(state.is_dark_mode),
        if state.has_seen_onboarding { "Completed" } else { "Not yet seen" },
        count_analyses(state.history.len()),
        model_info(model),
    )
}

fn enabled(on: bool) -> &'static str {
    if on { "Enabled" } else { "Disabled" }
}
