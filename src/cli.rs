//! CLI interface for brainscan.
//!
//! Stands in for the app's screens: analyze images, browse and prune the
//! history, change preferences. Each subcommand is non-interactive:
//! arguments in, text out.
//!
//! Commands that touch the history open the store, run, and print a one-line
//! summary of the latest state they observed through a store subscription.

mod analyze;
mod format;
mod history;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{Backend, Config};
use crate::inference::{Classifier, MockClassifier, Views};
use crate::storage;
use crate::store::Store;

use history::HistoryCommand;
use settings::SettingsCommand;

/// brainscan: mock MRI tumor screening with a local history.
#[derive(Debug, Parser)]
#[command(name = "brainscan", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Directory holding the saved state.
    /// Overrides `BRAINSCAN_DATA_DIR` and `data-dir` in the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage backend. Overrides `backend` in the config file.
    #[arg(long, global = true, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow:
  1. brainscan onboarding
  2. brainscan analyze ~/scans/axial-042.png
     → prints the result card and its ID (e.g. analysis_1770000000000_3f9a1c2b7)
  3. brainscan history list
  4. brainscan history show analysis_1770000000000_3f
  5. brainscan history delete analysis_1770000000000_3f

IDs may be abbreviated to any unambiguous prefix.
Results come from a simulated model and are not a diagnosis.";

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze MRI images and add the results to the history.
    Analyze {
        /// Image paths or URIs (jpg, jpeg, png, gif, webp).
        #[arg(required = true)]
        images: Vec<String>,

        /// Display name for the image. Only valid with a single image;
        /// defaults to the file name.
        #[arg(long)]
        name: Option<String>,
    },

    /// Browse and prune the analysis history.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show preferences, or change one.
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommand>,
    },

    /// Show the introduction and mark it as seen.
    Onboarding,

    /// Show model information.
    Model,

    /// Classify up to three views of one scan and report the majority verdict.
    ///
    /// The verdict is printed only; nothing is added to the history.
    Consensus {
        /// Axial slice image.
        #[arg(long)]
        axial: Option<String>,

        /// Sagittal slice image.
        #[arg(long)]
        sagittal: Option<String>,

        /// Coronal slice image.
        #[arg(long)]
        coronal: Option<String>,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let Cli {
        data_dir,
        backend,
        command,
    } = Cli::parse();

    let classifier = config
        .model_seed
        .map_or_else(MockClassifier::new, MockClassifier::with_seed);
    let data_dir = data_dir.as_deref();

    match command {
        Command::Model => {
            println!("{}", format::model_info(classifier.model()));
            Ok(())
        }
        Command::Consensus {
            axial,
            sagittal,
            coronal,
        } => analyze::cmd_consensus(
            &classifier,
            &Views {
                axial,
                sagittal,
                coronal,
            },
        ),
        Command::Analyze { images, name } => with_store(config, data_dir, backend, |store| {
            analyze::cmd_analyze(store, &classifier, &images, name.as_deref())
        }),
        Command::History { command } => with_store(config, data_dir, backend, |store| {
            history::run(store, command)
        }),
        Command::Settings { command } => with_store(config, data_dir, backend, |store| {
            settings::run(store, classifier.model(), command)
        }),
        Command::Onboarding => with_store(config, data_dir, backend, settings::cmd_onboarding),
    }
}

/// Opens the store, runs `f`, and waits for every save before returning.
fn with_store(
    config: &Config,
    data_dir: Option<&Path>,
    backend: Option<Backend>,
    f: impl FnOnce(&mut Store) -> Result<(), String>,
) -> Result<(), String> {
    let root = config
        .data_dir(data_dir)
        .ok_or("could not determine home directory; pass --data-dir")?;
    let backend = backend.unwrap_or(config.backend);
    let persist = storage::open(backend, &root)
        .map_err(|e| format!("failed to open storage at {}: {e}", root.display()))?;

    let mut store = Store::open(persist);
    let changes = store.subscribe();

    let result = f(&mut store);

    if let Some(latest) = changes.try_iter().last() {
        eprintln!("{}", format::history_footer(&latest));
    }

    let failed = store.close();
    if failed > 0 {
        eprintln!("Warning: {failed} save(s) failed; recent changes may not persist");
    }

    result
}
