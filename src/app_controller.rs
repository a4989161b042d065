/*!
 * Main application controller.
 *
 * The controller wires the configuration to the proofreading service:
 * it loads the replacement dictionary, reads the input text, runs the
 * pipeline with a progress spinner around the provider call, and writes
 * the corrected text and the annotated HTML next to the input file.
 */

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::proofreading::dictionary::ReplacementDictionary;
use crate::proofreading::service::{ProofreadingOutcome, ProofreadingService};

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,

    /// The proofreading service
    service: ProofreadingService,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let dictionary = match &config.proofreading.dictionary_path {
            Some(path) => match ReplacementDictionary::load(path) {
                Ok(dictionary) => {
                    info!("Loaded {} dictionary entries from {}", dictionary.len(), path);
                    dictionary
                }
                Err(e) => {
                    warn!("Could not load dictionary from {}: {}. Continuing without it.", path, e);
                    ReplacementDictionary::new()
                }
            },
            None => ReplacementDictionary::new(),
        };

        let service =
            ProofreadingService::new(&config.proofreading)?.with_dictionary(dictionary);

        Ok(Self { config, service })
    }

    /// Run the proofreading pipeline for a single input file
    ///
    /// Writes `<input>.corrected.<ext>` and `<input>.annotated.html` next
    /// to the input and returns the outcome.
    pub async fn run(&self, input_path: &Path, force_overwrite: bool) -> Result<ProofreadingOutcome> {
        if !input_path.exists() {
            return Err(anyhow!("Input file does not exist: {}", input_path.display()));
        }

        let raw_text = FileManager::read_to_string(input_path)?;
        let outcome = self.proofread_with_progress(&raw_text).await?;

        let corrected_path = FileManager::derived_path(input_path, "corrected", None);
        let annotated_path = FileManager::derived_path(input_path, "annotated", Some("html"));
        let corrections_path = FileManager::derived_path(input_path, "corrections", Some("json"));

        for path in [&corrected_path, &annotated_path, &corrections_path] {
            if path.exists() && !force_overwrite {
                return Err(anyhow!(
                    "Output file already exists: {}. Use -f to force overwrite.",
                    path.display()
                ));
            }
        }

        FileManager::write_string(&corrected_path, &outcome.corrected_text)?;
        FileManager::write_string(&annotated_path, &outcome.annotated_html)?;
        let corrections_json = serde_json::to_string_pretty(&outcome.corrections)
            .context("Failed to serialize corrections to JSON")?;
        FileManager::write_string(&corrections_path, &corrections_json)?;

        info!("Corrected text: {}", corrected_path.display());
        info!("Annotated HTML: {}", annotated_path.display());
        info!("Corrections JSON: {}", corrections_path.display());
        self.log_summary(&outcome);

        Ok(outcome)
    }

    /// Run the pipeline over text read from standard input, printing the
    /// corrected text to standard output
    pub async fn run_stdin(&self) -> Result<ProofreadingOutcome> {
        let mut raw_text = String::new();
        std::io::stdin()
            .read_to_string(&mut raw_text)
            .context("Failed to read from standard input")?;

        let outcome = self.proofread_with_progress(&raw_text).await?;

        println!("{}", outcome.corrected_text);
        self.log_summary(&outcome);

        Ok(outcome)
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<()> {
        self.service
            .test_connection()
            .await
            .map_err(|e| anyhow!("Failed to connect to {}: {}", self.config.proofreading.provider, e))
    }

    async fn proofread_with_progress(&self, raw_text: &str) -> Result<ProofreadingOutcome> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Proofreading with {}...",
            self.config.proofreading.provider.display_name()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.service.proofread(raw_text).await;
        spinner.finish_and_clear();

        result.map_err(|e| anyhow!("Proofreading failed: {}", e))
    }

    fn log_summary(&self, outcome: &ProofreadingOutcome) {
        info!(
            "Finished in {:.2}s with {} correction(s)",
            outcome.processing_time.as_secs_f64(),
            outcome.corrections.len()
        );
        for correction in &outcome.corrections {
            info!(
                "{} [{}] {} -> {}: {}",
                correction.category.icon(),
                correction.category.label(),
                correction.original,
                correction.corrected,
                correction.reason
            );
        }
        info!("{}", outcome.stats.summary());
    }
}
