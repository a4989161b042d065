/*!
 * # akaire - markup-safe AI proofreading for Japanese copy
 *
 * A Rust library for AI-assisted Japanese copy editing that lets a large
 * language model rewrite text containing embedded HTML without corrupting
 * the markup, while still fixing typos inside tag names and attributes.
 *
 * ## Features
 *
 * - Protect embedded HTML behind placeholder tokens before the LLM call
 * - Keep tag names and attributes editable as literal words, so in-tag
 *   typos can be corrected
 * - Parse the model's correction annotations in two grammars
 * - Restore markup with in-tag corrections applied
 * - Render the original text with categorized, clickable highlight units
 * - Replacement dictionary rendered into the prompt as house-style rules
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `proofreading`: The correction pipeline:
 *   - `proofreading::protect`: Markup protection
 *   - `proofreading::annotations`: Correction annotation parsing
 *   - `proofreading::restore`: Markup restoration
 *   - `proofreading::highlight`: Highlight rendering
 *   - `proofreading::service`: Pipeline orchestration
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for LLM providers:
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod proofreading;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProofreadingError, ProviderError};
pub use proofreading::dictionary::{DictionaryEntry, ReplacementDictionary};
pub use proofreading::{
    Category, CorrectionRecord, HighlightSpan, ProofreadingOutcome, ProofreadingService,
    ProtectedDocument, TagDescriptor, highlight, locate_spans, parse_corrections, protect, restore,
};
