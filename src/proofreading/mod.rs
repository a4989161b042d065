/*!
 * Markup-safe AI proofreading pipeline.
 *
 * This module contains the core protect → correct → parse → restore →
 * highlight cycle. It is split into several submodules:
 *
 * - `protect`: Markup protection behind placeholder tokens
 * - `annotations`: Correction record parsing from LLM responses
 * - `restore`: Markup restoration with in-tag corrections applied
 * - `highlight`: Highlight rendering over the original text
 * - `escape`: HTML escaping for highlight output
 * - `dictionary`: Replacement dictionary for prompt context
 * - `prompts`: Prompt templates and builders for proofreading
 * - `service`: Service chaining the stages around the provider call
 */

// Re-export main types for easier usage
pub use self::annotations::{Category, CorrectionRecord, parse_corrections, split_response};
pub use self::highlight::{HighlightSpan, highlight, locate_spans};
pub use self::protect::{Placeholder, PlaceholderKind, ProtectedDocument, TagDescriptor, protect};
pub use self::restore::restore;
pub use self::service::{ProofreadingOutcome, ProofreadingService, TokenUsageStats};

// Submodules
pub mod annotations;
pub mod dictionary;
pub mod escape;
pub mod highlight;
pub mod prompts;
pub mod protect;
pub mod restore;
pub mod service;
