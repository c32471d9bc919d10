//! AI integration module
//!
//! This module provides everything between a staged diff and a commit message:
//! - Prompt construction (short-form and structured)
//! - The Gemini generation client
//! - Normalization of noisy model output into messages and drafts

pub mod diff;
pub mod draft;
pub mod gemini;
pub mod normalize;
pub mod prompts;

pub use draft::CommitDraft;
pub use gemini::{GeminiClient, GenerationRequest, TextGenerator};
pub use normalize::{normalize_detailed, normalize_simple};
