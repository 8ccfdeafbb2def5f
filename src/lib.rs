//! Tax Interview Orchestrator
//!
//! A conversational tax assistant ("ChatITR") that:
//! - Interviews the user about income, investments and regime choice
//! - Moderates every user reply before accepting it
//! - Extracts a structured Tax Profile from the conversation
//! - Computes payable tax under Indian rules via an LLM, with the
//!   latest rules table embedded as context
//!
//! STAGE PIPELINE:
//! GREETING → CLARIFY → EXTRACT → COMPUTE & CONFIRM

pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod profile;
pub mod prompts;
pub mod rules;
pub mod session;
pub mod transcript;

pub use error::Result;

// Re-export common types
pub use profile::{TaxProfile, TaxRegime};
pub use session::Interviewer;
pub use transcript::{Message, Role, Transcript};
