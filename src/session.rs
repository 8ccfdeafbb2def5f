//! Stage controller - drives the four-stage interview
//!
//! GREETING → CLARIFY → EXTRACT → COMPUTE & CONFIRM
//!
//! Each stage owns its own transcript, seeded with that stage's system
//! instruction. User replies pass the moderation gate before being
//! admitted anywhere; flagged input only triggers a re-prompt.

use crate::console::Console;
use crate::engine::{DialogueEngine, ModerationGate};
use crate::error::InterviewError;
use crate::profile::TaxProfile;
use crate::prompts;
use crate::rules::RulesTable;
use crate::transcript::{SummaryBuffer, Transcript};
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Clarification stage states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClarificationState {
    Asking,
    Done,
}

/// Computation stage states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationState {
    Computing,
    Confirmed,
}

/// Per-session knobs carried from `Config`
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub chat_model: String,
    pub reasoning_model: String,
    /// `None` = ask until satisfied (the production default)
    pub turn_limit: Option<u32>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chat_model: crate::config::DEFAULT_CHAT_MODEL.to_string(),
            reasoning_model: crate::config::DEFAULT_REASONING_MODEL.to_string(),
            turn_limit: None,
        }
    }
}

/// Stage controller for one linear interview session
pub struct Interviewer {
    engine: Arc<dyn DialogueEngine>,
    gate: Arc<dyn ModerationGate>,
    options: SessionOptions,
}

impl Interviewer {
    pub fn new(
        engine: Arc<dyn DialogueEngine>,
        gate: Arc<dyn ModerationGate>,
        options: SessionOptions,
    ) -> Self {
        Self {
            engine,
            gate,
            options,
        }
    }

    /// Run the full pipeline. Stage N+1 never begins before stage N's
    /// terminal condition fires.
    pub async fn run(&self, console: &mut dyn Console, rules: &RulesTable) -> Result<()> {
        self.greet(console).await?;

        let summary = self.clarify(console).await?;
        info!(utterances = summary.split(' ').count(), "Clarification complete");

        let profile = self.extract(&summary).await?;
        info!(regime = ?profile.tax_regime, "Tax profile extracted");

        self.compute(console, &profile, rules).await?;
        info!("Computation confirmed - session complete");

        Ok(())
    }

    /// Greeting stage: one fixed welcome utterance, no user input
    pub async fn greet(&self, console: &mut dyn Console) -> Result<()> {
        let transcript = Transcript::new(prompts::GREETING);
        let utterance = self
            .engine
            .generate(transcript.messages(), &self.options.chat_model)
            .await?;
        self.say_as_assistant(console, &utterance)
    }

    /// Intent clarification stage: interview until the user confirms the
    /// summary with the exact literal `"Yes"` (case-sensitive, untrimmed).
    /// Returns the space-joined conversation summary text.
    pub async fn clarify(&self, console: &mut dyn Console) -> Result<String> {
        let mut transcript = Transcript::new(prompts::CLARIFICATION);
        let mut summary = SummaryBuffer::new();
        let mut state = ClarificationState::Asking;
        let mut turns: u32 = 0;

        while state == ClarificationState::Asking {
            self.check_turn_limit(turns, "clarification")?;
            turns += 1;

            let utterance = self
                .engine
                .generate(transcript.messages(), &self.options.chat_model)
                .await?;
            self.say_as_assistant(console, &utterance)?;

            let reply = self.read_moderated(console).await?;

            summary.record(utterance.clone());
            summary.record(reply.clone());

            if reply == "Yes" {
                state = ClarificationState::Done;
            } else {
                transcript.push_exchange(utterance, reply);
            }
        }

        info!(turns = turns, "Clarification summary confirmed");
        Ok(summary.join())
    }

    /// Structured extraction stage: single call, parsed and validated
    pub async fn extract(&self, summary: &str) -> Result<TaxProfile> {
        let transcript = Transcript::with_user(prompts::EXTRACTION, summary);
        let raw = self
            .engine
            .generate(transcript.messages(), &self.options.reasoning_model)
            .await?;

        TaxProfile::parse(&raw)
    }

    /// Computation & confirmation stage: present payable tax and loop
    /// until the lower-cased reply equals `"yes"`.
    pub async fn compute(
        &self,
        console: &mut dyn Console,
        profile: &TaxProfile,
        rules: &RulesTable,
    ) -> Result<()> {
        let instruction =
            prompts::computation(&profile.to_prompt_text()?, &rules.to_prompt_text()?);
        let mut transcript = Transcript::new(instruction);
        let mut state = ComputationState::Computing;
        let mut turns: u32 = 0;

        while state == ComputationState::Computing {
            self.check_turn_limit(turns, "computation")?;
            turns += 1;

            let utterance = self
                .engine
                .generate(transcript.messages(), &self.options.reasoning_model)
                .await?;
            self.say_as_assistant(console, &utterance)?;

            let reply = self.read_moderated(console).await?;

            if reply.to_lowercase() == "yes" {
                state = ComputationState::Confirmed;
            } else {
                transcript.push_exchange(utterance, reply);
            }
        }

        info!(turns = turns, "Computation confirmed");
        Ok(())
    }

    /// Read one user line, re-prompting while the moderation gate flags
    /// it. Flagged input is never recorded anywhere.
    async fn read_moderated(&self, console: &mut dyn Console) -> Result<String> {
        let mut attempts: u32 = 0;
        let mut reply = console.read_line()?;

        while self.gate.is_flagged(&reply).await? {
            self.check_turn_limit(attempts, "moderation re-prompt")?;
            attempts += 1;

            warn!("Moderation gate rejected user input");
            console.say(prompts::MODERATION_REPROMPT)?;
            reply = console.read_line()?;
        }

        Ok(reply)
    }

    fn say_as_assistant(&self, console: &mut dyn Console, utterance: &str) -> Result<()> {
        console.say(&format!("{}{}", prompts::ASSISTANT_LABEL, utterance))
    }

    fn check_turn_limit(&self, turns: u32, stage: &str) -> Result<()> {
        if let Some(limit) = self.options.turn_limit {
            if turns >= limit {
                return Err(InterviewError::TurnLimitExceeded(format!(
                    "{} exceeded {} turns",
                    stage, limit
                )));
            }
        }
        Ok(())
    }
}
