// commands/interview.rs — Profiler stage: chat turns, voice notes, DNA
// extraction and the operator's custom question list.
// All business logic lives in engine/interview.rs and engine/extractor.rs.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use brandfactory_core::navigation::{current_profile, current_profile_mut};
use brandfactory_core::{BrandDna, ChatTurn};

use crate::atoms::constants::MANDATORY_QUESTIONS;
use crate::atoms::error::EngineError;
use crate::atoms::types::AudioClip;
use crate::commands::fail;
use crate::engine::interview::{self, AudioTurn};
use crate::engine::{extractor, state::FactoryState};

pub async fn send_message(state: &mut FactoryState, text: &str) -> Result<String, String> {
    let generator = state.generator.clone();
    let profile = current_profile_mut(&mut state.store).map_err(|e| fail("interview")(e.into()))?;
    interview::send_turn(profile, text, &state.config.interview, generator.as_ref())
        .await
        .map_err(fail("interview"))
}

pub async fn send_audio(state: &mut FactoryState, path: &Path) -> Result<AudioTurn, String> {
    let transcriber = state.transcriber.clone().ok_or_else(|| {
        fail("interview")(EngineError::config(
            "audio input is not available with the configured provider",
        ))
    })?;
    let bytes = fs::read(path).map_err(|e| fail("interview")(e.into()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.mp3".to_string());
    let clip = AudioClip::new(file_name, bytes);

    let generator = state.generator.clone();
    let profile = current_profile_mut(&mut state.store).map_err(|e| fail("interview")(e.into()))?;
    interview::send_audio_turn(
        profile,
        &clip,
        &state.config.interview,
        transcriber.as_ref(),
        generator.as_ref(),
    )
    .await
    .map_err(fail("interview"))
}

pub async fn extract_profile(state: &mut FactoryState) -> Result<BrandDna, String> {
    let generator = state.generator.clone();
    let profile = current_profile_mut(&mut state.store).map_err(|e| fail("extract")(e.into()))?;
    extractor::extract_dna(profile, generator.as_ref())
        .await
        .cloned()
        .map_err(fail("extract"))
}

pub fn history(state: &FactoryState) -> Result<Vec<ChatTurn>, String> {
    current_profile(&state.store)
        .map(|p| p.chat_history.clone())
        .map_err(|e| EngineError::from(e).to_string())
}

/// Mandatory questions, the operator's custom list and whether it is in use.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    pub mandatory: Vec<String>,
    pub custom: Vec<String>,
    pub custom_enabled: bool,
}

/// Questions the next interview turn will cover, in order.
pub fn list_questions(state: &FactoryState) -> Vec<String> {
    interview::interview_questions(&state.config.interview)
}

pub fn question_bank(state: &FactoryState) -> QuestionBank {
    QuestionBank {
        mandatory: MANDATORY_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        custom: state.config.interview.custom_questions.clone(),
        custom_enabled: state.config.interview.use_custom_questions,
    }
}

/// Append a custom question for this session.
pub fn add_question(state: &mut FactoryState, text: &str) -> Result<QuestionBank, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(fail("interview")(EngineError::validation("question must not be empty")));
    }
    state.config.interview.custom_questions.push(text.to_string());
    if !state.config.interview.use_custom_questions {
        info!("[interview] custom questions are switched off in the configuration");
    }
    Ok(question_bank(state))
}

/// Drop the custom question at 1-based `position`.
pub fn remove_question(state: &mut FactoryState, position: usize) -> Result<QuestionBank, String> {
    let custom = &mut state.config.interview.custom_questions;
    if position == 0 || position > custom.len() {
        return Err(fail("interview")(EngineError::validation(format!(
            "no custom question #{} ({} defined)",
            position,
            custom.len()
        ))));
    }
    let removed = custom.remove(position - 1);
    info!("[interview] removed custom question: {}", removed);
    Ok(question_bank(state))
}

/// Include or leave out the custom questions from the next turn on.
pub fn set_custom_questions(state: &mut FactoryState, enabled: bool) -> QuestionBank {
    state.config.interview.use_custom_questions = enabled;
    info!(
        "[interview] custom questions {}",
        if enabled { "switched on" } else { "switched off" }
    );
    question_bank(state)
}
