// Brand Factory Engine — Interview Session
// One conversational turn of the discovery interview. The user turn is
// persisted before the service is called so a failed call never loses what
// the talent said; the assistant turn is appended only on success.

use log::{debug, info, warn};
use serde::Serialize;

use brandfactory_core::{ChatTurn, Profile};

use crate::atoms::constants::MANDATORY_QUESTIONS;
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::{AudioTranscriber, TextGenerator};
use crate::atoms::types::{AudioClip, InterviewConfig, Message, ResponseFormat};
use crate::engine::prompts::build_interview_prompt;

/// Outcome of an audio turn: what was heard and what the strategist said.
#[derive(Debug, Clone, Serialize)]
pub struct AudioTurn {
    pub transcript: String,
    pub reply: String,
}

/// Mandatory questions followed by the operator's non-blank custom ones.
pub fn interview_questions(config: &InterviewConfig) -> Vec<String> {
    let mut questions: Vec<String> = MANDATORY_QUESTIONS.iter().map(|q| q.to_string()).collect();
    if config.use_custom_questions {
        questions.extend(
            config
                .custom_questions
                .iter()
                .map(|q| q.trim())
                .filter(|q| !q.is_empty())
                .map(|q| q.to_string()),
        );
    }
    questions
}

/// System instruction plus the full history, oldest first.
fn interview_messages(profile: &Profile, config: &InterviewConfig) -> Vec<Message> {
    let mut messages = Vec::with_capacity(profile.chat_history.len() + 1);
    messages.push(Message::system(build_interview_prompt(&interview_questions(config))));
    messages.extend(profile.chat_history.iter().map(Message::from));
    messages
}

async fn request_reply(
    profile: &mut Profile,
    config: &InterviewConfig,
    generator: &dyn TextGenerator,
) -> EngineResult<String> {
    let messages = interview_messages(profile, config);
    let reply = match generator.generate(&messages, ResponseFormat::Text).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("[interview] reply failed for profile {}: {}", profile.id, e);
            return Err(e);
        }
    };
    let reply = reply.trim().to_string();
    profile.push_turn(ChatTurn::assistant(reply.clone()));
    if profile.dna.is_some() {
        debug!("[interview] profile {} chatting past its extracted DNA; DNA kept", profile.id);
    }
    info!(
        "[interview] profile {} now has {} turns",
        profile.id,
        profile.chat_history.len()
    );
    Ok(reply)
}

/// Typed turn. Returns the assistant reply.
pub async fn send_turn(
    profile: &mut Profile,
    utterance: &str,
    config: &InterviewConfig,
    generator: &dyn TextGenerator,
) -> EngineResult<String> {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return Err(EngineError::validation("message must not be empty"));
    }
    profile.push_turn(ChatTurn::user(utterance));
    request_reply(profile, config, generator).await
}

/// Voice-note turn: transcribe, append the tagged transcript, then ask for
/// a reply exactly as for a typed turn.
pub async fn send_audio_turn(
    profile: &mut Profile,
    clip: &AudioClip,
    config: &InterviewConfig,
    transcriber: &dyn AudioTranscriber,
    generator: &dyn TextGenerator,
) -> EngineResult<AudioTurn> {
    let transcript = transcriber.transcribe(clip).await?;
    let transcript = transcript.trim().to_string();
    if transcript.is_empty() {
        return Err(EngineError::parse(format!(
            "transcription of {} came back empty",
            clip.file_name
        )));
    }
    info!(
        "[interview] transcribed {} ({} chars) for profile {}",
        clip.file_name,
        transcript.chars().count(),
        profile.id
    );
    profile.push_turn(ChatTurn::audio(&transcript));
    let reply = request_reply(profile, config, generator).await?;
    Ok(AudioTurn { transcript, reply })
}
