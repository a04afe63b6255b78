// Brand Factory Engine — Profile Extractor
// Turns a finished interview into a BrandDna via one structured-output call.
// Nothing is adopted unless the whole response parses and validates.

use log::{debug, info, warn};

use brandfactory_core::{BrandDna, ChatTurn, Profile};

use crate::atoms::constants::MIN_EXTRACTION_TURNS;
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::TextGenerator;
use crate::atoms::types::{Message, ResponseFormat};
use crate::engine::prompts::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use crate::engine::response::parse_json;

/// One `role: content` line per turn.
pub fn flatten_transcript(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and validate an extraction response.
pub fn parse_dna(text: &str) -> EngineResult<BrandDna> {
    let dna: BrandDna = parse_json("extraction", text)?;
    for (field, value) in [("name", &dna.name), ("archetype", &dna.archetype), ("tone", &dna.tone)] {
        if value.trim().is_empty() {
            return Err(EngineError::parse(format!("extraction left '{}' blank", field)));
        }
    }
    Ok(dna)
}

/// Extract and store the profile's DNA. Fails with `InsufficientData`
/// before any network call when the interview is too short.
pub async fn extract_dna<'a>(
    profile: &'a mut Profile,
    generator: &dyn TextGenerator,
) -> EngineResult<&'a BrandDna> {
    let turns = profile.chat_history.len();
    if turns < MIN_EXTRACTION_TURNS {
        return Err(EngineError::insufficient(format!(
            "the interview has {} turn(s); at least {} are needed before extracting a profile",
            turns, MIN_EXTRACTION_TURNS
        )));
    }

    let messages = [
        Message::system(EXTRACTION_SYSTEM_PROMPT),
        Message::user(build_extraction_prompt(&flatten_transcript(&profile.chat_history))),
    ];
    let text = generator.generate(&messages, ResponseFormat::JsonObject).await?;
    let dna = parse_dna(&text).inspect_err(|e| {
        warn!("[extract] profile {}: {}", profile.id, e);
    })?;

    if profile.dna.is_some() {
        debug!("[extract] replacing existing DNA of profile {}", profile.id);
    }
    info!(
        "[extract] profile {} profiled as '{}' ({})",
        profile.id, dna.name, dna.archetype
    );
    Ok(profile.set_dna(dna))
}
