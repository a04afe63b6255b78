// Brand Factory Engine — Script Writer
// Renders the operator template with the profile DNA and the selected idea,
// then asks for a short-form video script. The idea's script is overwritten
// only when the call succeeds.

use log::{info, warn};
use serde::Serialize;

use brandfactory_core::{BrandDna, Idea, Pillar, Profile};

use crate::atoms::constants::{DEFAULT_SCRIPT_TEMPLATE, IDEA_PLACEHOLDER, PROFILE_PLACEHOLDER};
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::TextGenerator;
use crate::atoms::types::{Message, ResponseFormat};
use crate::engine::prompts::SCRIPT_SYSTEM_PROMPT;

// ── Template ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate(String);

impl ScriptTemplate {
    pub fn new(text: impl Into<String>) -> EngineResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EngineError::validation("script template must not be blank"));
        }
        for placeholder in [PROFILE_PLACEHOLDER, IDEA_PLACEHOLDER] {
            if !text.contains(placeholder) {
                warn!("[script] template has no {} placeholder", placeholder);
            }
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Literal substitution; no other braces are interpreted.
    pub fn render(&self, profile_str: &str, idea_str: &str) -> String {
        self.0
            .replace(PROFILE_PLACEHOLDER, profile_str)
            .replace(IDEA_PLACEHOLDER, idea_str)
    }
}

impl Default for ScriptTemplate {
    fn default() -> Self {
        Self(DEFAULT_SCRIPT_TEMPLATE.to_string())
    }
}

/// What the scriptwriter sees of an idea.
#[derive(Serialize)]
struct IdeaBrief<'a> {
    title: &'a str,
    pillar: Pillar,
    visual_hook: &'a str,
}

impl<'a> From<&'a Idea> for IdeaBrief<'a> {
    fn from(idea: &'a Idea) -> Self {
        Self { title: &idea.title, pillar: idea.pillar, visual_hook: &idea.visual_hook }
    }
}

/// The user prompt for one idea.
pub fn script_prompt(template: &ScriptTemplate, dna: &BrandDna, idea: &Idea) -> EngineResult<String> {
    let profile_str = serde_json::to_string(dna)?;
    let idea_str = serde_json::to_string(&IdeaBrief::from(idea))?;
    Ok(template.render(&profile_str, &idea_str))
}

// ── Operation ──────────────────────────────────────────────────────────────

/// Write (or rewrite) the script of one idea. Returns the new script.
pub async fn write_script<'a>(
    profile: &'a mut Profile,
    topic_id: &str,
    idea_id: &str,
    template: &ScriptTemplate,
    generator: &dyn TextGenerator,
) -> EngineResult<&'a str> {
    let dna = profile.dna.as_ref().ok_or_else(|| {
        EngineError::insufficient("extract the brand profile before writing scripts")
    })?;
    let idea = profile.topic(topic_id)?.idea(idea_id)?;
    let prompt = script_prompt(template, dna, idea)?;

    let messages = [Message::system(SCRIPT_SYSTEM_PROMPT), Message::user(prompt)];
    let text = match generator.generate(&messages, ResponseFormat::Text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("[script] idea {} left unchanged: {}", idea_id, e);
            return Err(e);
        }
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(EngineError::parse("script response was empty"));
    }

    let idea = profile.topic_mut(topic_id)?.idea_mut(idea_id)?;
    let rewrite = idea.is_scripted();
    idea.set_script(text);
    info!(
        "[script] {} script for idea {} ({} chars)",
        if rewrite { "rewrote" } else { "wrote" },
        idea_id,
        text.chars().count()
    );
    Ok(idea.script.as_deref().unwrap_or_default())
}
