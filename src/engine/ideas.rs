// Brand Factory Engine — Idea Generator
// Batches of pillar-tagged video ideas for a topic, grounded on the profile's
// DNA. Empty topics get an initial batch, ideated topics get a follow-up
// batch. A batch is adopted whole or not at all.

use log::{info, warn};
use serde::Deserialize;

use brandfactory_core::{Idea, Pillar, Profile, Topic, NOT_APPLICABLE_HOOK};

use crate::atoms::constants::{INITIAL_IDEA_COUNT, MORE_IDEA_COUNT};
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::traits::TextGenerator;
use crate::atoms::types::{Message, ResponseFormat};
use crate::engine::prompts::{
    build_initial_ideas_prompt, build_more_ideas_prompt, IDEAS_SYSTEM_PROMPT,
};
use crate::engine::response::parse_json;

// ── Modes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaMode {
    Initial,
    More,
}

impl IdeaMode {
    pub fn for_topic(topic: &Topic) -> Self {
        if topic.ideas.is_empty() {
            IdeaMode::Initial
        } else {
            IdeaMode::More
        }
    }

    pub fn requested(&self) -> usize {
        match self {
            IdeaMode::Initial => INITIAL_IDEA_COUNT,
            IdeaMode::More => MORE_IDEA_COUNT,
        }
    }
}

// ── Response shape ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IdeaStub {
    #[serde(default, alias = "titulo", alias = "título")]
    title: Option<String>,
    #[serde(default, alias = "pilar")]
    pillar: Option<String>,
    #[serde(default, alias = "gancho_visual", alias = "hook")]
    visual_hook: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdeasResponse {
    Wrapped {
        #[serde(alias = "ideas_virales", alias = "videos")]
        ideas: Vec<IdeaStub>,
    },
    Bare(Vec<IdeaStub>),
}

/// Parse a generated batch into fresh, unscripted ideas.
pub fn parse_ideas(text: &str) -> EngineResult<Vec<Idea>> {
    let stubs = match parse_json::<IdeasResponse>("ideas", text)? {
        IdeasResponse::Wrapped { ideas } => ideas,
        IdeasResponse::Bare(ideas) => ideas,
    };

    stubs
        .into_iter()
        .enumerate()
        .map(|(i, stub)| {
            let title = stub
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| EngineError::parse(format!("idea #{} has no title", i + 1)))?;
            let label = stub.pillar.unwrap_or_default();
            let pillar = Pillar::from_label(&label)
                .filter(Pillar::is_generated)
                .ok_or_else(|| {
                    EngineError::parse(format!(
                        "idea '{}' has pillar '{}', which is not one of the five content pillars",
                        title, label
                    ))
                })?;
            let hook = stub
                .visual_hook
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| NOT_APPLICABLE_HOOK.to_string());
            Ok(Idea::new(title, pillar, hook))
        })
        .collect()
}

fn ideas_prompt(profile_json: &str, topic: &Topic, mode: IdeaMode) -> String {
    match mode {
        IdeaMode::Initial => build_initial_ideas_prompt(profile_json, &topic.name, mode.requested()),
        IdeaMode::More => {
            let titles: Vec<&str> = topic.ideas.iter().map(|i| i.title.as_str()).collect();
            build_more_ideas_prompt(profile_json, &topic.name, &titles, mode.requested())
        }
    }
}

// ── Operations ─────────────────────────────────────────────────────────────

/// Generate a batch for `topic_id` and append it. Returns the topic's full
/// idea list after the append.
pub async fn generate_ideas<'a>(
    profile: &'a mut Profile,
    topic_id: &str,
    generator: &dyn TextGenerator,
) -> EngineResult<&'a [Idea]> {
    let dna = profile.dna.as_ref().ok_or_else(|| {
        EngineError::insufficient("extract the brand profile before generating ideas")
    })?;
    let topic = profile.topic(topic_id)?;
    let mode = IdeaMode::for_topic(topic);
    let profile_json = serde_json::to_string(dna)?;

    let messages = [
        Message::system(IDEAS_SYSTEM_PROMPT),
        Message::user(ideas_prompt(&profile_json, topic, mode)),
    ];
    let text = generator.generate(&messages, ResponseFormat::JsonObject).await?;
    let batch = parse_ideas(&text).inspect_err(|e| {
        warn!("[ideas] topic {}: {}", topic_id, e);
    })?;

    if batch.len() != mode.requested() {
        warn!(
            "[ideas] topic {} asked for {} ideas, got {}",
            topic_id,
            mode.requested(),
            batch.len()
        );
    }
    info!("[ideas] {:?} batch of {} for topic {}", mode, batch.len(), topic_id);

    let topic = profile.topic_mut(topic_id)?;
    Ok(topic.append_ideas(batch))
}

/// Append an operator-authored idea. No network call.
pub fn add_manual_idea<'a>(
    profile: &'a mut Profile,
    topic_id: &str,
    title: &str,
    pillar: Option<Pillar>,
    visual_hook: Option<&str>,
) -> EngineResult<&'a Idea> {
    let topic = profile.topic_mut(topic_id)?;
    let idea = Idea::manual(title, pillar, visual_hook)?;
    info!("[ideas] manual idea '{}' added to topic {}", idea.title, topic_id);
    let ideas = topic.append_ideas([idea]);
    ideas
        .last()
        .ok_or_else(|| EngineError::validation("idea was not appended"))
}
