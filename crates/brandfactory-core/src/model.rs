// ── Brand Factory Core: Data Model ─────────────────────────────────────────
// Idea → Topic → Profile. Every entity here is plain data plus the small
// invariant-keeping mutators; no I/O, no network.
//
// Ownership: a Profile owns its chat history and topics, a Topic owns its
// ideas. Nothing is shared, so every Idea is reachable through exactly one
// Topic and one Profile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

// ── Constants ──────────────────────────────────────────────────────────────

/// First assistant line of every interview. Seeds `chat_history` so it is
/// never empty.
pub const OPENING_LINE: &str = "Hi. I'm the Lead Strategist at Brand People. \
Let's find your unique angle. To start, tell me: what do you do, and what is \
your main goal on social media?";

/// Prefix marking a user turn that came from an audio transcription.
pub const AUDIO_TAG: &str = "[AUDIO]: ";

/// Visual hook stored when the author did not provide one.
pub const NOT_APPLICABLE_HOOK: &str = "N/A";

pub(crate) fn fresh_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

// ── Pillars ────────────────────────────────────────────────────────────────

/// Content pillar an idea belongs to. Generated ideas are constrained to the
/// first five; `Other` is only reachable through manual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pillar {
    #[serde(alias = "EDUCACIÓN", alias = "EDUCACION")]
    Education,
    #[serde(alias = "CURIOSIDAD")]
    Curiosity,
    #[serde(alias = "POLÉMICA", alias = "POLEMICA")]
    Controversy,
    Lifestyle,
    #[serde(alias = "GAMIFICACIÓN", alias = "GAMIFICACION")]
    Gamification,
    #[serde(alias = "OTRO")]
    Other,
}

impl Pillar {
    /// The five pillars generated ideas must use.
    pub const GENERATED: [Pillar; 5] = [
        Pillar::Education,
        Pillar::Curiosity,
        Pillar::Controversy,
        Pillar::Lifestyle,
        Pillar::Gamification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Education => "EDUCATION",
            Pillar::Curiosity => "CURIOSITY",
            Pillar::Controversy => "CONTROVERSY",
            Pillar::Lifestyle => "LIFESTYLE",
            Pillar::Gamification => "GAMIFICATION",
            Pillar::Other => "OTHER",
        }
    }

    /// Short description used when prompting for ideas.
    pub fn brief(&self) -> &'static str {
        match self {
            Pillar::Education => "rapid education (how-to)",
            Pillar::Curiosity => "curiosity (did you know?)",
            Pillar::Controversy => "controversy / ranking",
            Pillar::Lifestyle => "lifestyle / vlog",
            Pillar::Gamification => "gamification (challenges, games)",
            Pillar::Other => "other",
        }
    }

    pub fn is_generated(&self) -> bool {
        !matches!(self, Pillar::Other)
    }

    /// Map a free-form pillar label onto the enum.
    ///
    /// Language models decorate labels ("1. EDUCACIÓN RÁPIDA (How-To)",
    /// "Polémica/Ranking"), so matching is keyword based after folding case
    /// and accents. Returns `None` for anything unrecognised.
    pub fn from_label(label: &str) -> Option<Pillar> {
        let folded = fold_accents(label).to_uppercase();
        let has = |needle: &str| folded.contains(needle);

        if has("EDUC") || has("HOW-TO") || has("HOW TO") || has("TUTORIAL") {
            Some(Pillar::Education)
        } else if has("CURIOS") || has("DID YOU KNOW") || has("TRIVIA") {
            Some(Pillar::Curiosity)
        } else if has("CONTROVER") || has("POLEMIC") || has("RANKING") {
            Some(Pillar::Controversy)
        } else if has("LIFESTYLE") || has("VLOG") {
            Some(Pillar::Lifestyle)
        } else if has("GAMIF") || has("CHALLENGE") {
            Some(Pillar::Gamification)
        } else if has("OTHER") || has("OTRO") {
            Some(Pillar::Other)
        } else {
            None
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pillar::from_label(s)
            .ok_or_else(|| CoreError::validation(format!("unknown pillar '{}'", s.trim())))
    }
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

// ── Chat transcript ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }

    /// A user turn transcribed from audio, tagged so it stays recognisable.
    pub fn audio(transcript: &str) -> Self {
        Self::user(format!("{}{}", AUDIO_TAG, transcript.trim()))
    }

    pub fn is_audio(&self) -> bool {
        self.role == ChatRole::User && self.content.starts_with(AUDIO_TAG)
    }
}

// ── Brand DNA ──────────────────────────────────────────────────────────────

/// Structured summary of a talent's brand identity.
///
/// The three list-like fields accept either a single string or a list when
/// deserialized, since extraction responses use both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDna {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "arquetipo")]
    pub archetype: String,
    #[serde(alias = "tono")]
    pub tone: String,
    #[serde(alias = "jerga_tecnica", deserialize_with = "one_or_many")]
    pub technical_jargon: Vec<String>,
    #[serde(alias = "opiniones_polemicas", deserialize_with = "one_or_many")]
    pub controversial_opinions: Vec<String>,
    #[serde(alias = "temas_pasion", deserialize_with = "one_or_many")]
    pub passion_topics: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(items) => items,
    })
}

// ── Idea ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub pillar: Pillar,
    pub visual_hook: String,
    /// Always present in the document; `null` until a script is written.
    #[serde(deserialize_with = "Option::deserialize")]
    pub script: Option<String>,
}

impl Idea {
    /// Build an idea with a fresh id and no script. Callers validate inputs.
    pub fn new(title: impl Into<String>, pillar: Pillar, visual_hook: impl Into<String>) -> Self {
        Self {
            id: fresh_id("idea"),
            title: title.into(),
            pillar,
            visual_hook: visual_hook.into(),
            script: None,
        }
    }

    /// A manually authored idea: title required, pillar defaults to OTHER,
    /// hook defaults to [`NOT_APPLICABLE_HOOK`].
    pub fn manual(title: &str, pillar: Option<Pillar>, visual_hook: Option<&str>) -> CoreResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("idea title is required"));
        }
        let hook = visual_hook
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(NOT_APPLICABLE_HOOK);
        Ok(Self::new(title, pillar.unwrap_or(Pillar::Other), hook))
    }

    /// Replace the draft. Earlier drafts are not kept.
    pub fn set_script(&mut self, text: impl Into<String>) {
        self.script = Some(text.into());
    }

    pub fn is_scripted(&self) -> bool {
        self.script.is_some()
    }

    /// `[PILLAR] title`, as shown in idea pickers.
    pub fn label(&self) -> String {
        format!("[{}] {}", self.pillar, self.title)
    }
}

// ── Topic ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStage {
    Empty,
    Ideated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub ideas: Vec<Idea>,
}

impl Topic {
    pub fn new(name: &str) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("topic name must not be empty"));
        }
        Ok(Self { id: fresh_id("topic"), name: name.to_string(), ideas: Vec::new() })
    }

    /// Append a batch in arrival order and return the resulting idea list.
    pub fn append_ideas(&mut self, batch: impl IntoIterator<Item = Idea>) -> &[Idea] {
        self.ideas.extend(batch);
        &self.ideas
    }

    pub fn idea(&self, id: &str) -> CoreResult<&Idea> {
        self.ideas
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("idea", id))
    }

    pub fn idea_mut(&mut self, id: &str) -> CoreResult<&mut Idea> {
        self.ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::not_found("idea", id))
    }

    pub fn stage(&self) -> TopicStage {
        if self.ideas.is_empty() {
            TopicStage::Empty
        } else {
            TopicStage::Ideated
        }
    }
}

// ── Profile ────────────────────────────────────────────────────────────────

/// Coarse lifecycle stage, derived from data. It never regresses: chatting
/// after extraction keeps the profile `Profiled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStage {
    New,
    Interviewing,
    Profiled,
}

impl fmt::Display for ProfileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileStage::New => "new",
            ProfileStage::Interviewing => "interviewing",
            ProfileStage::Profiled => "profiled",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub dna: Option<BrandDna>,
    pub chat_history: Vec<ChatTurn>,
    pub topics: BTreeMap<String, Topic>,
}

impl Profile {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            id: fresh_id("prof"),
            name: name.to_string(),
            dna: None,
            chat_history: vec![ChatTurn::assistant(OPENING_LINE)],
            topics: BTreeMap::new(),
        }
    }

    pub fn push_turn(&mut self, turn: ChatTurn) -> &ChatTurn {
        self.chat_history.push(turn);
        // chat_history is seeded at creation and only grows.
        &self.chat_history[self.chat_history.len() - 1]
    }

    /// Replace the DNA wholesale. No field-level merge with a previous one.
    pub fn set_dna(&mut self, dna: BrandDna) -> &BrandDna {
        self.dna.insert(dna)
    }

    pub fn stage(&self) -> ProfileStage {
        if self.dna.is_some() {
            ProfileStage::Profiled
        } else if self.chat_history.len() > 1 {
            ProfileStage::Interviewing
        } else {
            ProfileStage::New
        }
    }

    /// Name to show: the extracted DNA name when present, else the profile name.
    pub fn display_name(&self) -> &str {
        self.dna
            .as_ref()
            .map(|d| d.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn create_topic(&mut self, name: &str) -> CoreResult<&Topic> {
        let topic = Topic::new(name)?;
        log::info!("[store] Topic '{}' ({}) created in profile {}", topic.name, topic.id, self.id);
        let id = topic.id.clone();
        Ok(self.topics.entry(id).or_insert(topic))
    }

    pub fn topic(&self, id: &str) -> CoreResult<&Topic> {
        self.topics.get(id).ok_or_else(|| CoreError::not_found("topic", id))
    }

    pub fn topic_mut(&mut self, id: &str) -> CoreResult<&mut Topic> {
        self.topics.get_mut(id).ok_or_else(|| CoreError::not_found("topic", id))
    }

    /// Topics ordered by name for display.
    pub fn topics_by_name(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.topics.values().collect();
        topics.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_labels_are_normalized() {
        assert_eq!(Pillar::from_label("1. EDUCACIÓN RÁPIDA (How-To)"), Some(Pillar::Education));
        assert_eq!(Pillar::from_label("Curiosidad (Did you know?)"), Some(Pillar::Curiosity));
        assert_eq!(Pillar::from_label("POLÉMICA/RANKING"), Some(Pillar::Controversy));
        assert_eq!(Pillar::from_label("lifestyle / vlog"), Some(Pillar::Lifestyle));
        assert_eq!(Pillar::from_label("Gamificación"), Some(Pillar::Gamification));
        assert_eq!(Pillar::from_label("otro"), Some(Pillar::Other));
        assert_eq!(Pillar::from_label("astrology"), None);
    }

    #[test]
    fn pillar_serializes_in_upper_case_and_accepts_spanish() {
        assert_eq!(serde_json::to_string(&Pillar::Gamification).unwrap(), "\"GAMIFICATION\"");
        let p: Pillar = serde_json::from_str("\"POLÉMICA\"").unwrap();
        assert_eq!(p, Pillar::Controversy);
    }

    #[test]
    fn manual_idea_defaults() {
        let idea = Idea::manual("  Pit stop in 2 seconds  ", None, Some("   ")).unwrap();
        assert_eq!(idea.title, "Pit stop in 2 seconds");
        assert_eq!(idea.pillar, Pillar::Other);
        assert_eq!(idea.visual_hook, NOT_APPLICABLE_HOOK);
        assert!(idea.script.is_none());
        assert!(idea.id.starts_with("idea-"));
    }

    #[test]
    fn manual_idea_requires_title() {
        let err = Idea::manual("   ", Some(Pillar::Lifestyle), None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn dna_accepts_strings_lists_and_spanish_keys() {
        let raw = r#"{
            "nombre": "Ana",
            "arquetipo": "Insider",
            "tono": "Cercano",
            "jerga_tecnica": "telemetría",
            "opiniones_polemicas": ["F1 is boring", "EVs are fine"],
            "temas_pasion": ""
        }"#;
        let dna: BrandDna = serde_json::from_str(raw).unwrap();
        assert_eq!(dna.name, "Ana");
        assert_eq!(dna.technical_jargon, vec!["telemetría".to_string()]);
        assert_eq!(dna.controversial_opinions.len(), 2);
        assert!(dna.passion_topics.is_empty());
    }

    #[test]
    fn dna_missing_field_is_rejected() {
        let raw = r#"{"name": "Ana", "archetype": "Insider", "tone": "warm"}"#;
        assert!(serde_json::from_str::<BrandDna>(raw).is_err());
    }

    #[test]
    fn audio_turns_are_tagged() {
        let turn = ChatTurn::audio("  I race karts  ");
        assert_eq!(turn.content, "[AUDIO]: I race karts");
        assert!(turn.is_audio());
        assert!(!ChatTurn::user("hello").is_audio());
    }

    #[test]
    fn script_overwrite_keeps_latest_only() {
        let mut idea = Idea::new("Title", Pillar::Curiosity, "hook");
        idea.set_script("first");
        idea.set_script("second");
        assert_eq!(idea.script.as_deref(), Some("second"));
    }

    #[test]
    fn profile_stage_progression() {
        let mut profile = Profile::new("Ana");
        assert_eq!(profile.stage(), ProfileStage::New);
        profile.push_turn(ChatTurn::user("I sell cars"));
        assert_eq!(profile.stage(), ProfileStage::Interviewing);
        profile.set_dna(BrandDna {
            name: "Ana".into(),
            archetype: "Insider".into(),
            tone: "warm".into(),
            technical_jargon: vec![],
            controversial_opinions: vec![],
            passion_topics: vec![],
        });
        profile.push_turn(ChatTurn::user("one more thing"));
        assert_eq!(profile.stage(), ProfileStage::Profiled);
    }

    #[test]
    fn blank_topic_name_is_rejected() {
        let mut profile = Profile::new("Ana");
        assert!(matches!(profile.create_topic(" "), Err(CoreError::Validation(_))));
        assert!(profile.topics.is_empty());
    }
}
