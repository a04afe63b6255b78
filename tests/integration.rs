// Integration tests: the full Profiler → Strategist → Scriptwriter flow
// driven through the engine and command layers with scripted services.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use brandfactory_core::{ChatRole, CoreError, Pillar, ProfileStore, Stage, AUDIO_TAG, NOT_APPLICABLE_HOOK};
use brandfactory_lib::commands::{interview, profiles, scripts, snapshot, strategy};
use brandfactory_lib::engine::{extractor, ideas, interview as turns};
use brandfactory_lib::{
    AudioClip, AudioTranscriber, EngineError, EngineResult, FactoryConfig, FactoryState, Message,
    ResponseFormat, Role, TextGenerator,
};

// ── Scripted services ──────────────────────────────────────────────────────

/// Replies in order; an `Err` entry becomes a service failure.
#[derive(Default)]
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(Vec<Message>, ResponseFormat)>>,
}

impl ScriptedGenerator {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    fn fail(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> (Vec<Message>, ResponseFormat) {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, messages: &[Message], format: ResponseFormat) -> EngineResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((messages.to_vec(), format));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(EngineError::service("scripted", message)),
            None => Err(EngineError::service("scripted", "no reply queued")),
        }
    }
}

struct FixedTranscriber(Result<String, String>);

#[async_trait]
impl AudioTranscriber for FixedTranscriber {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn transcribe(&self, _clip: &AudioClip) -> EngineResult<String> {
        self.0.clone().map_err(|m| EngineError::service("fixed", m))
    }
}

// ── Fixtures ───────────────────────────────────────────────────────────────

const ANA_DNA: &str = r#"{
    "nombre": "Ana",
    "arquetipo": "The Insider / Adventurer",
    "tono": "cercano y directo",
    "jerga_tecnica": ["apex", "undercut", "telemetría"],
    "opiniones_polemicas": ["El karting es más difícil que la F1"],
    "temas_pasion": "karting"
}"#;

fn idea_batch(prefix: &str, n: usize) -> String {
    let ideas: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "title": format!("{} {}", prefix, i + 1),
                "pillar": Pillar::GENERATED[i % 5].as_str(),
                "visual_hook": format!("hook {}", i + 1),
            })
        })
        .collect();
    serde_json::json!({ "ideas": ideas }).to_string()
}

fn session(generator: &Arc<ScriptedGenerator>) -> FactoryState {
    let text: Arc<dyn TextGenerator> = generator.clone();
    let audio: Arc<dyn AudioTranscriber> =
        Arc::new(FixedTranscriber(Ok("Corro en karts desde los 8 años".into())));
    FactoryState::new(FactoryConfig::default(), text, Some(audio)).unwrap()
}

/// Profile "Ana" with one exchange and extracted DNA, topic "Lanzamiento"
/// selected.
async fn profiled_session(generator: &Arc<ScriptedGenerator>) -> FactoryState {
    let mut state = session(generator);
    profiles::create_profile(&mut state, "Ana").unwrap();
    generator.reply("¿Qué te diferencia de otros pilotos?");
    interview::send_message(&mut state, "Soy piloto de karts").await.unwrap();
    generator.reply(ANA_DNA);
    interview::extract_profile(&mut state).await.unwrap();
    strategy::create_topic(&mut state, "Lanzamiento").unwrap();
    state
}

// ── Profiles ───────────────────────────────────────────────────────────────

#[test]
fn empty_profile_name_is_rejected_without_changes() {
    let mut store = ProfileStore::new();
    for name in ["", "   "] {
        assert!(matches!(store.create_profile(name), Err(CoreError::Validation(_))));
    }
    assert!(store.is_empty());
    assert!(store.current_profile_id().is_none());
}

#[test]
fn selecting_unknown_profile_keeps_current() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    let ana = profiles::create_profile(&mut state, "Ana").unwrap();
    let err = profiles::select_profile(&mut state, "prof-missing").unwrap_err();
    assert!(err.contains("not found"));
    assert_eq!(state.store.current_profile_id(), Some(ana.id.as_str()));
}

#[test]
fn switching_profile_clears_topic_selection() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    let ana = profiles::create_profile(&mut state, "Ana").unwrap();
    strategy::create_topic(&mut state, "Lanzamiento").unwrap();
    assert!(state.nav.topic_id().is_some());

    profiles::create_profile(&mut state, "Luis").unwrap();
    profiles::select_profile(&mut state, &ana.id).unwrap();
    assert!(state.nav.topic_id().is_none());
    assert!(strategy::list_ideas(&state).is_err());
}

// ── Interview ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn interview_turn_sends_system_prompt_and_history() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    state.config.interview.custom_questions = vec!["¿Cuál es tu circuito favorito?".into()];
    profiles::create_profile(&mut state, "Ana").unwrap();

    generator.reply("  Cuéntame más.  ");
    let reply = interview::send_message(&mut state, "Soy piloto de karts").await.unwrap();
    assert_eq!(reply, "Cuéntame más.");

    let (messages, format) = generator.last_request();
    assert_eq!(format, ResponseFormat::Text);
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.contains("¿Cuál es tu circuito favorito?"));
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].content, "Soy piloto de karts");

    let history = interview::history(&state).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].role, ChatRole::Assistant);
}

#[tokio::test]
async fn failed_reply_keeps_the_user_turn() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();

    generator.fail("429 rate limited");
    let err = interview::send_message(&mut state, "Hola").await.unwrap_err();
    assert!(err.contains("429"));

    let history = interview::history(&state).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, ChatRole::User);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn empty_message_is_rejected_before_the_service() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();
    assert!(interview::send_message(&mut state, "   ").await.is_err());
    assert_eq!(interview::history(&state).unwrap().len(), 1);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn audio_turn_is_tagged_and_answered() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();

    let dir = std::env::temp_dir().join(format!("brandfactory-audio-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let clip = dir.join("nota.m4a");
    std::fs::write(&clip, b"fake audio").unwrap();

    generator.reply("¡Desde los 8! ¿Y ahora?");
    let turn = interview::send_audio(&mut state, &clip).await.unwrap();
    assert_eq!(turn.transcript, "Corro en karts desde los 8 años");

    let history = interview::history(&state).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].content, format!("{}Corro en karts desde los 8 años", AUDIO_TAG));
    assert!(history[1].is_audio());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn empty_or_failed_transcription_leaves_history_untouched() {
    let generator = ScriptedGenerator::new();
    let clip = AudioClip::new("nota.mp3", b"fake".to_vec());
    let config = FactoryConfig::default();
    let mut store = ProfileStore::new();
    store.create_profile("Ana").unwrap();
    let profile = store.current_profile_mut().unwrap();

    let silent = FixedTranscriber(Ok("   ".into()));
    let err = turns::send_audio_turn(profile, &clip, &config.interview, &silent, &*generator)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)));

    let broken = FixedTranscriber(Err("quota".into()));
    let err = turns::send_audio_turn(profile, &clip, &config.interview, &broken, &*generator)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Service { .. }));

    assert_eq!(profile.chat_history.len(), 1);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn custom_questions_can_be_edited_and_switched_during_a_session() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();

    interview::add_question(&mut state, "¿Circuito favortio?").unwrap();
    let bank = interview::add_question(&mut state, "¿Circuito favorito?").unwrap();
    assert_eq!(bank.custom.len(), 2);
    assert!(interview::remove_question(&mut state, 0).is_err());
    assert!(interview::remove_question(&mut state, 3).is_err());

    let bank = interview::remove_question(&mut state, 1).unwrap();
    assert_eq!(bank.custom, vec!["¿Circuito favorito?".to_string()]);
    generator.reply("Vale.");
    interview::send_message(&mut state, "Hola").await.unwrap();
    let system = generator.last_request().0[0].content.clone();
    assert!(system.contains("¿Circuito favorito?"));
    assert!(!system.contains("favortio"));

    let bank = interview::set_custom_questions(&mut state, false);
    assert!(!bank.custom_enabled);
    assert_eq!(bank.custom.len(), 1);
    generator.reply("Sigue.");
    interview::send_message(&mut state, "Más").await.unwrap();
    assert!(!generator.last_request().0[0].content.contains("¿Circuito favorito?"));

    interview::set_custom_questions(&mut state, true);
    assert_eq!(interview::list_questions(&state).last().unwrap(), "¿Circuito favorito?");
}

// ── Extraction ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn extraction_needs_three_turns_and_never_calls_out_early() {
    let generator = ScriptedGenerator::new();
    let mut store = ProfileStore::new();
    store.create_profile("Ana").unwrap();
    let profile = store.current_profile_mut().unwrap();

    let err = extractor::extract_dna(profile, &*generator).await.unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData(_)));
    assert_eq!(generator.calls(), 0);
    assert!(profile.dna.is_none());
}

#[tokio::test]
async fn extraction_uses_json_mode_and_replaces_dna_wholesale() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;

    let (messages, format) = generator.requests.lock().unwrap()[1].clone();
    assert_eq!(format, ResponseFormat::JsonObject);
    assert!(messages[1].content.contains("user: Soy piloto de karts"));

    let dna = profiles::current_dna(&state).unwrap();
    assert_eq!(dna.name, "Ana");
    assert_eq!(dna.passion_topics, vec!["karting".to_string()]);

    generator.reply(r#"{"name": "Ana R.", "archetype": "The Technician / Analyst", "tone": "seco",
        "technical_jargon": [], "controversial_opinions": [], "passion_topics": []}"#);
    interview::extract_profile(&mut state).await.unwrap();
    let dna = profiles::current_dna(&state).unwrap();
    assert_eq!(dna.name, "Ana R.");
    assert!(dna.technical_jargon.is_empty());
}

#[tokio::test]
async fn malformed_extraction_keeps_previous_dna() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;

    generator.reply("no JSON here");
    assert!(interview::extract_profile(&mut state).await.is_err());
    generator.reply(r#"{"name": "Ana"}"#);
    assert!(interview::extract_profile(&mut state).await.is_err());

    assert_eq!(profiles::current_dna(&state).unwrap().name, "Ana");
}

// ── Ideas ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ideas_require_dna() {
    let generator = ScriptedGenerator::new();
    let mut store = ProfileStore::new();
    store.create_profile("Ana").unwrap();
    let profile = store.current_profile_mut().unwrap();
    let topic_id = profile.create_topic("Lanzamiento").unwrap().id.clone();

    let err = ideas::generate_ideas(profile, &topic_id, &*generator).await.unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn ana_launch_scenario() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    assert_eq!(profiles::current(&state).unwrap().stage, "profiled");

    // Initial batch: ten ideas, unique ids, no scripts.
    generator.reply(idea_batch("Idea", 10));
    let first = strategy::generate_ideas(&mut state).await.unwrap();
    assert_eq!(first.len(), 10);
    let mut ids: Vec<&str> = first.iter().map(|i| i.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert!(first.iter().all(|i| i.script.is_none()));
    assert!(generator.last_request().0[1].content.contains("generate 10 video ideas"));

    // Follow-up batch: five more appended after the first ten.
    generator.reply(idea_batch("More", 5));
    let all = strategy::generate_ideas(&mut state).await.unwrap();
    assert_eq!(all.len(), 15);
    assert_eq!(&all[..10], &first[..]);
    assert_eq!(all[10].title, "More 1");
    let prompt = generator.last_request().0[1].content.clone();
    assert!(prompt.contains("5 ADDITIONAL"));
    assert!(prompt.contains("- Idea 1"));

    // Script the first idea, then rewrite it.
    let target = all[0].id.clone();
    strategy::select_idea(&mut state, &target).unwrap();
    assert_eq!(state.nav.stage, Stage::Scriptwriter);

    generator.reply("HOOK: Nadie te cuenta esto...");
    let idea = scripts::write_script(&mut state).await.unwrap();
    assert_eq!(idea.script.as_deref(), Some("HOOK: Nadie te cuenta esto..."));
    let (messages, format) = generator.last_request();
    assert_eq!(format, ResponseFormat::Text);
    assert!(messages[1].content.contains(r#""name":"Ana""#));
    assert!(messages[1].content.contains(r#""title":"Idea 1""#));

    generator.reply("HOOK: Versión dos");
    let idea = scripts::write_script(&mut state).await.unwrap();
    assert_eq!(idea.script.as_deref(), Some("HOOK: Versión dos"));

    let topics = strategy::list_topics(&state).unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].ideas, 15);
    assert_eq!(topics[0].scripted, 1);
}

#[tokio::test]
async fn rejected_batch_leaves_topic_unchanged() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;

    generator.reply(r#"{"ideas": [{"title": "A", "pillar": "EDUCATION"}, {"title": "B", "pillar": "OTHER"}]}"#);
    assert!(strategy::generate_ideas(&mut state).await.is_err());
    generator.fail("timeout");
    assert!(strategy::generate_ideas(&mut state).await.is_err());

    assert!(strategy::list_ideas(&state).unwrap().is_empty());
}

#[tokio::test]
async fn short_batch_is_accepted() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    generator.reply(idea_batch("Idea", 7));
    assert_eq!(strategy::generate_ideas(&mut state).await.unwrap().len(), 7);
}

#[test]
fn manual_ideas_need_no_network() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();
    strategy::create_topic(&mut state, "Lanzamiento").unwrap();

    let idea = strategy::add_idea(&mut state, "Mi primer kart", None, None).unwrap();
    assert_eq!(idea.pillar, Pillar::Other);
    assert_eq!(idea.visual_hook, NOT_APPLICABLE_HOOK);

    let idea = strategy::add_idea(&mut state, "Ranking de cascos", Some("controversy"), Some("Casco a casco")).unwrap();
    assert_eq!(idea.pillar, Pillar::Controversy);

    assert!(strategy::add_idea(&mut state, "  ", None, None).is_err());
    assert!(strategy::add_idea(&mut state, "X", Some("astrology"), None).is_err());
    assert_eq!(strategy::list_ideas(&state).unwrap().len(), 2);
    assert_eq!(generator.calls(), 0);
}

// ── Scripts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_script_leaves_previous_text() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    let idea = strategy::add_idea(&mut state, "Mi primer kart", Some("lifestyle"), None).unwrap();
    strategy::select_idea(&mut state, &idea.id).unwrap();

    generator.reply("Primera versión");
    scripts::write_script(&mut state).await.unwrap();
    generator.fail("500");
    assert!(scripts::write_script(&mut state).await.is_err());

    let ideas = strategy::list_ideas(&state).unwrap();
    assert_eq!(ideas[0].script.as_deref(), Some("Primera versión"));
}

#[tokio::test]
async fn script_needs_a_selected_idea() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    let calls = generator.calls();
    assert!(scripts::write_script(&mut state).await.is_err());
    assert_eq!(generator.calls(), calls);
}

#[tokio::test]
async fn script_requires_dna_without_calling_the_service() {
    let generator = ScriptedGenerator::new();
    let mut state = session(&generator);
    profiles::create_profile(&mut state, "Ana").unwrap();
    strategy::create_topic(&mut state, "Lanzamiento").unwrap();
    let idea = strategy::add_idea(&mut state, "Mi primer kart", None, None).unwrap();
    strategy::select_idea(&mut state, &idea.id).unwrap();

    let err = scripts::write_script(&mut state).await.unwrap_err();
    assert!(err.contains("Insufficient data"));
    assert_eq!(generator.calls(), 0);
    let ideas = strategy::list_ideas(&state).unwrap();
    assert!(ideas[0].script.is_none());
}

#[tokio::test]
async fn custom_template_is_used() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    let idea = strategy::add_idea(&mut state, "Mi primer kart", None, None).unwrap();
    strategy::select_idea(&mut state, &idea.id).unwrap();

    assert!(scripts::set_template(&mut state, "   ").is_err());
    scripts::set_template(&mut state, "PERFIL={profile_str} IDEA={idea_str}").unwrap();
    generator.reply("ok");
    scripts::write_script(&mut state).await.unwrap();
    let prompt = generator.last_request().0[1].content.clone();
    assert!(prompt.starts_with("PERFIL={"));
    assert!(prompt.contains(r#"IDEA={"title":"Mi primer kart","pillar":"OTHER""#));

    scripts::reset_template(&mut state);
    assert!(scripts::show_template(&state).contains("{profile_str}"));
}

// ── Snapshots ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn export_import_round_trip() {
    let generator = ScriptedGenerator::new();
    let mut state = profiled_session(&generator).await;
    generator.reply(idea_batch("Idea", 10));
    strategy::generate_ideas(&mut state).await.unwrap();

    let dir = std::env::temp_dir().join(format!("brandfactory-snap-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ana.json");

    let exported = snapshot::export_snapshot(&state, &path).unwrap();
    assert_eq!(exported.profiles, 1);
    assert_eq!(exported.ideas, 10);
    assert_eq!(snapshot::check_snapshot(&path).unwrap(), exported);

    let mut fresh = session(&generator);
    let imported = snapshot::import_snapshot(&mut fresh, &path).unwrap();
    assert_eq!(imported, exported);
    assert_eq!(fresh.store, state.store);
    assert!(fresh.nav.topic_id().is_none());

    std::fs::write(&path, "{\"profiles\": {}}").unwrap();
    assert!(snapshot::import_snapshot(&mut fresh, &path).is_err());
    assert_eq!(fresh.store, state.store);
    let _ = std::fs::remove_dir_all(&dir);
}
