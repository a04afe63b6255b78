// Brand Factory Engine — Prompt Templates
// System and user prompts for the interview, DNA extraction and idea
// generation calls. Script prompts come from the operator-editable template
// (see engine/scripts.rs).

use brandfactory_core::Pillar;

/// Persona archetypes the interviewer tries to fit the talent into.
pub const ARCHETYPES: [(&str, &str); 3] = [
    (
        "The Technician / Analyst",
        "Hard data, mechanics, sim-racing, real costs.",
    ),
    (
        "The Insider / Adventurer",
        "Behind the scenes, logistics, exclusive experiences, a female lens on male-dominated niches.",
    ),
    (
        "The Gen Z / Lifestyle",
        "Aspirational, challenges, humour, pop culture, karts, fast vlogs.",
    ),
];

pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an assistant specialised in extracting structured data as JSON.";

pub const IDEAS_SYSTEM_PROMPT: &str =
    "You are an expert in viral short-form marketing. Always answer with JSON.";

pub const SCRIPT_SYSTEM_PROMPT: &str = "You are an expert scriptwriter.";

/// System instruction for one interview turn.
pub fn build_interview_prompt(questions: &[String]) -> String {
    let archetypes = ARCHETYPES
        .iter()
        .enumerate()
        .map(|(i, (name, traits))| format!("{}. {}: {}", i + 1, name, traits))
        .collect::<Vec<_>>()
        .join("\n");
    let questions = questions
        .iter()
        .map(|q| format!("- {}", q))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are the Lead Strategist at the agency 'Brand People'. Your mission is to build the profile of a new talent through a conversational interview.

KNOWLEDGE BASE (SUCCESSFUL ARCHETYPES):
{}

YOUR TASK:
Interview the user to fit them into one of these archetypes or to create a new one.

YOU MUST COVER THESE KEY QUESTIONS (one at a time, never all together):
{}

FINAL GOAL: Do not generate the profile yet. Only interview, step by step."#,
        archetypes, questions
    )
}

/// User prompt asking for the six DNA fields from a flattened transcript.
pub fn build_extraction_prompt(transcript: &str) -> String {
    format!(
        r#"Analyse the following interview and extract the talent's profile.
Conversation:
{}

Return ONLY a valid JSON object with exactly these keys:
"name", "archetype", "tone", "technical_jargon", "controversial_opinions", "passion_topics".
"technical_jargon", "controversial_opinions" and "passion_topics" are lists of strings."#,
        transcript
    )
}

fn pillar_list() -> String {
    Pillar::GENERATED
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}: {}", i + 1, p.as_str(), p.brief()))
        .collect::<Vec<_>>()
        .join("\n")
}

const IDEA_SHAPE: &str = r#"Expected output: a JSON object with key "ideas" holding a list of objects {"title", "pillar", "visual_hook"}. "pillar" must be one of the pillar names above."#;

/// First batch for an empty topic.
pub fn build_initial_ideas_prompt(profile_json: &str, topic: &str, count: usize) -> String {
    format!(
        r#"Act as Creative Director at Brand People. Using the JSON profile, generate {} video ideas for the topic "{}", based STRICTLY on the agency's 5 pillars:
{}

Profile: {}

{}"#,
        count,
        topic,
        pillar_list(),
        profile_json,
        IDEA_SHAPE
    )
}

/// Follow-up batch; lists existing titles so the model avoids repeats.
pub fn build_more_ideas_prompt(
    profile_json: &str,
    topic: &str,
    existing_titles: &[&str],
    count: usize,
) -> String {
    let existing = existing_titles
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"Generate {} ADDITIONAL video ideas for this profile and the topic "{}", using the same 5 pillars:
{}

Do not repeat these existing ideas:
{}

Profile: {}

{}"#,
        count,
        topic,
        pillar_list(),
        existing,
        profile_json,
        IDEA_SHAPE
    )
}
