// ── Brand Factory Atoms: Constants ─────────────────────────────────────────
// Named constants shared by the engine and the command layer.

// ── Interview ──────────────────────────────────────────────────────────────
// Discovery questions every interview must cover, in order. Operator-defined
// custom questions are appended after these.
pub const MANDATORY_QUESTIONS: [&str; 4] = [
    "Their specific niche",
    "Their jargon (technical words that prove authority)",
    "Their 'enemies' (controversial opinions or myths they hate)",
    "Their personal anecdotes",
];

// ── Extraction ─────────────────────────────────────────────────────────────
// Opening line + at least one user/assistant exchange.
pub const MIN_EXTRACTION_TURNS: usize = 3;

// ── Idea generation ────────────────────────────────────────────────────────
pub const INITIAL_IDEA_COUNT: usize = 10;
pub const MORE_IDEA_COUNT: usize = 5;

// ── Script writing ─────────────────────────────────────────────────────────
// Literal substitution points in the operator-editable script template.
pub const PROFILE_PLACEHOLDER: &str = "{profile_str}";
pub const IDEA_PLACEHOLDER: &str = "{idea_str}";

pub const DEFAULT_SCRIPT_TEMPLATE: &str = "You are the Senior Scriptwriter at Brand People. \
Write the script for the selected idea.

THE SCRIPT FORMULA (DO NOT DEVIATE):
1. THE HOOK (0-3 sec): No greetings. Open with a controversial claim, a list or a challenge.
2. THE BODY (4-50 sec): High speed. Short sentences. Technical jargon explained fast.
3. THE CTA (end): A specific call to action.

Profile: {profile_str}
Idea: {idea_str}

Format: plain text, double line breaks.";

// ── Provider defaults ──────────────────────────────────────────────────────
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
