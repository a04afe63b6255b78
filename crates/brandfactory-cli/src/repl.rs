// Brand Factory CLI — interactive session.
// Plain lines are interview turns; slash commands drive everything else.
// No error ends the session: failures are printed and the loop continues.

use std::path::PathBuf;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use brandfactory_core::Stage;
use brandfactory_lib::commands::{interview, profiles, scripts, snapshot, strategy};
use brandfactory_lib::FactoryState;

use crate::render;

// ── Command parsing ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Say(String),
    Help,
    Stage(Option<Stage>),
    ProfileNew(String),
    ProfileUse(String),
    Profiles,
    Audio(PathBuf),
    Extract,
    Dna,
    History,
    TopicNew(String),
    TopicUse(String),
    Topics,
    Ideas,
    IdeaList,
    IdeaAdd { title: String, pillar: Option<String>, hook: Option<String> },
    IdeaUse(String),
    Script,
    TemplateShow,
    TemplateLoad(PathBuf),
    TemplateReset,
    Questions,
    QuestionsToggle(bool),
    QuestionAdd(String),
    QuestionRemove(usize),
    Export(Option<PathBuf>),
    Import(PathBuf),
    Quit,
    Empty,
    Unknown(String),
}

/// `title | pillar | hook`, with the last two optional.
fn parse_idea_fields(rest: &str) -> ReplCommand {
    let mut parts = rest.splitn(3, '|').map(|p| p.trim().to_string());
    let title = parts.next().unwrap_or_default();
    let pillar = parts.next().filter(|p| !p.is_empty());
    let hook = parts.next().filter(|h| !h.is_empty());
    ReplCommand::IdeaAdd { title, pillar, hook }
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Say(line.to_string());
    };

    let (head, rest) = match command.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (command, ""),
    };
    let (sub, arg) = match rest.split_once(char::is_whitespace) {
        Some((sub, arg)) => (sub, arg.trim()),
        None => (rest, ""),
    };

    match (head, sub) {
        ("help" | "h" | "?", _) => ReplCommand::Help,
        ("stage", "") => ReplCommand::Stage(None),
        ("stage", s) => match s.parse() {
            Ok(stage) => ReplCommand::Stage(Some(stage)),
            Err(_) => ReplCommand::Unknown(line.to_string()),
        },
        ("profile", "new") => ReplCommand::ProfileNew(arg.to_string()),
        ("profile", "use") => ReplCommand::ProfileUse(arg.to_string()),
        ("profiles", _) => ReplCommand::Profiles,
        ("audio", _) if !rest.is_empty() => ReplCommand::Audio(PathBuf::from(rest)),
        ("extract", _) => ReplCommand::Extract,
        ("dna", _) => ReplCommand::Dna,
        ("history", _) => ReplCommand::History,
        ("topic", "new") => ReplCommand::TopicNew(arg.to_string()),
        ("topic", "use") => ReplCommand::TopicUse(arg.to_string()),
        ("topics", _) => ReplCommand::Topics,
        ("ideas", "") => ReplCommand::Ideas,
        ("ideas", "list") => ReplCommand::IdeaList,
        ("idea", "add") => parse_idea_fields(arg),
        ("idea", "use") => ReplCommand::IdeaUse(arg.to_string()),
        ("script", _) => ReplCommand::Script,
        ("template", "show" | "") => ReplCommand::TemplateShow,
        ("template", "load") if !arg.is_empty() => ReplCommand::TemplateLoad(PathBuf::from(arg)),
        ("template", "reset") => ReplCommand::TemplateReset,
        ("questions", "") => ReplCommand::Questions,
        ("questions", "on") => ReplCommand::QuestionsToggle(true),
        ("questions", "off") => ReplCommand::QuestionsToggle(false),
        ("question", "add") => ReplCommand::QuestionAdd(arg.to_string()),
        ("question", "rm") => match arg.parse() {
            Ok(n) => ReplCommand::QuestionRemove(n),
            Err(_) => ReplCommand::Unknown(line.to_string()),
        },
        ("export", _) => ReplCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        ("import", _) if !rest.is_empty() => ReplCommand::Import(PathBuf::from(rest)),
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "brandfactory-{}.json",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

// ── Dispatch ───────────────────────────────────────────────────────────────

async fn dispatch(state: &mut FactoryState, command: ReplCommand) -> Result<bool, String> {
    match command {
        ReplCommand::Empty => {}
        ReplCommand::Quit => return Ok(false),
        ReplCommand::Help => render::print_help(),
        ReplCommand::Unknown(line) => println!("Unknown command: {} (try /help)", line),
        ReplCommand::Stage(None) => render::print_status(state),
        ReplCommand::Stage(Some(stage)) => {
            profiles::set_stage(state, stage);
            render::print_status(state);
        }

        // Profiler
        ReplCommand::ProfileNew(name) => {
            let summary = profiles::create_profile(state, &name)?;
            println!("Created profile {} ({})", summary.name, summary.id);
            render::print_history(&interview::history(state)?);
        }
        ReplCommand::ProfileUse(id) => {
            let summary = profiles::select_profile(state, &id)?;
            println!("Now working on {} [{}]", summary.display_name, summary.stage);
        }
        ReplCommand::Profiles => render::print_profiles(&profiles::list_profiles(state)),
        ReplCommand::Say(text) => {
            let reply = interview::send_message(state, &text).await?;
            render::print_reply(&reply);
        }
        ReplCommand::Audio(path) => {
            let turn = interview::send_audio(state, &path).await?;
            println!("(heard) {}", turn.transcript);
            render::print_reply(&turn.reply);
        }
        ReplCommand::Extract => {
            let dna = interview::extract_profile(state).await?;
            render::print_dna(&dna);
        }
        ReplCommand::Dna => render::print_dna(&profiles::current_dna(state)?),
        ReplCommand::History => render::print_history(&interview::history(state)?),
        ReplCommand::Questions => render::print_questions(&interview::question_bank(state)),
        ReplCommand::QuestionsToggle(on) => {
            render::print_questions(&interview::set_custom_questions(state, on))
        }
        ReplCommand::QuestionAdd(text) => {
            render::print_questions(&interview::add_question(state, &text)?)
        }
        ReplCommand::QuestionRemove(n) => {
            render::print_questions(&interview::remove_question(state, n)?)
        }

        // Strategist
        ReplCommand::TopicNew(name) => {
            let topic = strategy::create_topic(state, &name)?;
            println!("Created topic {} ({})", topic.name, topic.id);
        }
        ReplCommand::TopicUse(id) => {
            let topic = strategy::select_topic(state, &id)?;
            println!("Topic {}: {} idea(s)", topic.name, topic.ideas);
        }
        ReplCommand::Topics => render::print_topics(&strategy::list_topics(state)?),
        ReplCommand::Ideas => {
            println!("Generating ideas...");
            render::print_ideas(&strategy::generate_ideas(state).await?);
        }
        ReplCommand::IdeaList => render::print_ideas(&strategy::list_ideas(state)?),
        ReplCommand::IdeaAdd { title, pillar, hook } => {
            let idea = strategy::add_idea(state, &title, pillar.as_deref(), hook.as_deref())?;
            println!("Added {} ({})", idea.label(), idea.id);
        }
        ReplCommand::IdeaUse(id) => {
            let idea = strategy::select_idea(state, &id)?;
            render::print_idea(&idea);
        }

        // Scriptwriter
        ReplCommand::Script => {
            println!("Writing script...");
            render::print_idea(&scripts::write_script(state).await?);
        }
        ReplCommand::TemplateShow => println!("{}", scripts::show_template(state)),
        ReplCommand::TemplateLoad(path) => {
            scripts::load_template(state, &path)?;
            println!("Template loaded from {}", path.display());
        }
        ReplCommand::TemplateReset => {
            scripts::reset_template(state);
            println!("Template reset to the default formula");
        }

        // Snapshots
        ReplCommand::Export(path) => {
            let path = path.unwrap_or_else(default_export_path);
            let summary = snapshot::export_snapshot(state, &path)?;
            println!("Exported to {}", path.display());
            render::print_summary(&summary);
        }
        ReplCommand::Import(path) => {
            let summary = snapshot::import_snapshot(state, &path)?;
            println!("Imported {}", path.display());
            render::print_summary(&summary);
        }
    }
    Ok(true)
}

// ── Loop ───────────────────────────────────────────────────────────────────

pub async fn run(state: &mut FactoryState) -> Result<(), String> {
    render::print_banner();
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let prompt = render::prompt(state);
        stdout.write_all(prompt.as_bytes()).await.map_err(|e| e.to_string())?;
        stdout.flush().await.map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            println!();
            break;
        };
        match dispatch(state, parse_line(&line)).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("! {}", e),
        }
    }
    Ok(())
}
