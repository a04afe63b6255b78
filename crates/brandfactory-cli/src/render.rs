// Brand Factory CLI — terminal output.

use brandfactory_core::navigation::current_profile;
use brandfactory_core::{BrandDna, ChatRole, ChatTurn, Idea, SnapshotSummary, Stage};
use brandfactory_lib::commands::interview::QuestionBank;
use brandfactory_lib::commands::{profiles::ProfileSummary, strategy::TopicSummary};
use brandfactory_lib::FactoryState;

pub fn print_banner() {
    println!("Brand Factory. Type /help for commands, /quit to leave.");
    println!("Start with /profile new <name>, then just talk.");
}

pub fn print_help() {
    println!(
        r#"Profiler
  <text>                          interview turn
  /profile new <name>             create and select a profile
  /profile use <id>               switch profile
  /profiles                       list profiles
  /audio <file>                   send a voice note (mp3, wav, m4a, webm, ogg)
  /history                        show the interview so far
  /extract                        extract the brand DNA
  /dna                            show the current DNA
  /questions [on|off]             list questions, or switch custom ones on/off
  /question add <text>            add a custom question
  /question rm <n>                remove custom question n
Strategist
  /topic new <name>               create and select a topic
  /topic use <id>                 select a topic
  /topics                         list topics
  /ideas                          generate ideas (10 first, then 5 more)
  /ideas list                     list ideas of the selected topic
  /idea add <title> [| pillar [| hook]]
  /idea use <id>                  select an idea
Scriptwriter
  /script                         write or rewrite the selected idea's script
  /template show|load <file>|reset
Session
  /stage [profiler|strategist|scriptwriter]
  /export [file]    /import <file>    /quit"#
    );
}

/// `profiler:Ana> ` style prompt.
pub fn prompt(state: &FactoryState) -> String {
    match current_profile(&state.store) {
        Ok(profile) => format!("{}:{}> ", state.nav.stage, profile.display_name()),
        Err(_) => format!("{}> ", state.nav.stage),
    }
}

pub fn print_status(state: &FactoryState) {
    println!("Stage: {}", state.nav.stage);
    let Ok(profile) = current_profile(&state.store) else {
        println!("No profile selected.");
        return;
    };
    println!("Profile: {} ({}) [{}]", profile.display_name(), profile.id, profile.stage());
    if state.nav.stage == Stage::Profiler {
        return;
    }
    match state.nav.resolve_topic(&state.store) {
        Ok((_, topic)) => println!("Topic: {} ({}), {} idea(s)", topic.name, topic.id, topic.ideas.len()),
        Err(_) => println!("No topic selected."),
    }
    if state.nav.stage == Stage::Scriptwriter {
        match state.nav.resolve_idea(&state.store) {
            Ok((_, _, idea)) => println!("Idea: {}", idea.label()),
            Err(_) => println!("No idea selected."),
        }
    }
}

pub fn print_reply(reply: &str) {
    println!("\n{}\n", reply);
}

pub fn print_history(history: &[ChatTurn]) {
    for turn in history {
        let who = match turn.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "strategist",
        };
        println!("[{}] {}", who, turn.content);
    }
}

pub fn print_profiles(profiles: &[ProfileSummary]) {
    if profiles.is_empty() {
        println!("No profiles yet.");
    }
    for p in profiles {
        println!(
            "{} {} ({}) [{}] turns={} topics={}",
            if p.current { "*" } else { " " },
            p.display_name,
            p.id,
            p.stage,
            p.turns,
            p.topics
        );
    }
}

pub fn print_dna(dna: &BrandDna) {
    println!("Name:       {}", dna.name);
    println!("Archetype:  {}", dna.archetype);
    println!("Tone:       {}", dna.tone);
    println!("Jargon:     {}", dna.technical_jargon.join(", "));
    println!("Opinions:   {}", dna.controversial_opinions.join("; "));
    println!("Passions:   {}", dna.passion_topics.join(", "));
}

pub fn print_questions(bank: &QuestionBank) {
    for q in &bank.mandatory {
        println!("  - {}", q);
    }
    if bank.custom.is_empty() {
        println!("No custom questions.");
        return;
    }
    println!("Custom ({}):", if bank.custom_enabled { "on" } else { "off" });
    for (i, q) in bank.custom.iter().enumerate() {
        println!("{:>3}. {}", i + 1, q);
    }
}

pub fn print_topics(topics: &[TopicSummary]) {
    if topics.is_empty() {
        println!("No topics yet.");
    }
    for t in topics {
        println!(
            "{} {} ({}) ideas={} scripted={}",
            if t.selected { "*" } else { " " },
            t.name,
            t.id,
            t.ideas,
            t.scripted
        );
    }
}

pub fn print_ideas(ideas: &[Idea]) {
    if ideas.is_empty() {
        println!("No ideas yet.");
    }
    for (i, idea) in ideas.iter().enumerate() {
        println!(
            "{:>2}. {}{}  ({})",
            i + 1,
            idea.label(),
            if idea.is_scripted() { " [scripted]" } else { "" },
            idea.id
        );
        println!("    hook: {}", idea.visual_hook);
    }
}

pub fn print_idea(idea: &Idea) {
    println!("{} ({})", idea.label(), idea.id);
    println!("hook: {}", idea.visual_hook);
    match &idea.script {
        Some(script) => println!("\n{}\n", script),
        None => println!("(no script yet; /script to write one)"),
    }
}

pub fn print_summary(summary: &SnapshotSummary) {
    println!(
        "profiles={} profiled={} topics={} ideas={} scripted={}",
        summary.profiles, summary.profiled, summary.topics, summary.ideas, summary.scripted
    );
}
