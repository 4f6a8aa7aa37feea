//! Interactive terminal chat session.
//!
//! Drives a [`ChatSession`] through the submission gateway from the
//! command line: async readline input, a spinner while a submission is
//! pending, and markdown rendering of assistant replies. The transcript
//! lives only for the duration of the process.

use std::time::Duration;

use console::style;
use rustyline_async::{Readline, ReadlineEvent};
use termimad::MadSkin;

use parley_core::chat::session::ChatSession;

use crate::state::AppState;

/// Opening assistant message shown before the first user turn.
const GREETING: &str = "Hi there! How can I help?";

/// Run the interactive chat loop until Ctrl+D.
pub async fn run_chat_loop(
    state: &AppState,
    model_override: Option<String>,
    system_override: Option<String>,
) -> anyhow::Result<()> {
    let model = model_override.unwrap_or_else(|| state.config.default_model.clone());
    let system_instruction =
        system_override.unwrap_or_else(|| state.config.system_instruction.clone());

    let skin = MadSkin::default_dark();

    let mut session = ChatSession::new();
    session.seed_greeting(GREETING);

    println!();
    println!(
        "  {} {} {}",
        style("parley").cyan().bold(),
        style("/").dim(),
        style(&model).dim()
    );
    println!("  {}", style("Press Ctrl+D to end the session.").dim());
    println!();
    println!("  {}", skin.term_text(GREETING).to_string().trim());
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut rl, _writer) =
        Readline::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let text = line.trim().to_string();
                if text.is_empty() {
                    continue;
                }

                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .expect("static spinner template"),
                );
                spinner.set_message("thinking...");
                spinner.enable_steady_tick(Duration::from_millis(80));

                // One turn at a time; the session enforces this even if a
                // caller tried to interleave.
                let result = state
                    .gateway
                    .take_turn(&mut session, &text, &model, &system_instruction)
                    .await;
                spinner.finish_and_clear();

                if let Err(e) = result {
                    eprintln!("  {} {e}", style("!").yellow().bold());
                    continue;
                }

                if let Some(reply) = session.transcript().last() {
                    println!();
                    println!(
                        "  {}",
                        skin.term_text(&reply.content).to_string().trim()
                    );
                    println!();
                }
            }
            Ok(ReadlineEvent::Eof) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            Ok(ReadlineEvent::Interrupted) => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            Err(_) => break,
        }
    }

    Ok(())
}
