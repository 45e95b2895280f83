//! Interactive chat loop.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use argubot_domain::{Agent, Dialogue};
use argubot_llm::GenerationMetrics;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// One conversation between a human and a bot.
///
/// A human line only joins the transcript together with the bot's reply,
/// so a failed turn leaves the transcript as it was and can be retried.
#[derive(Debug)]
pub struct ChatSession<A> {
    bot: A,
    human: String,
    dialogue: Dialogue,
}

impl<A> ChatSession<A>
where
    A: Agent,
    A::Error: Display,
{
    /// Start an empty conversation.
    pub fn new(bot: A, human: impl Into<String>) -> Self {
        Self {
            bot,
            human: human.into(),
            dialogue: Dialogue::new(),
        }
    }

    /// The transcript so far.
    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    /// The bot's name.
    pub fn bot_name(&self) -> &str {
        self.bot.name()
    }

    /// The human's name.
    pub fn human_name(&self) -> &str {
        &self.human
    }

    /// Forget the transcript.
    pub fn reset(&mut self) {
        self.dialogue = Dialogue::new();
    }

    /// Let the bot speak without a new human line.
    pub async fn open(&mut self) -> std::result::Result<String, A::Error> {
        let reply = self.bot.respond(&self.dialogue).await?;
        self.dialogue = self.dialogue.add(self.bot.name(), reply.as_str());
        Ok(reply)
    }

    /// Add a human line and get the bot's answer.
    pub async fn say(&mut self, line: &str) -> std::result::Result<String, A::Error> {
        let candidate = self.dialogue.add(self.human.as_str(), line);
        let reply = self.bot.respond(&candidate).await?;
        self.dialogue = candidate.with_turn(self.bot.name(), reply.as_str());
        Ok(reply)
    }
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// Leave the session
    Exit,
    /// Show commands
    Help,
    /// Start a new transcript
    Reset,
    /// Show generation counters
    Stats,
    /// Print the transcript
    Transcript,
    /// A line for the bot
    Say(String),
    /// A slash command that does not exist
    Unknown(String),
}

/// Parse a REPL line. Blank lines yield `None`.
pub fn parse_input(line: &str) -> Option<ReplInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let input = match line {
        "exit" | "quit" | "/exit" | "/quit" | "/q" => ReplInput::Exit,
        "/help" | "/?" => ReplInput::Help,
        "/reset" => ReplInput::Reset,
        "/stats" => ReplInput::Stats,
        "/transcript" => ReplInput::Transcript,
        command if command.starts_with('/') => ReplInput::Unknown(command.to_string()),
        text => ReplInput::Say(text.to_string()),
    };
    Some(input)
}

/// Run the interactive chat loop.
pub async fn run_chat<A>(
    mut session: ChatSession<A>,
    metrics: Arc<GenerationMetrics>,
    bot_first: bool,
    formatter: &Formatter,
) -> Result<()>
where
    A: Agent,
    A::Error: Display,
{
    println!(
        "{}",
        formatter.info(&format!(
            "Chatting with {} - type '/help' for commands, 'exit' to quit",
            session.bot_name()
        ))
    );
    println!();

    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Readline(format!("Failed to initialize editor: {}", e)))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    if bot_first {
        match session.open().await {
            Ok(reply) => println!("{}", formatter.bot_turn(session.bot_name(), &reply)),
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        }
    }

    let prompt = format!("{}> ", session.human_name());
    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let Some(input) = parse_input(&line) else {
                    continue;
                };
                editor.add_history_entry(line.trim()).ok();

                match input {
                    ReplInput::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplInput::Help => print_help(formatter),
                    ReplInput::Reset => {
                        session.reset();
                        println!("{}", formatter.success("Started a new conversation"));
                    }
                    ReplInput::Stats => println!("{}", formatter.metrics(&metrics.snapshot())),
                    ReplInput::Transcript => {
                        println!("{}", formatter.transcript(session.dialogue().turns()))
                    }
                    ReplInput::Unknown(command) => eprintln!(
                        "{}",
                        formatter.error(&format!(
                            "Unknown command: {}. Type '/help' for available commands.",
                            command
                        ))
                    ),
                    ReplInput::Say(text) => match session.say(&text).await {
                        Ok(reply) => println!("{}", formatter.bot_turn(session.bot_name(), &reply)),
                        Err(e) => {
                            eprintln!("{}", formatter.error(&e.to_string()));
                            eprintln!(
                                "{}",
                                formatter.warning("That line was not added; send it again to retry")
                            );
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    debug!("Session ended after {} turn(s)", session.dialogue().len());

    let snapshot = metrics.snapshot();
    if snapshot.calls > 0 {
        println!("{}", formatter.metrics(&snapshot));
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let argubot_dir = home.join(".argubot");
    std::fs::create_dir_all(&argubot_dir)?;
    Ok(argubot_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <text>          - Say something to the bot");
    println!("  /transcript     - Show the conversation so far");
    println!("  /reset          - Start a new conversation");
    println!("  /stats          - Show generation call counters");
    println!("  /help, /?       - Show this help");
    println!("  exit, quit, /q  - Leave the chat");
    println!();
}
