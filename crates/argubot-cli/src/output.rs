//! Output formatting for the CLI.

use crate::error::Result;
use argubot_domain::{Claim, Polarity, Turn};
use argubot_llm::MetricsSnapshot;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format one bot utterance.
    pub fn bot_turn(&self, name: &str, text: &str) -> String {
        format!("{}: {}", self.colorize(name, "magenta"), self.colorize(text, "cyan"))
    }

    /// Format a transcript, one turn per line.
    pub fn transcript(&self, turns: &[Turn]) -> String {
        if turns.is_empty() {
            return self.colorize("(empty transcript)", "yellow");
        }
        turns
            .iter()
            .map(|t| format!("{}: {}", self.colorize(&t.speaker, "magenta"), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format ranked claims as a table.
    pub fn claims_table(&self, claims: &[&Claim]) -> String {
        if claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "Key", "Claim", "Pro", "Con"]);

        for (rank, claim) in claims.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                claim.key.clone(),
                claim.text.clone(),
                claim.supports.len().to_string(),
                claim.opposes.len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format ranked claims as JSON.
    pub fn claims_json(&self, claims: &[&Claim]) -> Result<String> {
        let json_claims: Vec<serde_json::Value> = claims
            .iter()
            .map(|c| {
                serde_json::json!({
                    "key": c.key,
                    "text": c.text,
                    "supports": c.supports.len(),
                    "opposes": c.opposes.len(),
                    "source": c.location.to_string(),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_claims)?)
    }

    /// Format a root-to-leaf chain, indenting each step under its parent.
    pub fn chain(&self, chain: &[&Claim]) -> String {
        chain
            .iter()
            .enumerate()
            .map(|(depth, claim)| {
                let marker = match claim.polarity {
                    Some(polarity) => {
                        let color = match polarity {
                            Polarity::Supports => "green",
                            Polarity::Opposes => "red",
                        };
                        format!("{} ", self.colorize(&format!("{}:", polarity), color))
                    }
                    None => String::new(),
                };
                format!("{}{}{}", "  ".repeat(depth), marker, claim.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format generation counters.
    pub fn metrics(&self, snapshot: &MetricsSnapshot) -> String {
        self.info(&format!(
            "{} generation call(s), {} failed ({:.0}%), mean latency {:.0} ms, {} chars sent, {} received",
            snapshot.calls,
            snapshot.failures,
            snapshot.error_rate() * 100.0,
            snapshot.mean_latency_ms(),
            snapshot.prompt_chars,
            snapshot.response_chars,
        ))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().bold().to_string(),
            _ => text.to_string(),
        }
    }
}
