//! Command parsing for text hosts of the dashboard

use crate::error::{DashboardError, Result};
use crate::model::AnalysisKind;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search a ticker; bare input is treated as a search
    Search { ticker: String },
    /// Request one kind of analysis for the loaded ticker
    Analysis { kind: AnalysisKind },
    /// Redraw the dashboard
    Show,
    /// Show help
    Help,
    /// Leave the dashboard
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(DashboardError::Command("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            let mut words = input.split_whitespace();
            return match (words.next(), words.next()) {
                (Some(ticker), None) => Ok(Command::Search {
                    ticker: ticker.to_string(),
                }),
                _ => Err(DashboardError::Command(format!(
                    "Expected a ticker or a /command, got '{input}'"
                ))),
            };
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            return Err(DashboardError::Command("Empty command".to_string()));
        };
        let cmd = cmd.to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "search" | "s" | "ticker" => {
                let ticker = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing ticker for search command".to_string())
                })?;
                Ok(Command::Search {
                    ticker: (*ticker).to_string(),
                })
            }
            "analyze" | "a" => Ok(Command::Analysis {
                kind: AnalysisKind::Analyze,
            }),
            "predict" | "p" => Ok(Command::Analysis {
                kind: AnalysisKind::Predict,
            }),
            "risk" | "r" => Ok(Command::Analysis {
                kind: AnalysisKind::Risk,
            }),
            "show" | "refresh" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(DashboardError::Command(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Stock Dashboard Commands
========================

  <ticker>            Search a ticker (same as /search)
  /search <ticker>    Fetch company info and quarterly data
  /analyze            Financial analysis of the loaded ticker
  /predict            Next quarter prediction
  /risk               Risk assessment
  /show               Redraw the dashboard
  /help               Show help
  /exit               Exit

Aliases:
  /s = /search   /a = /analyze   /p = /predict   /r = /risk   /q = /exit
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Search { .. } => "Ticker search",
            Command::Analysis { kind } => kind.label(),
            Command::Show => "Redraw the dashboard",
            Command::Help => "Show help",
            Command::Exit => "Exit the dashboard",
        }
    }
}
