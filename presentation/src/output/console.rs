//! Console output formatter for trial proceedings

use colored::Colorize;
use courtroom_application::{ObjectionExchange, ProsecutionTurn, TrialOutcome, TrialSettings};
use courtroom_domain::core::string::excerpt;
use courtroom_domain::{Criterion, PerformanceReport, ScoreEntry, Transcript, TrialStatus};
use std::collections::BTreeMap;
use std::path::Path;

const RULE_WIDTH: usize = 80;
const STATEMENT_EXCERPT_CHARS: usize = 60;
const EVIDENCE_EXCERPT_CHARS: usize = 50;

/// Formats trial output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn banner() -> String {
        let line = "=".repeat(RULE_WIDTH);
        format!(
            "{}\n{:^width$}\n{}\n\nWelcome to the courtroom simulator.\nType 'help' for available commands or 'exit' to quit\n",
            line.cyan(),
            "COURTROOM SIMULATOR".bold(),
            line.cyan(),
            width = RULE_WIDTH
        )
    }

    pub fn help() -> String {
        let commands = [
            ("help", "Show this help message"),
            ("exit", "Exit the application"),
            ("clear", "Clear the screen"),
            ("start", "Start a new trial"),
            ("status", "Show current trial status"),
            ("defense", "Enter defense statement"),
            ("continue", "Continue to next round"),
            ("end", "End current trial"),
            ("settings", "Show current settings"),
            ("list witnesses", "List available witnesses"),
            ("call <name>", "Call a witness to the stand"),
            ("examine <q>", "Ask the current witness a question (direct)"),
            ("cross <q>", "Ask the current witness a question (cross-exam)"),
            ("list evidence", "List available evidence"),
            ("present <id>", "Present a piece of evidence"),
        ];

        let mut output = format!("\n{}\n", "Available Commands:".cyan().bold());
        for (command, description) in commands {
            output.push_str(&format!("  {:<16} - {}\n", command, description));
        }
        output
    }

    pub fn settings(
        settings: &TrialSettings,
        model: &str,
        documents_dir: Option<&Path>,
    ) -> String {
        let retrieval = match documents_dir {
            Some(dir) => format!("enabled ({})", dir.display()),
            None => "disabled".to_string(),
        };

        format!(
            "\n{}\n  Model:               {}\n  Max Rounds:          {}\n  Max Response Length: {}\n  Document Retrieval:  {}\n",
            "Current Settings:".cyan().bold(),
            model,
            settings.max_rounds,
            settings.max_response_length,
            retrieval
        )
    }

    pub fn status(status: &TrialStatus) -> String {
        let mut output = format!(
            "\n{}\n  Active: {}\n",
            "Trial Status:".cyan().bold(),
            if status.active { "Yes" } else { "No" }
        );
        if status.active {
            output.push_str(&format!(
                "  Current Round: {}/{}\n  Case Context: {}\n",
                status.current_round,
                status.max_rounds,
                status.case_context.as_deref().unwrap_or("")
            ));
        }
        output
    }

    pub fn witness_list(active: bool, names: &[String]) -> String {
        if !active {
            return "\nNo active trial.\n".to_string();
        }
        if names.is_empty() {
            return "\nNo witnesses defined for this trial.\n".to_string();
        }

        let mut output = format!("\n{}\n", "Available Witnesses:".cyan().bold());
        for name in names {
            output.push_str(&format!("  - {}\n", name));
        }
        output
    }

    pub fn evidence_list(active: bool, evidence: &BTreeMap<String, String>) -> String {
        if !active {
            return "\nNo active trial.\n".to_string();
        }
        if evidence.is_empty() {
            return "\nNo evidence defined for this trial.\n".to_string();
        }

        let mut output = format!("\n{}\n", "Available Evidence:".cyan().bold());
        for (id, description) in evidence {
            output.push_str(&format!(
                "  - {}: {}\n",
                id,
                excerpt(description, EVIDENCE_EXCERPT_CHARS)
            ));
        }
        output
    }

    /// A titled block between horizontal rules.
    pub fn section(title: &str, body: &str) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        format!("\n{}\n{}\n{}\n{}\n", title.yellow().bold(), rule, body, rule)
    }

    /// A bare block between horizontal rules.
    pub fn framed(body: &str) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        format!("\n{}\n{}\n{}\n", rule, body, rule)
    }

    pub fn prosecution_turn(turn: &ProsecutionTurn) -> String {
        let mut output = Self::section("Prosecution's Statement:", &turn.prosecution);
        if let Some(judge) = &turn.judge {
            output.push_str(&Self::section("Judge's Response:", judge));
        }
        output.push_str(&format!(
            "\n{}\nUse the 'defense' command to enter your statement, or other commands like 'call', 'present', 'end'.\n",
            "It is now the Defense's turn to respond.".green()
        ));
        output
    }

    pub fn objection(exchange: &ObjectionExchange) -> String {
        let mut output = Self::section("Prosecution's Objection:", &exchange.objection);
        output.push_str(&Self::section("Judge's Ruling:", &exchange.ruling));
        output
    }

    pub fn after_defense() -> String {
        "\nYou can now:\n\
         - Use 'defense' again to make another statement in this round\n\
         - Use 'continue' to proceed to the next round\n\
         - Use other commands like 'call' or 'present' if needed\n\
         - Use 'end' to conclude the trial\n"
            .to_string()
    }

    /// Closing instructions, verdict, scores and where the transcript went.
    pub fn outcome(outcome: &TrialOutcome, transcript: &Transcript) -> String {
        let Some(performance) = &outcome.performance else {
            return format!("\n{}\n", outcome.verdict);
        };

        let mut output = String::new();
        if let Some(instructions) = &outcome.final_instructions {
            output.push_str(&Self::section("Judge's Closing Instructions:", instructions));
        }
        output.push_str(&Self::section("Final Verdict:", &outcome.verdict));
        output.push_str(&Self::performance(performance, transcript));

        match &outcome.persistence {
            Some(Ok(path)) => output.push_str(&format!(
                "\n{} {}\n",
                "Trial transcript saved to".green(),
                path.display()
            )),
            Some(Err(e)) => output.push_str(&format!(
                "\n{} {}\n",
                "Warning: trial transcript could not be saved:".red(),
                e
            )),
            None => {}
        }
        output
    }

    /// Per-criterion scores, with each defense statement paired to its text.
    pub fn performance(report: &PerformanceReport, transcript: &Transcript) -> String {
        let mut output = format!("\n{}\n", "Your Performance Evaluation:".cyan().bold());

        output.push_str("\nCase Description:\n");
        output.push_str(&Self::score_block(&report.case_description_eval, "  "));

        if report.defense_statement_evals.is_empty() {
            output.push_str("\n(No defense statements evaluated)\n");
            return output;
        }

        output.push_str("\nDefense Statements:\n");
        let statements: Vec<&str> = transcript
            .by_speaker("Defense")
            .map(|e| e.content.as_str())
            .collect();

        for (i, entry) in report.defense_statement_evals.iter().enumerate() {
            let text = statements
                .get(i)
                .map(|s| excerpt(s, STATEMENT_EXCERPT_CHARS))
                .unwrap_or_else(|| "(statement not found in transcript)".to_string());
            output.push_str(&format!("\n  Statement {}: '{}'\n", i + 1, text));
            output.push_str(&Self::score_block(entry, "    "));
        }
        output
    }

    fn score_block(entry: &ScoreEntry, indent: &str) -> String {
        let mut output = String::new();
        for criterion in Criterion::ALL {
            let label = format!("{}:", criterion.label());
            output.push_str(&format!(
                "{}{:<19}{}\n",
                indent,
                label,
                score_text(entry.score(criterion))
            ));
        }
        if entry.feedback.trim().is_empty() {
            output.push_str(&format!("{}(No feedback provided)\n", indent));
        } else {
            output.push_str(&format!("\n{}Feedback:\n---\n{}\n---\n", indent, entry.feedback));
        }
        output
    }
}

fn score_text(score: Option<u8>) -> String {
    match score {
        Some(value) => format!("{}/10", value),
        None => "N/A".to_string(),
    }
}
