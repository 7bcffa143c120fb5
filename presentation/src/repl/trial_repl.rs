//! REPL (Read-Eval-Print Loop) driving one trial at a time

use super::command::ReplCommand;
use super::input::{LineSource, collect_trial_input, read_block};
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use colored::Colorize;
use courtroom_application::TrialOrchestrator;
use reedline::{FileBackedHistory, Reedline};
use std::fs;
use std::path::Path;
use tracing::warn;

const PROMPT: &str = "courtroom> ";
const HISTORY_CAPACITY: usize = 1000;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive courtroom session; the user argues the defense.
pub struct TrialRepl {
    orchestrator: TrialOrchestrator,
    config: ReplConfig,
}

impl TrialRepl {
    pub fn new(orchestrator: TrialOrchestrator, config: ReplConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    pub fn orchestrator(&self) -> &TrialOrchestrator {
        &self.orchestrator
    }

    /// Run the interactive REPL until `exit` or end of input
    pub async fn run(&mut self) {
        let mut editor = self.editor();
        println!("{}", ConsoleFormatter::banner());

        while let Some(line) = editor.next_line(PROMPT) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.execute(ReplCommand::parse(line), &mut editor).await == Flow::Exit {
                return;
            }
        }

        println!("\n{}", Self::farewell());
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Command history unavailable at {}: {}", path.display(), e);
                editor
            }
        }
    }

    fn farewell() -> &'static str {
        "Thank you for using the courtroom simulator. Goodbye!"
    }

    /// Carry out one command. Multi-line entry reads from `input`.
    pub async fn execute(&mut self, command: ReplCommand, input: &mut dyn LineSource) -> Flow {
        match command {
            ReplCommand::Exit => {
                println!("\n{}", Self::farewell());
                return Flow::Exit;
            }
            ReplCommand::Help => println!("{}", ConsoleFormatter::help()),
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                println!("{}", ConsoleFormatter::banner());
            }
            ReplCommand::Settings => println!(
                "{}",
                ConsoleFormatter::settings(
                    self.orchestrator.settings(),
                    self.orchestrator.model_name(),
                    self.config.documents_dir.as_deref(),
                )
            ),
            ReplCommand::Status => {
                println!("{}", ConsoleFormatter::status(&self.orchestrator.status()))
            }
            ReplCommand::Start => self.start(input).await,
            ReplCommand::Continue => self.prosecution_round().await,
            ReplCommand::Defense => self.defense(input).await,
            ReplCommand::End => {
                let outcome = self.orchestrator.end_trial().await;
                println!(
                    "{}",
                    ConsoleFormatter::outcome(&outcome, self.orchestrator.transcript())
                );
            }
            ReplCommand::ListWitnesses => println!(
                "{}",
                ConsoleFormatter::witness_list(
                    self.orchestrator.is_active(),
                    &self.orchestrator.witness_names()
                )
            ),
            ReplCommand::ListEvidence => println!(
                "{}",
                ConsoleFormatter::evidence_list(
                    self.orchestrator.is_active(),
                    self.orchestrator.evidence()
                )
            ),
            ReplCommand::Call(name) => {
                let result = self.orchestrator.call_witness(&name);
                self.show(result);
            }
            ReplCommand::Examine(question) => {
                let result = self
                    .orchestrator
                    .examine_witness("Prosecution", &question)
                    .await;
                self.show(result);
            }
            ReplCommand::Cross(question) => {
                let result = self
                    .orchestrator
                    .cross_examine_witness("Defense", &question)
                    .await;
                self.show(result);
            }
            ReplCommand::Present(id) => {
                let result = self.orchestrator.present_evidence("Prosecution", &id);
                self.show(result);
            }
            ReplCommand::MissingArgument { usage } => {
                println!("\nMissing argument. Usage: {}\n", usage)
            }
            ReplCommand::UnknownList => {
                println!("\nUnknown list command. Use 'list witnesses' or 'list evidence'.\n")
            }
            ReplCommand::Unknown(verb) => {
                println!("\nUnknown command: {}", verb);
                println!("Type 'help' for available commands.\n");
            }
        }
        Flow::Continue
    }

    fn show<E: std::fmt::Display>(&self, result: Result<String, E>) {
        match result {
            Ok(text) => println!("{}", ConsoleFormatter::framed(&text)),
            Err(e) => println!("\n{}\n", e.to_string().red()),
        }
    }

    async fn start(&mut self, input: &mut dyn LineSource) {
        // The orchestrator would discard the running trial; the REPL refuses instead
        if self.orchestrator.is_active() {
            println!("\nA trial is already in progress. Please end it first.\n");
            return;
        }

        self.announce_documents();
        let Some(trial_input) = collect_trial_input(input) else {
            return;
        };

        println!("\nStarting new trial...");
        let instructions = self.orchestrator.start_trial(trial_input).await;
        println!(
            "{}",
            ConsoleFormatter::section("Judge's Opening Instructions:", &instructions)
        );

        self.prosecution_round().await;
    }

    fn announce_documents(&self) {
        match &self.config.documents_dir {
            Some(dir) => {
                println!("\nNote: Document retrieval is ENABLED.");
                println!("       Ensure relevant documents are in '{}'.", dir.display());
                if is_missing_or_empty(dir) {
                    println!(
                        "       {}",
                        format!(
                            "Warning: Directory '{}' is currently empty or missing.",
                            dir.display()
                        )
                        .yellow()
                    );
                }
            }
            None => println!("\nNote: Document retrieval is DISABLED."),
        }
    }

    async fn prosecution_round(&mut self) {
        match self.orchestrator.process_prosecution().await {
            Ok(turn) => println!("{}", ConsoleFormatter::prosecution_turn(&turn)),
            Err(e) => println!("\n{}\n", e.to_string().red()),
        }
    }

    async fn defense(&mut self, input: &mut dyn LineSource) {
        if !self.orchestrator.is_active() {
            println!("\n{}\n", "No active trial. Please start a trial first.".red());
            return;
        }

        println!("\nEnter your defense statement (press Enter twice to finish):");
        let statement = read_block(input);
        if statement.is_empty() {
            println!("\nDefense statement cannot be empty.\n");
            return;
        }

        match self.orchestrator.process_defense(&statement).await {
            Ok(Some(exchange)) => println!("{}", ConsoleFormatter::objection(&exchange)),
            Ok(None) => {}
            Err(e) => {
                println!("\n{}\n", e.to_string().red());
                return;
            }
        }
        println!("{}", ConsoleFormatter::after_defense());
    }
}

fn is_missing_or_empty(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::input::tests::ScriptedLines;
    use courtroom_application::{
        PersistenceError, TranscriptStore, TrialSettings, UnconfiguredGenerator,
    };
    use courtroom_domain::TrialRecord;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct DiscardStore;

    impl TranscriptStore for DiscardStore {
        fn save(&self, record: &TrialRecord) -> Result<PathBuf, PersistenceError> {
            Ok(PathBuf::from(record.file_name()))
        }
    }

    fn repl() -> TrialRepl {
        let orchestrator = TrialOrchestrator::new(
            Arc::new(UnconfiguredGenerator),
            Arc::new(DiscardStore),
            TrialSettings::default(),
        );
        let config = ReplConfig {
            history_file: None,
            documents_dir: None,
        };
        TrialRepl::new(orchestrator, config)
    }

    fn case_lines() -> ScriptedLines {
        ScriptedLines::new(&["Theft at the corner store.", "", "", "no", "no"])
    }

    #[tokio::test]
    async fn test_start_runs_opening_prosecution_round() {
        let mut repl = repl();
        let flow = repl.execute(ReplCommand::Start, &mut case_lines()).await;

        assert_eq!(flow, Flow::Continue);
        let status = repl.orchestrator().status();
        assert!(status.active);
        assert_eq!(status.current_round, 1);
        assert!(
            repl.orchestrator()
                .transcript()
                .entries()
                .iter()
                .any(|e| e.speaker == "Prosecutor")
        );
    }

    #[tokio::test]
    async fn test_start_is_refused_while_trial_active() {
        let mut repl = repl();
        repl.execute(ReplCommand::Start, &mut case_lines()).await;
        let entries = repl.orchestrator().transcript().len();

        let mut second = ScriptedLines::new(&["Another case.", "", "", "no", "no"]);
        repl.execute(ReplCommand::Start, &mut second).await;

        // Nothing was read and the running trial is untouched
        assert_eq!(second.next_line(""), Some("Another case.".to_string()));
        assert_eq!(repl.orchestrator().transcript().len(), entries);
        assert_eq!(
            repl.orchestrator().status().case_context.as_deref(),
            Some("Theft at the corner store.")
        );
    }

    #[tokio::test]
    async fn test_defense_without_trial_reads_nothing() {
        let mut repl = repl();
        let mut lines = ScriptedLines::new(&["My client is innocent.", "", ""]);
        repl.execute(ReplCommand::Defense, &mut lines).await;

        assert_eq!(lines.next_line(""), Some("My client is innocent.".to_string()));
        assert!(repl.orchestrator().performance().defense_statement_evals.is_empty());
    }

    #[tokio::test]
    async fn test_defense_statement_is_recorded_and_scored() {
        let mut repl = repl();
        repl.execute(ReplCommand::Start, &mut case_lines()).await;

        let mut lines = ScriptedLines::new(&["My client was at home.", "", ""]);
        repl.execute(ReplCommand::Defense, &mut lines).await;

        let defense: Vec<_> = repl
            .orchestrator()
            .transcript()
            .by_speaker("Defense")
            .map(|e| e.content.clone())
            .collect();
        assert_eq!(defense, vec!["My client was at home."]);
        assert_eq!(repl.orchestrator().performance().defense_statement_evals.len(), 1);
    }

    #[tokio::test]
    async fn test_end_closes_trial_and_exit_stops_loop() {
        let mut repl = repl();
        let mut no_input = ScriptedLines::new(&[]);
        repl.execute(ReplCommand::Start, &mut case_lines()).await;

        assert_eq!(repl.execute(ReplCommand::End, &mut no_input).await, Flow::Continue);
        assert!(!repl.orchestrator().is_active());
        assert!(repl.orchestrator().jury().get_verdict().is_some());

        assert_eq!(repl.execute(ReplCommand::Exit, &mut no_input).await, Flow::Exit);
    }
}
