//! Interactive multi-line input for case setup and defense statements

use courtroom_application::StartTrialInput;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};
use std::borrow::Cow;
use tracing::warn;

/// Prompt shown for continuation lines of a block
pub const BLOCK_PROMPT: &str = "  | ";

/// Something that yields typed lines.
pub trait LineSource {
    /// The next line, or `None` once input is closed or interrupted.
    fn next_line(&mut self, prompt: &str) -> Option<String>;
}

/// Plain text prompt for reedline.
pub struct TextPrompt<'a>(pub &'a str);

impl Prompt for TextPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(BLOCK_PROMPT)
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

impl LineSource for Reedline {
    fn next_line(&mut self, prompt: &str) -> Option<String> {
        match self.read_line(&TextPrompt(prompt)) {
            Ok(Signal::Success(line)) => Some(line),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }
}

/// Read lines until two consecutive blank lines (or end of input).
///
/// Blank lines inside the block are kept; the result is trimmed.
pub fn read_block(source: &mut dyn LineSource) -> String {
    let mut lines: Vec<String> = Vec::new();
    while let Some(line) = source.next_line(BLOCK_PROMPT) {
        let blank = line.trim().is_empty();
        if blank && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
            break;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}

/// Ask a yes/no question; anything but "yes" or "y" is no.
pub fn ask_yes_no(source: &mut dyn LineSource, question: &str) -> bool {
    println!("{} (yes/no)", question);
    source
        .next_line("> ")
        .map(|answer| {
            let answer = answer.trim().to_lowercase();
            answer == "yes" || answer == "y"
        })
        .unwrap_or(false)
}

/// Walk the user through the case description, witnesses and evidence.
///
/// Returns `None` when the case description is empty.
pub fn collect_trial_input(source: &mut dyn LineSource) -> Option<StartTrialInput> {
    println!("\nEnter case description (press Enter twice to finish):");
    let case_context = read_block(source);
    if case_context.is_empty() {
        println!("\nCase description cannot be empty.\n");
        return None;
    }
    let mut input = StartTrialInput::new(case_context);

    let mut adding = ask_yes_no(source, "\nAdd witnesses?");
    while adding {
        let Some(name) = read_name(source, "Enter witness name:") else {
            break;
        };
        println!("Enter testimony for {} (press Enter twice to finish):", name);
        let testimony = read_block(source);
        if testimony.is_empty() {
            println!("No testimony provided for {}. Witness not added.", name);
        } else {
            println!("Witness '{}' added.", name);
            input = input.with_witness(name, testimony);
        }
        adding = ask_yes_no(source, "\nAdd another witness?");
    }

    let mut adding = ask_yes_no(source, "\nAdd evidence?");
    while adding {
        let Some(id) = read_name(source, "Enter evidence ID (e.g., Exhibit A):") else {
            break;
        };
        println!("Enter description for {} (press Enter twice to finish):", id);
        let description = read_block(source);
        if description.is_empty() {
            println!("No description provided for {}. Evidence not added.", id);
        } else {
            println!("Evidence '{}' added.", id);
            input = input.with_evidence(id, description);
        }
        adding = ask_yes_no(source, "\nAdd another piece of evidence?");
    }

    Some(input)
}

/// Prompt until a non-blank name is entered; `None` if input closes.
fn read_name(source: &mut dyn LineSource, question: &str) -> Option<String> {
    loop {
        println!("{}", question);
        let name = source.next_line("> ")?;
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
        println!("Name cannot be blank. Try again.");
    }
}
