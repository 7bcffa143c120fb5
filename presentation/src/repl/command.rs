//! REPL command parsing

/// One line typed at the `courtroom>` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Settings,
    Status,
    Start,
    Continue,
    Defense,
    End,
    ListWitnesses,
    ListEvidence,
    Call(String),
    Examine(String),
    Cross(String),
    Present(String),
    /// A command that needs an argument was given none
    MissingArgument { usage: &'static str },
    /// `list` with something other than witnesses or evidence
    UnknownList,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line.
    ///
    /// Only the verb is case-insensitive; arguments (witness names,
    /// questions, evidence ids) keep the case they were typed in.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        let with_argument = |build: fn(String) -> ReplCommand, usage: &'static str| match argument {
            Some(arg) => build(arg.to_string()),
            None => ReplCommand::MissingArgument { usage },
        };

        match verb.to_lowercase().as_str() {
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            "clear" => Self::Clear,
            "settings" => Self::Settings,
            "status" => Self::Status,
            "start" => Self::Start,
            "continue" => Self::Continue,
            "defense" => Self::Defense,
            "end" => Self::End,
            "list" => match argument.map(str::to_lowercase).as_deref() {
                Some("witnesses") => Self::ListWitnesses,
                Some("evidence") => Self::ListEvidence,
                _ => Self::UnknownList,
            },
            "call" => with_argument(Self::Call, "call <name>"),
            "examine" => with_argument(Self::Examine, "examine <question>"),
            "cross" => with_argument(Self::Cross, "cross <question>"),
            "present" => with_argument(Self::Present, "present <id>"),
            other => Self::Unknown(other.to_string()),
        }
    }
}
