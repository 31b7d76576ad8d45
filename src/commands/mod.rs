mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::constants::COMMAND_MARKER;

/// What a submitted line asks the session to do.
///
/// Parsing is pure; the session performs any network call the result names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    ListModels,
    LoadModel(String),
    ShowHelp(String),
    /// A known command was given the wrong arguments.
    Usage(&'static str),
    /// The text after the marker did not name a command.
    Unknown(String),
    ProcessAsMessage(String),
    /// Nothing to do (blank line).
    Ignore,
}

impl CommandResult {
    /// Status-line text for results that are only diagnostics.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            CommandResult::Usage(usage) => Some(format!("Usage: {usage}")),
            CommandResult::Unknown(name) => {
                Some(format!("Unknown command: {COMMAND_MARKER}{name}"))
            }
            _ => None,
        }
    }
}

/// Classify a submitted line. Only a line whose first character is the
/// command marker is a command; anything else is sent exactly as typed.
pub fn process_input(input: &str) -> CommandResult {
    if input.trim().is_empty() {
        return CommandResult::Ignore;
    }

    let Some(rest) = input.strip_prefix(COMMAND_MARKER) else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let rest = rest.trim_start();
    let (command_name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match registry::find_command(command_name) {
        Some(command) if !command_name.is_empty() => {
            (command.handler)(CommandInvocation { args })
        }
        _ => CommandResult::Unknown(command_name.to_string()),
    }
}

pub(super) fn handle_models(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::ListModels
}

pub(super) fn handle_load(invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.first_arg() {
        Some(name) => CommandResult::LoadModel(name.to_string()),
        None => CommandResult::Usage("/load <model_name>"),
    }
}

pub(super) fn handle_help(_invocation: CommandInvocation<'_>) -> CommandResult {
    let usages: Vec<&str> = all_commands().iter().map(|command| command.usage).collect();
    CommandResult::ShowHelp(format!("Commands: {}", usages.join(", ")))
}
