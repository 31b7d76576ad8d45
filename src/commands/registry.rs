use super::CommandResult;

pub type CommandHandler = fn(CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

/// Arguments following a command name, already trimmed.
#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

impl<'a> CommandInvocation<'a> {
    /// First whitespace-separated argument, if any.
    pub fn first_arg(&self) -> Option<&'a str> {
        self.args.split_whitespace().next()
    }
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name == name)
}

const COMMANDS: &[Command] = &[
    Command {
        name: "models",
        usage: "/models",
        handler: super::handle_models,
    },
    Command {
        name: "load",
        usage: "/load <model_name>",
        handler: super::handle_load,
    },
    Command {
        name: "help",
        usage: "/help",
        handler: super::handle_help,
    },
];
