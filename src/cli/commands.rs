//! The command table shared by the CLI and the interactive menu.

/// A stack operation, independent of how it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackCommand {
    Up,
    Down,
    Restart,
    Status,
    Logs { service: Option<String> },
    Test { json: bool },
    Clean,
    Info,
    Open,
}

/// One row of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Menu key
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const COMMAND_TABLE: [CommandEntry; 9] = [
    CommandEntry {
        key: "1",
        name: "up",
        description: "Start the stack",
    },
    CommandEntry {
        key: "2",
        name: "down",
        description: "Stop the stack",
    },
    CommandEntry {
        key: "3",
        name: "restart",
        description: "Restart the stack",
    },
    CommandEntry {
        key: "4",
        name: "status",
        description: "Show container status",
    },
    CommandEntry {
        key: "5",
        name: "logs",
        description: "Show logs",
    },
    CommandEntry {
        key: "6",
        name: "test",
        description: "Run health checks",
    },
    CommandEntry {
        key: "7",
        name: "clean",
        description: "Stop and delete all data volumes",
    },
    CommandEntry {
        key: "8",
        name: "info",
        description: "Show service URLs",
    },
    CommandEntry {
        key: "9",
        name: "open",
        description: "Open dashboards in a browser",
    },
];

impl StackCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StackCommand::Up => "up",
            StackCommand::Down => "down",
            StackCommand::Restart => "restart",
            StackCommand::Status => "status",
            StackCommand::Logs { .. } => "logs",
            StackCommand::Test { .. } => "test",
            StackCommand::Clean => "clean",
            StackCommand::Info => "info",
            StackCommand::Open => "open",
        }
    }

    /// Build a command from its table name with default arguments.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "up" => StackCommand::Up,
            "down" => StackCommand::Down,
            "restart" => StackCommand::Restart,
            "status" => StackCommand::Status,
            "logs" => StackCommand::Logs { service: None },
            "test" => StackCommand::Test { json: false },
            "clean" => StackCommand::Clean,
            "info" => StackCommand::Info,
            "open" => StackCommand::Open,
            _ => return None,
        };
        Some(command)
    }

    /// Whether the command destroys data and deserves confirmation.
    pub fn is_destructive(&self) -> bool {
        matches!(self, StackCommand::Clean)
    }
}

/// Look up a table entry by menu key or command name.
pub fn lookup(selection: &str) -> Option<&'static CommandEntry> {
    let selection = selection.trim();
    COMMAND_TABLE
        .iter()
        .find(|entry| entry.key == selection || entry.name.eq_ignore_ascii_case(selection))
}
