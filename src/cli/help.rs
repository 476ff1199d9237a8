use crate::cli::output;

/// One shell command as listed by `help`.
pub struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "help",
        usage: "help [command]",
        description: "List commands or describe one",
    },
    CommandEntry {
        name: "version",
        usage: "version",
        description: "Show build information",
    },
    CommandEntry {
        name: "month",
        usage: "month [<Month> <Year>]",
        description: "Select a month and show its summary",
    },
    CommandEntry {
        name: "income",
        usage: "income <amount>",
        description: "Add income to the selected month",
    },
    CommandEntry {
        name: "add",
        usage: "add <description> <amount>",
        description: "Record an expense dated today in the selected month",
    },
    CommandEntry {
        name: "delete",
        usage: "delete <id>",
        description: "Remove an expense from the selected month",
    },
    CommandEntry {
        name: "list",
        usage: "list",
        description: "List the selected month's expenses",
    },
    CommandEntry {
        name: "summary",
        usage: "summary [--json]",
        description: "Show income, expenses and balance for the selected month",
    },
    CommandEntry {
        name: "year",
        usage: "year [<year>] [--json]",
        description: "Show the twelve-month report and yearly totals",
    },
    CommandEntry {
        name: "flush",
        usage: "flush",
        description: "Write pending changes to storage",
    },
    CommandEntry {
        name: "exit",
        usage: "exit",
        description: "Save pending changes and leave the shell",
    },
];

pub fn find(name: &str) -> Option<&'static CommandEntry> {
    COMMANDS.iter().find(|entry| entry.name == name)
}

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|entry| entry.name).collect()
}

pub fn print_overview() {
    output::section("Available commands");
    for entry in COMMANDS {
        output::info(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  Description: {}", entry.description));
    output::info(format!("  Usage: {}", entry.usage));
}
