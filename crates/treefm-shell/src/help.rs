//! Help text.

struct CommandHelp {
    names: &'static [&'static str],
    summary: &'static str,
    usage: &'static [(&'static str, &'static str)],
}

const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        names: &["q", "quit"],
        summary: "saves settings and quits the program",
        usage: &[],
    },
    CommandHelp {
        names: &["h", "help"],
        summary: "shows help text",
        usage: &[("", "shows commands list"), ("<command>", "shows help for <command>")],
    },
    CommandHelp {
        names: &["s", "sel", "select"],
        summary: "changes selection",
        usage: &[
            ("", "clears selection"),
            ("<number>", "selects item <number>"),
            ("<path>", "selects item with full path <path>"),
        ],
    },
    CommandHelp {
        names: &["pg", "page"],
        summary: "sets page size",
        usage: &[("N", "shows N items per page")],
    },
    CommandHelp {
        names: &["ls", "list"],
        summary: "lists files and folders",
        usage: &[
            ("", "shows drives list"),
            ("-p N", "shows page N"),
            ("<directory>", "shows files and folders of <directory>"),
            ("<directory> -p N", "same as above, showing page N"),
        ],
    },
    CommandHelp {
        names: &["r", "rel", "reload"],
        summary: "reloads list of files",
        usage: &[("", "rescans the current folder")],
    },
    CommandHelp {
        names: &["mkdir", "makedir"],
        summary: "creates new folder",
        usage: &[("<path>", "creates folder <path>")],
    },
    CommandHelp {
        names: &["ren", "rename"],
        summary: "changes name of file or folder",
        usage: &[
            ("<new_name>", "renames selected item"),
            ("<path> <new_name>", "renames item <path>"),
        ],
    },
    CommandHelp {
        names: &["cp", "copy"],
        summary: "copies file or folder",
        usage: &[
            ("<target>", "copies selected item to <target>"),
            ("<source> <target>", "copies <source> to <target>"),
        ],
    },
    CommandHelp {
        names: &["mv", "move"],
        summary: "moves file or folder",
        usage: &[
            ("<target>", "moves selected item to <target>"),
            ("<source> <target>", "moves <source> to <target>"),
        ],
    },
    CommandHelp {
        names: &["del", "delete"],
        summary: "deletes file or folder",
        usage: &[
            ("", "deletes selected item"),
            ("<path>", "deletes <path>"),
        ],
    },
];

fn find(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.names.iter().any(|n| *n == name))
}

/// Command list, or the details of `topic` when it names a command.
///
/// An unknown topic is reported above the command list.
pub fn help_text(topic: Option<&str>) -> String {
    let topic = topic.map(|t| t.trim().to_lowercase());
    let mut text = String::new();

    if let Some(name) = topic.as_deref() {
        match find(name) {
            Some(command) => {
                text.push_str(&format!("Command '{name}' {}\n\n", command.summary));
                for (args, description) in command.usage {
                    let call = if args.is_empty() {
                        name.to_string()
                    } else {
                        format!("{name} {args}")
                    };
                    text.push_str(&format!("  {call:<24} - {description}\n"));
                }
                return text;
            }
            None => text.push_str(&format!("Command '{name}' is not found.\n\n")),
        }
    }

    text.push_str("Available commands:\n");
    text.push_str(&format!("  {:<15} - {}\n", "<empty command>", "refreshes screen"));
    for command in COMMANDS {
        text.push_str(&format!(
            "  {:<15} - {}\n",
            command.names.join(", "),
            command.summary
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_list() {
        let text = help_text(None);
        assert!(text.starts_with("Available commands:"));
        assert!(text.contains("cp, copy"));
        assert!(text.contains("del, delete"));
    }

    #[test]
    fn test_command_details() {
        let text = help_text(Some("CP"));
        assert!(text.starts_with("Command 'cp' copies file or folder"));
        assert!(text.contains("cp <source> <target>"));
    }

    #[test]
    fn test_unknown_topic() {
        let text = help_text(Some("zap"));
        assert!(text.starts_with("Command 'zap' is not found."));
        assert!(text.contains("Available commands:"));
    }
}
