//! # Parsing Utils
//!
//! Extracts a command name and its raw argument string from chat text, e.g. `?pc lobby,airhorn`.

use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Option<String>,
}

impl ParsedCommand {
    /// Arguments with surrounding whitespace removed; `None` when absent or blank.
    pub fn args_trimmed(&self) -> Option<&str> {
        self.args
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: char,
    pattern: Regex,
}

impl CommandParser {
    pub fn new(prefix: char) -> Result<Self> {
        let escaped = regex::escape(&prefix.to_string());
        // Command names are ASCII word characters; args run to the end of the first line.
        let pattern = Regex::new(&format!(
            r"^{escaped}(?P<command>[A-Za-z0-9_]*)(?: (?P<args>.*))?"
        ))?;
        Ok(Self { prefix, pattern })
    }

    /// Whether `text` is addressed to the bot at all.
    pub fn is_command(&self, text: &str) -> bool {
        text.starts_with(self.prefix)
    }

    /// Splits prefixed text into a command name and its args. The name may be empty (`?`, `?!`);
    /// routing decides what that means.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let caps = self.pattern.captures(text)?;
        Some(ParsedCommand {
            name: caps.name("command")?.as_str().to_string(),
            args: caps.name("args").map(|m| m.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 13] = [
        "help", "h", "play", "p", "playchannel", "pc", "trollOn", "trollOff", "refresh", "add",
        "list", "l", "unknownThing",
    ];

    #[test]
    fn test_known_commands_with_args() {
        for prefix in ['?', '!', '.', '$', '+'] {
            let parser = CommandParser::new(prefix).unwrap();
            for name in KNOWN {
                let parsed = parser.parse(&format!("{prefix}{name} x y")).unwrap();
                assert_eq!(parsed.name, name);
                assert_eq!(parsed.args.as_deref(), Some("x y"));
            }
        }
    }

    #[test]
    fn test_command_without_args() {
        let parser = CommandParser::new('?').unwrap();
        let parsed = parser.parse("?list").unwrap();
        assert_eq!(parsed.name, "list");
        assert_eq!(parsed.args, None);
    }

    #[test]
    fn test_wrong_prefix_is_no_command() {
        let parser = CommandParser::new('?').unwrap();
        assert_eq!(parser.parse("!play"), None);
        assert_eq!(parser.parse("play ?x"), None);
        assert!(!parser.is_command("hello"));
    }

    #[test]
    fn test_bare_prefix_has_empty_name() {
        let parser = CommandParser::new('?').unwrap();
        assert!(parser.is_command("?"));
        assert_eq!(parser.parse("?").unwrap().name, "");
        assert_eq!(parser.parse("?!!").unwrap().name, "");

        let parsed = parser.parse("? play").unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.args.as_deref(), Some("play"));
    }

    #[test]
    fn test_case_sensitive_names() {
        let parser = CommandParser::new('?').unwrap();
        assert_eq!(parser.parse("?TROLLON 1").unwrap().name, "TROLLON");
        assert_eq!(parser.parse("?trollOn 1").unwrap().name, "trollOn");
    }

    #[test]
    fn test_args_start_after_first_space() {
        let parser = CommandParser::new('?').unwrap();
        let parsed = parser.parse("?pc  lobby").unwrap();
        assert_eq!(parsed.args.as_deref(), Some(" lobby"));
        assert_eq!(parsed.args_trimmed(), Some("lobby"));

        // Punctuation ends the name and no space follows it.
        let parsed = parser.parse("?play!now").unwrap();
        assert_eq!(parsed.name, "play");
        assert_eq!(parsed.args, None);
    }

    #[test]
    fn test_blank_args_trimmed_to_none() {
        let parser = CommandParser::new('?').unwrap();
        let parsed = parser.parse("?p ").unwrap();
        assert_eq!(parsed.args.as_deref(), Some(""));
        assert_eq!(parsed.args_trimmed(), None);
    }
}
