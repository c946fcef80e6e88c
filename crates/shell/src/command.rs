//! Line commands understood by the shell.

use cataloger_entry::Field;
use cataloger_entry::field::UnknownField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Tag(String),
    Untag(String),
    /// Simulated scan; `None` decodes nothing.
    Scan(Option<String>),
    Show,
    Submit,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Field(#[from] UnknownField),
}

pub const HELP: &str = "\
commands:
  set <field> <text>   field is one of name, description, serial, model, make,
                       day, month, year, price, comments (text may be empty)
  tag <text>           add a tag
  untag <text>         remove a tag
  scan [payload]       scan a barcode (payload simulates what the camera reads)
  show                 print the draft
  submit               validate and add the item
  cancel               discard the draft
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Command::Set(field.parse()?, text.to_string())
            }
            "tag" => Command::Tag(required("tag", rest)?),
            "untag" => Command::Untag(required("untag", rest)?),
            "scan" => Command::Scan((!rest.is_empty()).then(|| rest.to_string())),
            "show" => Command::Show,
            "submit" | "ok" => Command::Submit,
            "cancel" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required(verb: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(verb))
    } else {
        Ok(rest.to_string())
    }
}
