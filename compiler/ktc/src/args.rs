//! Command-line parsing.

use kt_diagnostic::emitter::ColorMode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("'{option}' needs a value")]
    MissingValue { option: &'static str },
    #[error("invalid value '{value}' for '{option}'")]
    InvalidValue { option: &'static str, value: String },
    #[error("no input files")]
    NoInputs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub tree: bool,
    pub tokens: bool,
    pub script: bool,
    pub format: OutputFormat,
    pub color: ColorMode,
    pub log_tree: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Parse(Vec<String>),
    Check(Vec<String>),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
}

/// Parse everything after the program name. Options may appear anywhere
/// after the command; `--opt value` and `--opt=value` are both accepted.
pub fn parse_args(args: &[String]) -> Result<Invocation, ArgsError> {
    let Some(command) = args.first() else {
        return Err(ArgsError::MissingCommand);
    };

    let mut options = Options::default();
    if matches!(command.as_str(), "help" | "-h" | "--help") {
        return Ok(Invocation {
            command: Command::Help,
            options,
        });
    }

    let mut paths = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) if arg.starts_with("--") => (flag, Some(value.to_owned())),
            _ => (arg.as_str(), None),
        };

        match flag {
            "--tree" => options.tree = true,
            "--tokens" => options.tokens = true,
            "--script" => options.script = true,
            "--log-tree" => options.log_tree = true,
            "--format" => {
                let value = option_value("--format", inline_value, &mut rest)?;
                options.format = match value.as_str() {
                    "terminal" => OutputFormat::Terminal,
                    "json" => OutputFormat::Json,
                    _ => {
                        return Err(ArgsError::InvalidValue {
                            option: "--format",
                            value,
                        })
                    }
                };
            }
            "--color" => {
                let value = option_value("--color", inline_value, &mut rest)?;
                options.color = match value.as_str() {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    _ => {
                        return Err(ArgsError::InvalidValue {
                            option: "--color",
                            value,
                        })
                    }
                };
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(ArgsError::UnknownOption(arg.clone()));
            }
            _ => paths.push(arg.clone()),
        }
    }

    let command = match command.as_str() {
        "parse" => {
            options.tree = true;
            Command::Parse(paths)
        }
        "check" => Command::Check(paths),
        other => return Err(ArgsError::UnknownCommand(other.to_owned())),
    };
    if matches!(&command, Command::Parse(p) | Command::Check(p) if p.is_empty()) {
        return Err(ArgsError::NoInputs);
    }

    Ok(Invocation { command, options })
}

fn option_value<'a>(
    option: &'static str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<String, ArgsError> {
    match inline {
        Some(value) => Ok(value),
        None => rest.next().cloned().ok_or(ArgsError::MissingValue { option }),
    }
}

#[cfg(test)]
mod tests;
