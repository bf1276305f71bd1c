//! Command-Line Stage
//!
//! Builds a `clap::Command` from the option registry and turns raw tokens
//! into either an informational request (help/version) or the set of values
//! the user actually typed. Nothing here applies defaults: an option absent
//! from the command line is simply absent from the result.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{OsStringValueParser, TypedValueParser, ValueParser};
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use super::schema::{OptionKind, OptionRegistry, OptionSources, OptionValue, Section};
use crate::constants::about;
use crate::types::Result;

const HELP: &str = "help";
const VERSION: &str = "version";
const GENERIC_HEADING: &str = "Generic options";

/// Outcome of parsing the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// The user asked for help or version text
    Informational(InformationalRequest),
    /// Values supplied on the command line, in registry order
    Values(CommandLineValues),
}

/// Text to display instead of running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationalRequest {
    pub kind: InformationalKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationalKind {
    Help,
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineValues {
    /// (canonical name, value) for every option the user typed
    pub options: Vec<(&'static str, OptionValue)>,
    /// Positional document path, `None` when absent or empty
    pub document_path: Option<PathBuf>,
}

/// Parse command-line tokens (without the program name)
pub fn parse<I, T>(registry: OptionRegistry, tokens: I) -> Result<CommandLine>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(registry).try_get_matches_from(tokens)?;

    if matches.get_flag(HELP) {
        return Ok(CommandLine::Informational(InformationalRequest {
            kind: InformationalKind::Help,
            text: help_text(registry),
        }));
    }
    if matches.get_flag(VERSION) {
        return Ok(CommandLine::Informational(InformationalRequest {
            kind: InformationalKind::Version,
            text: version_text(),
        }));
    }

    Ok(CommandLine::Values(collect_values(registry, &matches)))
}

fn collect_values(registry: OptionRegistry, matches: &ArgMatches) -> CommandLineValues {
    let mut values = CommandLineValues::default();

    for descriptor in registry.iter() {
        match (descriptor.sources, descriptor.kind) {
            (OptionSources::Positional, _) => {
                values.document_path = matches
                    .get_one::<PathBuf>(descriptor.name)
                    .filter(|p| !p.as_os_str().is_empty())
                    .cloned();
            }
            (_, OptionKind::Flag) => {
                if matches.get_flag(descriptor.name) {
                    values
                        .options
                        .push((descriptor.name, OptionValue::Bool(true)));
                }
            }
            _ => {
                if let Some(value) = matches.get_one::<OptionValue>(descriptor.name) {
                    values.options.push((descriptor.name, value.clone()));
                }
            }
        }
    }

    values
}

/// Build the clap command for the registry
pub fn build_command(registry: OptionRegistry) -> Command {
    let mut command = Command::new(about::PROGRAM_NAME)
        .no_binary_name(true)
        .color(ColorChoice::Never)
        .args_override_self(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .override_usage(about::USAGE)
        .before_help(version_text())
        .after_help(about::INTERACTIVE_PRIMER)
        .arg(
            Arg::new(HELP)
                .short('h')
                .long(HELP)
                .action(ArgAction::SetTrue)
                .help("Print help message")
                .help_heading(GENERIC_HEADING),
        )
        .arg(
            Arg::new(VERSION)
                .short('v')
                .long(VERSION)
                .action(ArgAction::SetTrue)
                .help("Print version statement")
                .help_heading(GENERIC_HEADING),
        );

    for descriptor in registry.iter() {
        let mut arg = Arg::new(descriptor.name).help_heading(descriptor.section.heading());

        arg = match (descriptor.sources, descriptor.kind) {
            (OptionSources::Positional, _) => arg
                .index(1)
                .num_args(1)
                .hide(descriptor.section == Section::Hidden)
                .value_name("PDF-FILE")
                .value_parser(OsStringValueParser::new().map(PathBuf::from)),
            (_, OptionKind::Flag) => arg
                .long(descriptor.name)
                .action(ArgAction::SetTrue)
                .help(descriptor.help),
            (_, kind) => arg
                .long(descriptor.name)
                .num_args(1)
                .action(ArgAction::Set)
                .allow_negative_numbers(descriptor.bounds.is_some())
                .value_name(value_name(kind))
                .value_parser(ValueParser::new(move |raw: &str| descriptor.parse(raw)))
                .help(option_help(descriptor)),
        };

        if let Some(short) = descriptor.short {
            arg = arg.short(short);
        }
        if descriptor.sources != OptionSources::Positional {
            arg = arg.visible_aliases(descriptor.aliases.iter().copied());
        }

        command = command.arg(arg);
    }

    command
}

fn value_name(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Unsigned => "N",
        OptionKind::Path => "PATH",
        OptionKind::Boolean | OptionKind::Flag => "BOOL",
    }
}

fn option_help(descriptor: &super::OptionDescriptor) -> String {
    let mut help = descriptor.help.to_string();

    if cfg!(debug_assertions) && descriptor.name == super::schema::names::I3_WORKAROUND {
        help.push_str("\nDebug info: Shellcode is \n");
        help.push_str(crate::constants::i3::SHELLCODE);
    }

    if let Some(default) = &descriptor.default {
        help.push_str(&format!(" [default: {}]", default));
    }
    help
}

/// Version banner shown for `--version` and at the top of `--help`
pub fn version_text() -> String {
    format!(
        "{} version {}\n{}\n\n{}",
        about::PROGRAM_NAME,
        about::VERSION,
        about::AUTHOR_LINE,
        about::COPYRIGHT
    )
}

/// Full help text, options grouped by section
pub fn help_text(registry: OptionRegistry) -> String {
    let mut command = build_command(registry);
    command.render_help().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::names;
    use crate::types::ResolutionError;

    fn values(tokens: &[&str]) -> CommandLineValues {
        match parse(OptionRegistry::standard(), tokens.iter().copied()).unwrap() {
            CommandLine::Values(values) => values,
            other => panic!("expected values, got {:?}", other),
        }
    }

    #[test]
    fn test_command_is_consistent() {
        build_command(OptionRegistry::standard()).debug_assert();
    }

    #[test]
    fn test_empty_command_line() {
        let parsed = values(&[]);
        assert!(parsed.options.is_empty());
        assert!(parsed.document_path.is_none());
    }

    #[test]
    fn test_long_short_and_separate_values() {
        let parsed = values(&[
            "--bottom-pane-height=50",
            "-u",
            "false",
            "--thumbnails",
            "no",
            "-b30",
            "slides.pdf",
        ]);
        assert_eq!(
            parsed.options,
            vec![
                (names::USE_SECOND_SCREEN, OptionValue::Bool(false)),
                (names::THUMBNAILS, OptionValue::Bool(false)),
                (names::BOTTOM_PANE_HEIGHT, OptionValue::Unsigned(30)),
            ]
        );
        assert_eq!(parsed.document_path, Some(PathBuf::from("slides.pdf")));
    }

    #[test]
    fn test_alias_flag() {
        let parsed = values(&["--bottom-pane-height-percent", "45"]);
        assert_eq!(
            parsed.options,
            vec![(names::BOTTOM_PANE_HEIGHT, OptionValue::Unsigned(45))]
        );
    }

    #[test]
    fn test_full_page_presence() {
        let parsed = values(&["-f"]);
        assert_eq!(parsed.options, vec![(names::FULL_PAGE, OptionValue::Bool(true))]);

        let parsed = values(&["--full-page"]);
        assert_eq!(parsed.options, vec![(names::FULL_PAGE, OptionValue::Bool(true))]);
    }

    #[test]
    fn test_empty_positional_is_absent() {
        assert!(values(&[""]).document_path.is_none());
        assert!(values(&["-f", ""]).document_path.is_none());
    }

    #[test]
    fn test_bounded_option_accepts_negative_integers() {
        let parsed = values(&["-b", "-5", "talk.pdf"]);
        assert_eq!(
            parsed.options,
            vec![(names::BOTTOM_PANE_HEIGHT, OptionValue::Integer(-5))]
        );
        assert_eq!(parsed.document_path, Some(PathBuf::from("talk.pdf")));
    }

    #[test]
    fn test_malformed_inputs() {
        let cases: &[&[&str]] = &[
            &["--no-such-flag"],
            &["--thumbnails=sometimes"],
            &["--bottom-pane-height=tall"],
            &["--prerender-next-pages=-1"],
            &["--prerender-next-pages=lots"],
            &["--wall-clock"],
            &["a.pdf", "b.pdf"],
            &["--full-page=true"],
        ];
        for tokens in cases {
            let result = parse(OptionRegistry::standard(), tokens.iter().copied());
            assert!(
                matches!(result, Err(ResolutionError::MalformedInput { .. })),
                "{:?} gave {:?}",
                tokens,
                result
            );
        }
    }

    #[test]
    fn test_help_request() {
        let CommandLine::Informational(request) =
            parse(OptionRegistry::standard(), ["--help"]).unwrap()
        else {
            panic!("expected informational request");
        };
        assert_eq!(request.kind, InformationalKind::Help);
        assert!(request.text.contains("dspdfviewer version"));
        assert!(request.text.contains("dspdfviewer [options] pdf-file"));
        assert!(request.text.contains("Generic options"));
        assert!(request.text.contains("Options affecting program behaviour"));
        assert!(request.text.contains("Options affecting the second screen"));
        assert!(request.text.contains("--bottom-pane-height"));
        assert!(request.text.contains("Interactive Controls:"));
        assert!(!request.text.contains("Hidden options"));
    }

    #[test]
    fn test_version_request() {
        let CommandLine::Informational(request) =
            parse(OptionRegistry::standard(), ["-v", "talk.pdf"]).unwrap()
        else {
            panic!("expected informational request");
        };
        assert_eq!(request.kind, InformationalKind::Version);
        assert_eq!(request.text, version_text());
        assert!(request.text.contains(about::VERSION));
    }

    #[test]
    fn test_help_wins_over_version() {
        let CommandLine::Informational(request) =
            parse(OptionRegistry::standard(), ["-v", "-h"]).unwrap()
        else {
            panic!("expected informational request");
        };
        assert_eq!(request.kind, InformationalKind::Help);
    }
}
