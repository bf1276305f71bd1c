//! Option Schema Registry
//!
//! Single source of truth for every recognized option: its name, value
//! type, default, bounds and which sources may supply it.
//!
//! Section membership only drives help rendering; resolution never looks at it.

use std::num::IntErrorKind;
use std::path::PathBuf;

use serde::Serialize;

use crate::constants::bounds;

/// Canonical option names
pub mod names {
    pub const FULL_PAGE: &str = "full-page";
    pub const PRERENDER_PREVIOUS_PAGES: &str = "prerender-previous-pages";
    pub const PRERENDER_NEXT_PAGES: &str = "prerender-next-pages";
    pub const HYPERLINK_SUPPORT: &str = "hyperlink-support";
    pub const CACHE_TO_MEMORY: &str = "cache-to-memory";
    pub const I3_WORKAROUND: &str = "i3-workaround";
    pub const USE_SECOND_SCREEN: &str = "use-second-screen";
    pub const PRESENTER_AREA: &str = "presenter-area";
    pub const THUMBNAILS: &str = "thumbnails";
    pub const WALL_CLOCK: &str = "wall-clock";
    pub const PRESENTATION_CLOCK: &str = "presentation-clock";
    pub const SLIDE_CLOCK: &str = "slide-clock";
    pub const BOTTOM_PANE_HEIGHT: &str = "bottom-pane-height";
    pub const DOCUMENT_PATH: &str = "document-path";
}

// =============================================================================
// Value Types
// =============================================================================

/// Declared value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Takes an explicit true/false value
    Boolean,
    /// Takes an unsigned 32-bit integer
    Unsigned,
    /// Filesystem path
    Path,
    /// Takes no value; presence means true
    Flag,
}

impl OptionKind {
    /// Parse a textual value for this kind.
    ///
    /// Shared by the command line and the config file so both sources accept
    /// exactly the same spellings.
    pub fn parse(self, raw: &str) -> Result<OptionValue, String> {
        let trimmed = raw.trim();
        match self {
            OptionKind::Boolean | OptionKind::Flag => parse_bool(trimmed).map(OptionValue::Bool),
            OptionKind::Unsigned => trimmed
                .parse::<u32>()
                .map(OptionValue::Unsigned)
                .map_err(|e| format!("'{}' is not an unsigned integer: {}", trimmed, e)),
            OptionKind::Path => {
                if trimmed.is_empty() {
                    Err("path must not be empty".to_string())
                } else {
                    Ok(OptionValue::Path(PathBuf::from(raw)))
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OptionKind::Boolean | OptionKind::Flag => "boolean",
            OptionKind::Unsigned => "unsigned",
            OptionKind::Path => "path",
        }
    }

    fn accepts(self, value: &OptionValue) -> bool {
        matches!(
            (self, value),
            (OptionKind::Boolean | OptionKind::Flag, OptionValue::Bool(_))
                | (
                    OptionKind::Unsigned,
                    OptionValue::Unsigned(_) | OptionValue::Integer(_)
                )
                | (OptionKind::Path, OptionValue::Path(_))
        )
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!(
            "'{}' is not a boolean. Valid values: true, false, 1, 0, yes, no, on, off",
            raw
        )),
    }
}

/// A concrete, typed option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Unsigned(u32),
    /// Integer text outside the `u32` range for a bounded option.
    ///
    /// Never survives validation; it only carries the offending number to
    /// the `OutOfRange` report.
    Integer(i64),
    Path(PathBuf),
}

impl OptionValue {
    /// Check whether this value is valid for the given kind
    pub fn fits(&self, kind: OptionKind) -> bool {
        kind.accepts(self)
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Unsigned(n) => write!(f, "{}", n),
            OptionValue::Integer(n) => write!(f, "{}", n),
            OptionValue::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

// =============================================================================
// Descriptors
// =============================================================================

/// Which sources may supply an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSources {
    CommandLineOnly,
    ConfigFileAndCommandLine,
    Positional,
}

impl OptionSources {
    pub fn config_file(self) -> bool {
        matches!(self, OptionSources::ConfigFileAndCommandLine)
    }
}

/// Help-text grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Behaviour,
    SecondScreen,
    Hidden,
}

impl Section {
    pub fn heading(self) -> &'static str {
        match self {
            Section::Behaviour => "Options affecting program behaviour",
            Section::SecondScreen => "Options affecting the second screen",
            Section::Hidden => "Hidden options",
        }
    }
}

/// Immutable description of one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub short: Option<char>,
    pub aliases: &'static [&'static str],
    pub kind: OptionKind,
    /// `None` only for the document path, which is never defaulted
    pub default: Option<OptionValue>,
    /// Inclusive bounds for unsigned options
    pub bounds: Option<(u32, u32)>,
    pub sources: OptionSources,
    pub section: Section,
    pub help: &'static str,
}

impl OptionDescriptor {
    /// Check whether `name` is this option's canonical name or an alias
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }

    /// Parse a textual value for this option.
    ///
    /// Like [`OptionKind::parse`], except that a bounded option also accepts
    /// integers outside the `u32` range (`-5`, `4294967296`) so validation
    /// can report them as out of range instead of malformed.
    pub fn parse(&self, raw: &str) -> Result<OptionValue, String> {
        match self.kind.parse(raw) {
            Err(e) if self.bounds.is_some() => parse_integer(raw.trim()).ok_or(e),
            parsed => parsed,
        }
    }
}

/// Any integer, saturating at the `i64` limits
fn parse_integer(raw: &str) -> Option<OptionValue> {
    match raw.parse::<i64>() {
        Ok(n) => Some(OptionValue::Integer(n)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(OptionValue::Integer(i64::MAX)),
            IntErrorKind::NegOverflow => Some(OptionValue::Integer(i64::MIN)),
            _ => None,
        },
    }
}

static OPTIONS: [OptionDescriptor; 14] = [
    OptionDescriptor {
        name: names::FULL_PAGE,
        short: Some('f'),
        aliases: &[],
        kind: OptionKind::Flag,
        default: Some(OptionValue::Bool(false)),
        bounds: None,
        sources: OptionSources::CommandLineOnly,
        section: Section::Behaviour,
        help: "Display the full slide on both screens (useful for PDFs created by presentation software other than latex-beamer)",
    },
    OptionDescriptor {
        name: names::PRERENDER_PREVIOUS_PAGES,
        short: None,
        aliases: &[],
        kind: OptionKind::Unsigned,
        default: Some(OptionValue::Unsigned(3)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::Behaviour,
        help: "Pre-render the preceding arg slides\nNOTE: If you set this to zero, you might not get a thumbnail for the previous slide unless it was loaded already.",
    },
    OptionDescriptor {
        name: names::PRERENDER_NEXT_PAGES,
        short: None,
        aliases: &[],
        kind: OptionKind::Unsigned,
        default: Some(OptionValue::Unsigned(10)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::Behaviour,
        help: "Pre-render the next arg slides\nNOTE: If you set this to zero, you might not get a thumbnail for the next slide unless it was loaded already.",
    },
    OptionDescriptor {
        name: names::HYPERLINK_SUPPORT,
        short: Some('l'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::Behaviour,
        help: "Support PDF Hyperlinks\nFollow hyperlinks when clicked (mouse pointer will change to a pointing hand) - set this to false if you cannot reliably control your mouse pointer position and want to always go ahead one slide on click.",
    },
    OptionDescriptor {
        name: names::CACHE_TO_MEMORY,
        short: None,
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::Behaviour,
        help: "Cache the PDF file into memory\nUseful if you are editing the PDF file with latex while using the presenter software.",
    },
    OptionDescriptor {
        name: names::I3_WORKAROUND,
        short: None,
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(false)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::Behaviour,
        help: "Use i3 specific workaround: Execute shellcode once both windows have been created.",
    },
    OptionDescriptor {
        name: names::USE_SECOND_SCREEN,
        short: Some('u'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Use the second screen. If you only have one monitor and just want to use this application as a fast, pre-caching PDF viewer you might want to say 0 here.\nNOTE: Whatever you say on -a, -t, -w, -s or -p doesn't matter if you set this to false.\nNOTE: You might want to say -f if you set this to false.",
    },
    OptionDescriptor {
        name: names::PRESENTER_AREA,
        short: Some('a'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Shows or hides the complete \"presenter area\" on the second screen, giving you a full-screen note page.\nNOTE: Whatever you say on -t, -w, -s or -p doesnt matter if you set this to false.",
    },
    OptionDescriptor {
        name: names::THUMBNAILS,
        short: Some('t'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Show thumbnails of previous, current and next slide",
    },
    OptionDescriptor {
        name: names::WALL_CLOCK,
        short: Some('w'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Show the wall clock",
    },
    OptionDescriptor {
        name: names::PRESENTATION_CLOCK,
        short: Some('p'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Show the presentation clock",
    },
    OptionDescriptor {
        name: names::SLIDE_CLOCK,
        short: Some('s'),
        aliases: &[],
        kind: OptionKind::Boolean,
        default: Some(OptionValue::Bool(true)),
        bounds: None,
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Show the slide clock",
    },
    OptionDescriptor {
        name: names::BOTTOM_PANE_HEIGHT,
        short: Some('b'),
        aliases: &["bottom-pane-height-percent"],
        kind: OptionKind::Unsigned,
        default: Some(OptionValue::Unsigned(20)),
        bounds: Some((
            bounds::BOTTOM_PANE_MIN_PERCENT,
            bounds::BOTTOM_PANE_MAX_PERCENT,
        )),
        sources: OptionSources::ConfigFileAndCommandLine,
        section: Section::SecondScreen,
        help: "Percentage of second screen to use for the bottom pane",
    },
    OptionDescriptor {
        name: names::DOCUMENT_PATH,
        short: None,
        aliases: &["pdf-file"],
        kind: OptionKind::Path,
        default: None,
        bounds: None,
        sources: OptionSources::Positional,
        section: Section::Hidden,
        help: "PDF File to display",
    },
];

// =============================================================================
// Registry
// =============================================================================

/// Read-only view over the declared options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRegistry {
    options: &'static [OptionDescriptor],
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl OptionRegistry {
    /// The registry of every option the viewer understands
    pub fn standard() -> Self {
        Self { options: &OPTIONS }
    }

    /// Find a descriptor by canonical name or alias
    pub fn lookup(self, name: &str) -> Option<&'static OptionDescriptor> {
        self.options.iter().find(|d| d.answers_to(name))
    }

    /// All descriptors in declaration order
    pub fn iter(self) -> impl Iterator<Item = &'static OptionDescriptor> {
        self.options.iter()
    }

    /// Descriptors a config file may set
    pub fn config_file_options(self) -> impl Iterator<Item = &'static OptionDescriptor> {
        self.iter().filter(|d| d.sources.config_file())
    }

    /// The single positional descriptor (the document path)
    pub fn positional(self) -> Option<&'static OptionDescriptor> {
        self.iter().find(|d| d.sources == OptionSources::Positional)
    }

    /// Descriptors belonging to a help section
    pub fn section(self, section: Section) -> impl Iterator<Item = &'static OptionDescriptor> {
        self.iter().filter(move |d| d.section == section)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_canonical_and_alias() {
        let registry = OptionRegistry::standard();
        let by_name = registry.lookup("bottom-pane-height").unwrap();
        let by_alias = registry.lookup("bottom-pane-height-percent").unwrap();
        assert_eq!(by_name.name, by_alias.name);
        assert_eq!(by_name.default, Some(OptionValue::Unsigned(20)));
        assert_eq!(by_name.bounds, Some((1, 99)));
    }

    #[test]
    fn test_lookup_not_found() {
        assert!(OptionRegistry::standard().lookup("presenter-notes").is_none());
    }

    #[test]
    fn test_defaults_match_kinds() {
        for descriptor in OptionRegistry::standard().iter() {
            match &descriptor.default {
                Some(value) => assert!(value.fits(descriptor.kind), "{}", descriptor.name),
                None => assert_eq!(descriptor.sources, OptionSources::Positional),
            }
        }
    }

    #[test]
    fn test_source_sets() {
        let registry = OptionRegistry::standard();
        let file_names: Vec<_> = registry.config_file_options().map(|d| d.name).collect();
        assert_eq!(file_names.len(), 12);
        assert!(!file_names.contains(&names::FULL_PAGE));
        assert!(!file_names.contains(&names::DOCUMENT_PATH));
        assert_eq!(registry.positional().unwrap().name, names::DOCUMENT_PATH);
    }

    #[test]
    fn test_sections_partition_options() {
        let registry = OptionRegistry::standard();
        let total = registry.section(Section::Behaviour).count()
            + registry.section(Section::SecondScreen).count()
            + registry.section(Section::Hidden).count();
        assert_eq!(total, registry.iter().count());
    }

    #[test]
    fn test_bool_spellings() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(OptionKind::Boolean.parse(raw), Ok(OptionValue::Bool(true)));
        }
        for raw in ["false", "0", "No", "off"] {
            assert_eq!(OptionKind::Boolean.parse(raw), Ok(OptionValue::Bool(false)));
        }
        assert!(OptionKind::Boolean.parse("maybe").is_err());
    }

    #[test]
    fn test_unsigned_parse() {
        assert_eq!(OptionKind::Unsigned.parse(" 42 "), Ok(OptionValue::Unsigned(42)));
        assert!(OptionKind::Unsigned.parse("-5").is_err());
        assert!(OptionKind::Unsigned.parse("ten").is_err());
        assert!(OptionKind::Unsigned.parse("99999999999").is_err());
    }

    #[test]
    fn test_bounded_option_keeps_wide_integers() {
        let registry = OptionRegistry::standard();
        let height = registry.lookup(names::BOTTOM_PANE_HEIGHT).unwrap();
        assert_eq!(height.parse("30"), Ok(OptionValue::Unsigned(30)));
        assert_eq!(height.parse("-5"), Ok(OptionValue::Integer(-5)));
        assert_eq!(height.parse("4294967296"), Ok(OptionValue::Integer(4_294_967_296)));
        assert_eq!(
            height.parse("99999999999999999999"),
            Ok(OptionValue::Integer(i64::MAX))
        );
        assert!(height.parse("tall").is_err());

        let pages = registry.lookup(names::PRERENDER_NEXT_PAGES).unwrap();
        assert!(pages.parse("-5").is_err());
    }
}
