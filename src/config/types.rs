//! Resolved Configuration
//!
//! The final, read-only settings object consumed by the rest of the viewer.
//! Built once from a validated and cascaded raw value set; the only mutation
//! afterwards is injecting the document path.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::raw::RawValueSet;
use super::schema::names;
use crate::constants::i3;
use crate::types::UndefinedDocumentPath;

/// Effective runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    /// Document to display; `None` until supplied or injected
    document_path: Option<PathBuf>,

    use_full_page: bool,
    prerender_previous_pages: u32,
    prerender_next_pages: u32,
    hyperlink_support: bool,
    cache_to_memory: bool,
    i3_workaround: bool,

    // Second screen
    use_second_screen: bool,
    show_presenter_area: bool,
    show_thumbnails: bool,
    show_wall_clock: bool,
    show_presentation_clock: bool,
    show_slide_clock: bool,
    /// Percent of the second screen used by the bottom pane
    bottom_pane_height: u32,
}

impl Default for ResolvedConfiguration {
    /// Registry defaults with no document path
    fn default() -> Self {
        Self::from_raw(&RawValueSet::from_defaults(
            super::OptionRegistry::standard(),
        ))
    }
}

impl ResolvedConfiguration {
    pub(crate) fn from_raw(raw: &RawValueSet) -> Self {
        // Every unsigned option is seeded with a default, so absence never happens.
        let unsigned = |name: &str| raw.unsigned(name).unwrap_or_default();

        Self {
            document_path: raw.path(names::DOCUMENT_PATH).map(Path::to_path_buf),
            use_full_page: raw.flag(names::FULL_PAGE),
            prerender_previous_pages: unsigned(names::PRERENDER_PREVIOUS_PAGES),
            prerender_next_pages: unsigned(names::PRERENDER_NEXT_PAGES),
            hyperlink_support: raw.flag(names::HYPERLINK_SUPPORT),
            cache_to_memory: raw.flag(names::CACHE_TO_MEMORY),
            i3_workaround: raw.flag(names::I3_WORKAROUND),
            use_second_screen: raw.flag(names::USE_SECOND_SCREEN),
            show_presenter_area: raw.flag(names::PRESENTER_AREA),
            show_thumbnails: raw.flag(names::THUMBNAILS),
            show_wall_clock: raw.flag(names::WALL_CLOCK),
            show_presentation_clock: raw.flag(names::PRESENTATION_CLOCK),
            show_slide_clock: raw.flag(names::SLIDE_CLOCK),
            bottom_pane_height: unsigned(names::BOTTOM_PANE_HEIGHT),
        }
    }

    // =========================================================================
    // Document Path
    // =========================================================================

    /// The document to display.
    ///
    /// Fails with [`UndefinedDocumentPath`] when no positional argument was
    /// given and nothing was injected since.
    pub fn document_path(&self) -> Result<&Path, UndefinedDocumentPath> {
        self.document_path.as_deref().ok_or(UndefinedDocumentPath)
    }

    pub fn document_path_defined(&self) -> bool {
        self.document_path.is_some()
    }

    /// Inject the document path after construction, e.g. from a file picker.
    ///
    /// Must happen before the configuration is shared with other threads.
    /// Repeated calls overwrite the stored path.
    pub fn set_document_path(&mut self, path: impl Into<PathBuf>) {
        self.document_path = Some(path.into());
    }

    // =========================================================================
    // Program Behaviour
    // =========================================================================

    pub fn use_full_page(&self) -> bool {
        self.use_full_page
    }

    pub fn prerender_previous_pages(&self) -> u32 {
        self.prerender_previous_pages
    }

    pub fn prerender_next_pages(&self) -> u32 {
        self.prerender_next_pages
    }

    pub fn hyperlink_support(&self) -> bool {
        self.hyperlink_support
    }

    pub fn cache_to_memory(&self) -> bool {
        self.cache_to_memory
    }

    pub fn i3_workaround(&self) -> bool {
        self.i3_workaround
    }

    /// Shell command to run once both windows exist, if `i3_workaround` is set
    pub fn i3_workaround_shellcode(&self) -> &'static str {
        i3::SHELLCODE
    }

    // =========================================================================
    // Second Screen
    // =========================================================================

    pub fn use_second_screen(&self) -> bool {
        self.use_second_screen
    }

    pub fn show_presenter_area(&self) -> bool {
        self.show_presenter_area
    }

    pub fn show_thumbnails(&self) -> bool {
        self.show_thumbnails
    }

    pub fn show_wall_clock(&self) -> bool {
        self.show_wall_clock
    }

    pub fn show_presentation_clock(&self) -> bool {
        self.show_presentation_clock
    }

    pub fn show_slide_clock(&self) -> bool {
        self.show_slide_clock
    }

    pub fn bottom_pane_height(&self) -> u32 {
        self.bottom_pane_height
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = ResolvedConfiguration::default();
        assert_eq!(config.prerender_previous_pages(), 3);
        assert_eq!(config.prerender_next_pages(), 10);
        assert!(config.hyperlink_support());
        assert!(config.cache_to_memory());
        assert!(!config.i3_workaround());
        assert!(config.use_second_screen());
        assert!(config.show_presenter_area());
        assert!(config.show_thumbnails());
        assert!(config.show_wall_clock());
        assert!(config.show_presentation_clock());
        assert!(config.show_slide_clock());
        assert_eq!(config.bottom_pane_height(), 20);
        assert!(!config.use_full_page());
    }

    #[test]
    fn test_document_path_undefined_then_injected() {
        let mut config = ResolvedConfiguration::default();
        assert!(!config.document_path_defined());
        assert_eq!(config.document_path(), Err(UndefinedDocumentPath));

        config.set_document_path("talk.pdf");
        assert!(config.document_path_defined());
        assert_eq!(config.document_path(), Ok(Path::new("talk.pdf")));

        config.set_document_path("other.pdf");
        assert_eq!(config.document_path(), Ok(Path::new("other.pdf")));
    }

    #[test]
    fn test_i3_shellcode_available() {
        let config = ResolvedConfiguration::default();
        assert!(!config.i3_workaround_shellcode().is_empty());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(ResolvedConfiguration::default()).unwrap();
        assert_eq!(json["bottom_pane_height"], 20);
        assert!(json["document_path"].is_null());
    }
}
