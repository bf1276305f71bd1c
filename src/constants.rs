//! Global Constants
//!
//! Centralized constants for configuration resolution.
//! All magic numbers and well-known strings are defined here.

/// Program identity used in version and help output
pub mod about {
    /// Program name as shown in banners and usage lines
    pub const PROGRAM_NAME: &str = "dspdfviewer";

    /// Crate version, embedded at build time
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub const AUTHOR_LINE: &str = "Written by Danny Edel";

    pub const COPYRIGHT: &str = "Copyright (C) 2012 Danny Edel.\n\
This is free software; see the source for copying conditions.  There is NO\n\
warranty; not even for MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.";

    /// Usage line shown by `--help`
    pub const USAGE: &str = "dspdfviewer [options] pdf-file";

    /// Primer on interactive controls appended to `--help`
    pub const INTERACTIVE_PRIMER: &str = "Interactive Controls:\n\
\tPress F1 or ? during program execution to get a quick\n\
\toverview about available controls.\n\
\tPlease read the manpage (man dspdfviewer) for the full list.";
}

/// Per-user configuration file location
pub mod paths {
    /// Config file path relative to the user's home directory
    pub const CONFIG_FILE_RELATIVE: &str = ".config/dspdfviewer.ini";

    /// Environment variable naming the home directory
    pub const HOME_ENV: &str = "HOME";
}

/// Declared bounds for numeric options
pub mod bounds {
    /// Smallest accepted bottom pane height (percent of the second screen)
    pub const BOTTOM_PANE_MIN_PERCENT: u32 = 1;

    /// Largest accepted bottom pane height (percent of the second screen)
    pub const BOTTOM_PANE_MAX_PERCENT: u32 = 99;
}

/// i3 tiling window manager integration
pub mod i3 {
    const DEFAULT_SHELLCODE: &str = "i3-msg '[class=\"Dspdfviewer\" window_role=\"Audience_Window\"] move to output right, fullscreen'";

    /// Shell command executed once both windows exist.
    ///
    /// Override at build time with `DSPDFVIEWER_I3_SHELLCODE`.
    pub const SHELLCODE: &str = match option_env!("DSPDFVIEWER_I3_SHELLCODE") {
        Some(code) => code,
        None => DEFAULT_SHELLCODE,
    };
}

/// Process exit codes used by the entry point
pub mod exit {
    /// Help or version text was printed instead of running
    pub const INFORMATIONAL: u8 = 1;

    /// No document path was supplied
    pub const NO_DOCUMENT: u8 = 1;

    /// Command line or configuration could not be resolved
    pub const RESOLUTION_FAILED: u8 = 2;
}
