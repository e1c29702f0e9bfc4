//! Layout options and the settings store they are read from.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

pub mod keys {
    pub const MULTILINE: &str = "shareable-twoslash-comments/enable-multiline-comments";
    pub const DISABLE_TRUNCATION: &str = "shareable-twoslash-comments/disable-truncation";
    pub const PAUSE_ON_ERROR: &str = "shareable-twoslash-comments/pause-on-error";
    pub const COMPACT_OUTPUT: &str = "shareable-twoslash-comments/compact-output";
}

/// Boolean key-value settings store owned by the host.
pub trait Settings {
    /// Returns `false` for unknown or unset keys.
    fn get_bool(&self, key: &str) -> bool;
}

impl<S: BuildHasher> Settings for HashMap<String, bool, S> {
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).copied().unwrap_or(false)
    }
}

impl Settings for Options {
    fn get_bool(&self, key: &str) -> bool {
        match key {
            keys::MULTILINE => self.multiline,
            keys::DISABLE_TRUNCATION => self.disable_truncation,
            keys::PAUSE_ON_ERROR => self.pause_on_error,
            keys::COMPACT_OUTPUT => self.compact_output,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Keep line breaks of the info, one aligned comment line per info line.
    pub multiline: bool,
    /// Keep single-line info at full length.
    pub disable_truncation: bool,
    /// Keep only the type portion of a declaration.
    pub compact_output: bool,
    /// Skip the whole pass while the document has diagnostics.
    pub pause_on_error: bool,
}

impl Options {
    pub fn from_settings(settings: &dyn Settings) -> Self {
        Self {
            multiline: settings.get_bool(keys::MULTILINE),
            disable_truncation: settings.get_bool(keys::DISABLE_TRUNCATION),
            compact_output: settings.get_bool(keys::COMPACT_OUTPUT),
            pause_on_error: settings.get_bool(keys::PAUSE_ON_ERROR),
        }
    }
}

/// Host-facing description of one option toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub flag: &'static str,
    pub display: &'static str,
    pub blurb: &'static str,
}

pub const OPTION_DESCRIPTORS: [OptionDescriptor; 4] = [
    OptionDescriptor {
        flag: keys::MULTILINE,
        display: "Enable multiline comments",
        blurb: "Preserve multiline types instead of collapsing them to a single line.",
    },
    OptionDescriptor {
        flag: keys::DISABLE_TRUNCATION,
        display: "Disable truncation",
        blurb: "Prevent truncation of single line comments. Otherwise, they will be truncated to 100 characters.",
    },
    OptionDescriptor {
        flag: keys::PAUSE_ON_ERROR,
        display: "Pause on error",
        blurb: "Pause comment generation if there are any errors in the code.",
    },
    OptionDescriptor {
        flag: keys::COMPACT_OUTPUT,
        display: "Compact output",
        blurb: "Show only the type of a declaration, without its name or keyword.",
    },
];
