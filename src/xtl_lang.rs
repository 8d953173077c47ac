// Display language resolution
// Picks the 2-letter language code from loose `-lang=XX` style flags and checks it
// against the language resource files shipped in the configured directory

use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use crate::xtl_log::LogSink;

/// Language used when no single, resolvable override is given
pub const DEFAULT_LANGUAGE: &str = "EN";

// Accepted spellings: -la, -lang, -language, -LANGUAGE (case-sensitive)
static LANGUAGE_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-(?:la(?:ng(?:uage)?)?|LANGUAGE) *= *(?P<code>[A-Z]{2})$").unwrap()
});

/// Resolved display language (always two uppercase ASCII letters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageConfig {
    code: String,
}

impl LanguageConfig {
    pub fn code(&self) -> &str {
        &self.code
    }

    /// File name of the resource backing this language, e.g. `EN.txt`
    pub fn resource_file_name(&self) -> String {
        format!("{}.txt", self.code)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig {
            code: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl fmt::Display for LanguageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Snapshot of the language resource directory
/// Entries are raw file names; only 6-character names count as language files (`XX.txt`)
#[derive(Debug, Clone, Default)]
pub struct AvailableLanguages {
    entries: Vec<String>,
}

impl AvailableLanguages {
    /// List the immediate entries of `dir` (non-recursive)
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(AvailableLanguages { entries })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AvailableLanguages {
            entries: names.into_iter().map(Into::into).collect(),
        }
    }

    /// True when some entry is exactly 6 characters long and starts with `code`
    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|name| {
            name.chars().count() == 6 && name.chars().take(2).eq(code.chars())
        })
    }

    /// Language codes of every entry that looks like a language file
    pub fn codes(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|name| name.chars().count() == 6)
            .map(|name| name.chars().take(2).collect())
            .collect()
    }
}

/// Extract the language code of every argument that is a language flag, in order
pub fn language_candidates<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .filter_map(|arg| LANGUAGE_FLAG.captures(arg.as_ref()))
        .map(|caps| caps["code"].to_string())
        .collect()
}

/// Resolve the display language from the launch arguments
/// - several language flags: conflict is logged, default is used
/// - one flag: used only if `language_dir` holds a matching resource file
/// - no flag: default, silently
pub fn resolve_language<S: AsRef<str>>(
    args: &[S],
    language_dir: &Path,
    log: &dyn LogSink,
) -> LanguageConfig {
    let candidates = language_candidates(args);
    if candidates.len() > 1 {
        log.log(&format!(
            "Different languages conflicts: [{}]",
            candidates.join(", ")
        ));
    }

    if let [code] = candidates.as_slice() {
        let available = match AvailableLanguages::scan(language_dir) {
            Ok(available) => available,
            Err(e) => {
                log::debug!("cannot list language directory {}: {e}", language_dir.display());
                AvailableLanguages::default()
            }
        };
        if available.contains(code) {
            log::debug!("language {code} selected from launch arguments");
            return LanguageConfig { code: code.clone() };
        }
        log.log(&format!("Cannot find the language file {code}.txt!"));
    }

    LanguageConfig::default()
}
