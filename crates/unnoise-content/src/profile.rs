//! Language profiles: which comment and string syntax applies to a file

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Comment and string-literal syntax shared by a family of languages.
///
/// Each variant is described by its line-comment markers, block-comment
/// delimiters and quote delimiters; a single tokenizer in
/// [`crate::normalize`] is driven by these tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentGrammar {
    /// `#` comments, triple-quoted strings (Python, Ruby, shell, YAML, TOML)
    Hash,
    /// `//` and `/* */` comments (C family, JS/TS, Rust, Go, CSS)
    CStyle,
    /// C-style plus `{/* */}` JSX comments
    Jsx,
    /// `<!-- -->` comments (HTML, XML, SVG, Vue, Svelte)
    Markup,
    /// `--` and `/* */` comments
    Sql,
    /// `--` comments
    Lua,
}

impl CommentGrammar {
    /// All grammars, in declaration order.
    pub const ALL: [CommentGrammar; 6] = [
        Self::Hash,
        Self::CStyle,
        Self::Jsx,
        Self::Markup,
        Self::Sql,
        Self::Lua,
    ];

    /// Markers that start a comment running to end of line.
    pub fn line_markers(&self) -> &'static [&'static str] {
        match self {
            Self::Hash => &["#"],
            Self::CStyle | Self::Jsx => &["//"],
            Self::Markup => &[],
            Self::Sql | Self::Lua => &["--"],
        }
    }

    /// Open/close pairs of block comments, highest priority first.
    pub fn block_delimiters(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Hash | Self::Lua => &[],
            Self::CStyle | Self::Sql => &[("/*", "*/")],
            Self::Jsx => &[("{/*", "*/}"), ("/*", "*/")],
            Self::Markup => &[("<!--", "-->")],
        }
    }

    /// String delimiters, highest priority first.
    ///
    /// Multi-character delimiters (triple quotes) close only on the same
    /// sequence and ignore escapes; single-character quotes honour
    /// backslash escapes.
    pub fn quotes(&self) -> &'static [&'static str] {
        match self {
            Self::Hash => &["\"\"\"", "'''", "'", "\""],
            _ => &["'", "\""],
        }
    }

    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::CStyle => "c-style",
            Self::Jsx => "jsx",
            Self::Markup => "markup",
            Self::Sql => "sql",
            Self::Lua => "lua",
        }
    }

    /// Parse a configuration value where `"none"` means pass-through.
    pub fn parse_choice(value: &str) -> Result<Option<Self>> {
        if value.trim().eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for CommentGrammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == wanted)
            .ok_or_else(|| Error::UnknownGrammar(s.to_string()))
    }
}

impl std::fmt::Display for CommentGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in extension table.
const BUILTIN: &[(CommentGrammar, &[&str])] = &[
    (
        CommentGrammar::Hash,
        &["py", "pyw", "rb", "sh", "yaml", "yml", "toml", "dockerfile"],
    ),
    (
        CommentGrammar::CStyle,
        &[
            "c", "cpp", "h", "hpp", "js", "ts", "java", "cs", "go", "rs", "swift", "kt", "scala",
            "dart", "php", "css", "scss", "less",
        ],
    ),
    (CommentGrammar::Jsx, &["jsx", "tsx"]),
    (
        CommentGrammar::Markup,
        &["html", "xml", "svg", "vue", "svelte"],
    ),
    (CommentGrammar::Sql, &["sql"]),
    (CommentGrammar::Lua, &["lua"]),
];

fn canonical_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Look up the built-in grammar for a file extension.
///
/// Case-insensitive, leading dot optional. Unknown extensions return `None`,
/// meaning only whitespace is normalized.
pub fn profile_for(extension: &str) -> Option<CommentGrammar> {
    let ext = canonical_extension(extension);
    BUILTIN
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(grammar, _)| *grammar)
}

/// Built-in extension table plus per-repository overrides.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    overrides: HashMap<String, Option<CommentGrammar>>,
}

impl ProfileRegistry {
    /// Registry with only the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `extension` to `grammar`, or to pass-through when `None`.
    pub fn with_override(mut self, extension: &str, grammar: Option<CommentGrammar>) -> Self {
        self.insert(extension, grammar);
        self
    }

    /// In-place form of [`ProfileRegistry::with_override`].
    pub fn insert(&mut self, extension: &str, grammar: Option<CommentGrammar>) {
        self.overrides
            .insert(canonical_extension(extension), grammar);
    }

    /// Grammar for `extension`; overrides win over the built-in table.
    pub fn profile_for(&self, extension: &str) -> Option<CommentGrammar> {
        match self.overrides.get(&canonical_extension(extension)) {
            Some(choice) => *choice,
            None => profile_for(extension),
        }
    }

    /// Grammar for an optional extension (files without one are pass-through).
    pub fn profile_for_extension(&self, extension: Option<&str>) -> Option<CommentGrammar> {
        extension.and_then(|ext| self.profile_for(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("py", Some(CommentGrammar::Hash))]
    #[case(".py", Some(CommentGrammar::Hash))]
    #[case("PY", Some(CommentGrammar::Hash))]
    #[case("Dockerfile", Some(CommentGrammar::Hash))]
    #[case("rs", Some(CommentGrammar::CStyle))]
    #[case("tsx", Some(CommentGrammar::Jsx))]
    #[case("svelte", Some(CommentGrammar::Markup))]
    #[case("sql", Some(CommentGrammar::Sql))]
    #[case("lua", Some(CommentGrammar::Lua))]
    #[case("md", None)]
    #[case("", None)]
    fn test_builtin_lookup(#[case] ext: &str, #[case] expected: Option<CommentGrammar>) {
        assert_eq!(profile_for(ext), expected);
    }

    #[test]
    fn test_every_builtin_extension_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for (_, exts) in BUILTIN {
            for ext in *exts {
                assert!(seen.insert(*ext), "duplicate extension {ext}");
            }
        }
    }

    #[test]
    fn test_override_wins() {
        let registry = ProfileRegistry::new()
            .with_override(".PYI", Some(CommentGrammar::Hash))
            .with_override("py", None);

        assert_eq!(registry.profile_for("pyi"), Some(CommentGrammar::Hash));
        assert_eq!(registry.profile_for("py"), None);
        assert_eq!(registry.profile_for("rs"), Some(CommentGrammar::CStyle));
    }

    #[test]
    fn test_missing_extension_is_pass_through() {
        assert_eq!(ProfileRegistry::new().profile_for_extension(None), None);
    }

    #[test]
    fn test_grammar_names_round_trip() {
        for grammar in CommentGrammar::ALL {
            assert_eq!(grammar.name().parse::<CommentGrammar>(), Ok(grammar));
        }
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(CommentGrammar::parse_choice("none"), Ok(None));
        assert_eq!(
            CommentGrammar::parse_choice("C-Style"),
            Ok(Some(CommentGrammar::CStyle))
        );
        assert_eq!(
            CommentGrammar::parse_choice("cobol"),
            Err(Error::UnknownGrammar("cobol".to_string()))
        );
    }
}
