//! Signature computation: comments stripped, literals protected, whitespace removed
//!
//! Text is scanned with one tokenizer per [`CommentGrammar`]. At each
//! position the earliest-starting token wins; when several start at the same
//! position the priority is strings (triple, single, double), then block
//! comments, then line comments. String tokens are copied verbatim so comment
//! markers inside literals are inert. Unterminated strings and block comments
//! run to end of text. Nothing here can fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::CommentGrammar;

fn string_alternative(quote: &str) -> String {
    let escaped = regex::escape(quote);
    if quote.chars().count() == 1 {
        // Backslash escapes anything, including a trailing lone backslash
        format!(r"{escaped}(?:\\(?s:.)?|[^\\{escaped}])*(?:{escaped}|\z)")
    } else {
        format!(r"{escaped}(?s:.*?)(?:{escaped}|\z)")
    }
}

fn build_pattern(grammar: CommentGrammar) -> String {
    let strings: Vec<String> = grammar
        .quotes()
        .iter()
        .map(|q| string_alternative(q))
        .collect();

    let blocks = grammar.block_delimiters();
    let mut comments: Vec<String> = blocks
        .iter()
        .map(|(open, close)| {
            // A wrapper such as `{/*` must close; when it doesn't, the inner
            // `/*` alternative takes over and may run to end of text instead.
            let wraps_other = blocks
                .iter()
                .any(|(other, _)| other != open && open.contains(other));
            let end = if wraps_other {
                regex::escape(close)
            } else {
                format!(r"(?:{}|\z)", regex::escape(close))
            };
            format!(r"{}(?s:.*?){end}", regex::escape(open))
        })
        .collect();
    comments.extend(
        grammar
            .line_markers()
            .iter()
            .map(|marker| format!(r"{}[^\n]*", regex::escape(marker))),
    );

    if comments.is_empty() {
        format!("(?P<string>{})", strings.join("|"))
    } else {
        format!(
            "(?P<string>{})|(?P<comment>{})",
            strings.join("|"),
            comments.join("|")
        )
    }
}

fn compile(grammar: CommentGrammar) -> Regex {
    Regex::new(&build_pattern(grammar)).expect("built-in grammar pattern is valid")
}

static HASH: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::Hash));
static C_STYLE: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::CStyle));
static JSX: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::Jsx));
static MARKUP: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::Markup));
static SQL: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::Sql));
static LUA: LazyLock<Regex> = LazyLock::new(|| compile(CommentGrammar::Lua));

fn token_pattern(grammar: CommentGrammar) -> &'static Regex {
    match grammar {
        CommentGrammar::Hash => &HASH,
        CommentGrammar::CStyle => &C_STYLE,
        CommentGrammar::Jsx => &JSX,
        CommentGrammar::Markup => &MARKUP,
        CommentGrammar::Sql => &SQL,
        CommentGrammar::Lua => &LUA,
    }
}

/// Remove every comment token from `text`, keeping string literals intact.
pub fn strip_comments(text: &str, grammar: CommentGrammar) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in token_pattern(grammar).captures_iter(text) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..token.start()]);
        if caps.name("string").is_some() {
            out.push_str(token.as_str());
        }
        last = token.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Compute the signature of `text`.
///
/// With a profile, comments are removed first; without one only whitespace
/// is removed. Two texts are semantically equal iff their signatures are.
pub fn normalize(text: &str, profile: Option<CommentGrammar>) -> String {
    match profile {
        Some(grammar) => remove_whitespace(&strip_comments(text, grammar)),
        None => remove_whitespace(text),
    }
}

/// Compare two texts by signature.
pub fn semantically_equal(a: &str, b: &str, profile: Option<CommentGrammar>) -> bool {
    a == b || normalize(a, profile) == normalize(b, profile)
}

fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use CommentGrammar::*;

    #[rstest]
    #[case(Hash, "x=1  # set x", "x=1")]
    #[case(Hash, "s = '# not a comment'", "s='#notacomment'")]
    #[case(Hash, "s = \"a\\\"# b\"  # c", "s=\"a\\\"#b\"")]
    #[case(Hash, "doc = \"\"\"# kept\n\"\"\" # gone", "doc=\"\"\"#kept\"\"\"")]
    #[case(CStyle, "foo(\"//not a comment\")  ", "foo(\"//notacomment\")")]
    #[case(CStyle, "a /* b */ c // d\ne", "ace")]
    #[case(CStyle, "a /* multi\nline */ b", "ab")]
    #[case(CStyle, "c = '/*'; d", "c='/*';d")]
    #[case(Jsx, "<div>{/* note */}</div>", "<div></div>")]
    #[case(Jsx, "<div>{/* note */ x}</div>", "<div>{x}</div>")]
    #[case(Markup, "<p>a<!-- b --></p>", "<p>a</p>")]
    #[case(Markup, "<a title=\"<!-- x -->\">", "<atitle=\"<!--x-->\">")]
    #[case(Sql, "SELECT 1 -- one\n/* two */ FROM t", "SELECT1FROMt")]
    #[case(Sql, "SELECT '--' FROM t", "SELECT'--'FROMt")]
    #[case(Lua, "local x = 1 -- note", "localx=1")]
    fn test_normalize(
        #[case] grammar: CommentGrammar,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize(input, Some(grammar)), expected);
    }

    #[test]
    fn test_pass_through_keeps_comments() {
        assert_eq!(normalize("a  # b\n// c", None), "a#b//c");
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        assert_eq!(normalize("a /* open\nb c", Some(CStyle)), "a");
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(normalize("a = \"open // x", Some(CStyle)), "a=\"open//x");
    }

    #[test]
    fn test_unterminated_triple_quote_runs_to_end() {
        assert_eq!(normalize("x = '''doc # x", Some(Hash)), "x='''doc#x");
    }

    #[test]
    fn test_trailing_backslash_in_string() {
        assert_eq!(normalize("s = 'abc\\", Some(Hash)), "s='abc\\");
    }

    #[test]
    fn test_earliest_token_wins() {
        // The comment starts before the quote, so the quote is inside the comment
        assert_eq!(normalize("x # it's\ny = 1", Some(Hash)), "xy=1");
    }

    #[test]
    fn test_strip_comments_preserves_layout_outside_comments() {
        assert_eq!(strip_comments("a = 1  # c\nb = 2\n", Hash), "a = 1  \nb = 2\n");
    }

    #[test]
    fn test_semantically_equal() {
        assert!(semantically_equal("x = 1\n", "x=1  # set\n", Some(Hash)));
        assert!(!semantically_equal("x = \"a\"", "x = \"a // b\"", Some(CStyle)));
    }

    #[test]
    fn test_every_grammar_compiles() {
        for grammar in CommentGrammar::ALL {
            assert_eq!(normalize("", Some(grammar)), "");
        }
    }
}
