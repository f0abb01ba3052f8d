// src/analysis/matcher.rs
//! Text matching behind a small interface, so the scanners never touch the
//! regex engine directly.
//!
//! All spans returned here are byte offsets into the text passed in, shifted
//! by `base` where a method takes one.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::Span;

/// `SELECT <projection> FROM <table>`; the trailing region is resolved separately
/// because it ends at a look-ahead (next `SELECT`) the engine has no syntax for.
static SELECT_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bSELECT\b.+?\bFROM\b\s+(\w+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static SELECT_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b").unwrap_or_else(|_| panic!("Invalid Regex")));
static JOIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\s+(\w+)").unwrap_or_else(|_| panic!("Invalid Regex")));
static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:TYPE|LIKE)\b\s+([A-Z0-9_]+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// One `SELECT ... FROM <table> ...` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectBlock<'t> {
    /// From `SELECT` to the next `SELECT` or end of text.
    pub span: Span,
    /// The identifier after `FROM`, as written.
    pub table: &'t str,
    /// Everything after the table identifier.
    pub rest: Span,
}

/// A keyword followed by an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    /// Keyword through the end of the identifier.
    pub span: Span,
    pub ident: &'t str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `JOIN <table>`
    Join,
    /// `TYPE <field>` or `LIKE <field>`
    Declaration,
}

pub trait Matcher: Send + Sync {
    /// Non-overlapping `SELECT` blocks, left to right.
    fn find_blocks<'t>(&self, text: &'t str) -> Vec<SelectBlock<'t>>;

    /// Every `kind` token in `text`, with spans shifted by `base`.
    fn find_tokens<'t>(&self, kind: TokenKind, text: &'t str, base: usize) -> Vec<Token<'t>>;

    /// Case-insensitive, word-bounded search for `word`.
    fn contains_word(&self, text: &str, word: &str) -> bool;
}

/// `Matcher` backed by the `regex` crate, whose matching time is linear in
/// the input length.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    words: HashMap<String, Regex>,
}

impl RegexMatcher {
    /// Precompiles word patterns for `words`.
    ///
    /// # Errors
    /// Returns error if a word pattern fails to compile.
    pub fn new<'a, I>(words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words = words
            .into_iter()
            .map(|w| word_regex(w).map(|re| (w.to_uppercase(), re)))
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { words })
    }
}

fn word_regex(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
}

impl Matcher for RegexMatcher {
    fn find_blocks<'t>(&self, text: &'t str) -> Vec<SelectBlock<'t>> {
        // `$` without multiline also matches before one final newline.
        let text_end = text.strip_suffix('\n').map_or(text.len(), str::len);
        let mut blocks = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = SELECT_HEAD_RE.captures_at(text, pos) else {
                break;
            };
            let (Some(head), Some(table)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            let next_select = SELECT_KEYWORD_RE
                .find_at(text, table.end())
                .map_or(text.len(), |m| m.start());
            let end = next_select.min(text_end).max(table.end());

            blocks.push(SelectBlock {
                span: Span::new(head.start(), end),
                table: table.as_str(),
                rest: Span::new(table.end(), end),
            });

            // `end` is past the table identifier, so this always advances.
            pos = end;
        }

        blocks
    }

    fn find_tokens<'t>(&self, kind: TokenKind, text: &'t str, base: usize) -> Vec<Token<'t>> {
        let re: &Regex = match kind {
            TokenKind::Join => &*JOIN_RE,
            TokenKind::Declaration => &*DECLARATION_RE,
        };
        re.captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let ident = caps.get(1)?;
                Some(Token {
                    span: Span::new(whole.start(), whole.end()).offset(base),
                    ident: ident.as_str(),
                })
            })
            .collect()
    }

    fn contains_word(&self, text: &str, word: &str) -> bool {
        match self.words.get(&word.to_uppercase()) {
            Some(re) => re.is_match(text),
            None => word_regex(word).is_ok_and(|re| re.is_match(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> RegexMatcher {
        RegexMatcher::new(["VBTYP_EXT"]).unwrap()
    }

    #[test]
    fn block_runs_to_next_select() {
        let text = "SELECT a FROM vbuk WHERE x = 1. SELECT b FROM vbak.";
        let blocks = matcher().find_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].table, "vbuk");
        assert_eq!(blocks[0].span, Span::new(0, 32));
        assert_eq!(&text[blocks[0].rest.start..blocks[0].rest.end], " WHERE x = 1. ");
        assert_eq!(blocks[1].table, "vbak");
        assert_eq!(blocks[1].span.end, text.len());
    }

    #[test]
    fn block_excludes_single_trailing_newline() {
        let text = "SELECT a\n  FROM vbup\n  INTO TABLE t.\n";
        let blocks = matcher().find_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].span.end, text.len() - 1);
    }

    #[test]
    fn select_without_from_is_skipped() {
        assert!(matcher().find_blocks("SELECT a INTO b.").is_empty());
        assert!(matcher().find_blocks("").is_empty());
    }

    #[test]
    fn projection_may_swallow_a_select_without_from() {
        let text = "select x. select y from vbuk.";
        let blocks = matcher().find_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].span.start, 0);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert!(matcher().find_blocks("PRESELECT a FROMAGE vbuk").is_empty());
    }

    #[test]
    fn tokens_are_shifted_by_base() {
        let text = " INNER JOIN vbup ON a = b";
        let toks = matcher().find_tokens(TokenKind::Join, text, 10);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].ident, "vbup");
        assert_eq!(toks[0].span, Span::new(17, 26));
    }

    #[test]
    fn declaration_tokens_accept_type_and_like() {
        let text = "DATA a TYPE vbtyp. DATA b LIKE Vbtyp_Ext. DATA c TYPE REF TO x.";
        let idents: Vec<_> = matcher()
            .find_tokens(TokenKind::Declaration, text, 0)
            .into_iter()
            .map(|t| t.ident)
            .collect();
        assert_eq!(idents, vec!["vbtyp", "Vbtyp_Ext", "REF"]);
    }

    #[test]
    fn contains_word_is_bounded_and_case_insensitive() {
        let m = matcher();
        assert!(m.contains_word("select vbtyp_ext from vbak", "VBTYP_EXT"));
        assert!(!m.contains_word("select vbtyp_ext2 from vbak", "VBTYP_EXT"));
        assert!(m.contains_word("x-other_field", "OTHER_FIELD"));
    }
}
