// keyval/src/token.rs

use crate::error::{Error, Result};

pub const SEPARATOR: char = ':';

/// One `key:path` unit from a raw input list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub key: &'a str,
    pub path: &'a str,
}

impl<'a> Token<'a> {
    /// Splits on the first separator only, so `t:C:\data\a.json` keeps its drive letter.
    pub fn parse(raw: &'a str) -> Result<Self> {
        match raw.split_once(SEPARATOR) {
            Some((key, path)) if !key.is_empty() && !path.is_empty() => Ok(Self { key, path }),
            _ => Err(Error::MalformedToken { token: raw.to_string() }),
        }
    }
}

/// Splits a raw space-separated input list into tokens.
pub fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_separator() {
        let t = Token::parse("t:/a.json").unwrap();
        assert_eq!(t, Token { key: "t", path: "/a.json" });

        let t = Token::parse("win:C:\\data\\a.json").unwrap();
        assert_eq!(t.key, "win");
        assert_eq!(t.path, "C:\\data\\a.json");

        let t = Token::parse("k:dir:with:colons/x.json").unwrap();
        assert_eq!(t.path, "dir:with:colons/x.json");
    }

    #[test]
    fn rejects_tokens_without_key_or_path() {
        for raw in ["noseparator", ":/a.json", "key:", ""] {
            match Token::parse(raw) {
                Err(Error::MalformedToken { token }) => assert_eq!(token, raw),
                other => panic!("expected malformed token for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn whitespace_runs_are_one_separator() {
        assert_eq!(split_tokens("  a:x.json   b:y.json\tc:z.json "), vec!["a:x.json", "b:y.json", "c:z.json"]);
        assert!(split_tokens("   ").is_empty());
    }
}
