//! Split a source line into lowercase tokens using PEST.
//!
//! Blank lines, whitespace-only lines and lines whose first character is `#` carry no
//! command and yield `None`.

use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "ctp.pest"]
struct LineParser;

/// Case-fold and tokenize one line. Trailing newlines are ignored.
pub fn preprocess(line: &str) -> Result<Option<Vec<String>>, String> {
    let folded = line.to_lowercase();
    let pairs = LineParser::parse(Rule::line, &folded).map_err(|e| format!("Parse error: {}", e))?;
    let pair = pairs.into_iter().next().ok_or("Empty parse")?;

    let mut tokens = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::comment => return Ok(None),
            Rule::tokens => tokens.extend(inner.into_inner().map(|t| t.as_str().to_string())),
            _ => {}
        }
    }
    Ok((!tokens.is_empty()).then_some(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Option<Vec<String>> {
        preprocess(line).expect("preprocess")
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(tokens(""), None);
        assert_eq!(tokens("\n"), None);
        assert_eq!(tokens("   \t  \r\n"), None);
        assert_eq!(tokens("# set on 1"), None);
        assert_eq!(tokens("#\n"), None);
    }

    #[test]
    fn folds_case_and_splits_on_whitespace() {
        assert_eq!(
            tokens("SET On 1  2\tOFF rest\n"),
            Some(vec!["set".into(), "on".into(), "1".into(), "2".into(), "off".into(), "rest".into()])
        );
        assert_eq!(tokens("  delay 100  "), Some(vec!["delay".into(), "100".into()]));
        assert_eq!(tokens("vin"), Some(vec!["vin".into()]));
    }

    #[test]
    fn hash_only_comments_in_first_column() {
        assert_eq!(tokens("  # note"), Some(vec!["#".into(), "note".into()]));
        assert_eq!(tokens("check#1"), Some(vec!["check#1".into()]));
    }
}
