//! `func` declarations

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// The closing `};` must be followed by an empty CRLF line, as in decompiler output
static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?R)func (.+?) (.+?)\((.+?)?\) \{([\s\S]+?)\};\r\n\r\n").unwrap()
});

/// A declared script function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFunction {
    pub return_type: String,
    pub name: String,
    /// `None` for an empty parameter list
    pub params: Option<String>,
    pub body: String,
}

/// Extract every function declaration, in source order
pub fn extract_functions(source: &str) -> Vec<SourceFunction> {
    FUNC_RE
        .captures_iter(source)
        .map(|caps| SourceFunction {
            return_type: caps[1].to_string(),
            name: caps[2].to_string(),
            params: caps.get(3).map(|m| m.as_str().to_string()),
            body: caps[4].to_string(),
        })
        .collect()
}
