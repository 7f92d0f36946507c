//! `const <type> <name> = <value>;` declarations

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type token that triggers numeric coercion of the value
pub const INT_KIND: &str = "int";

// CRLF mode keeps `.` from running over `\r` at the end of Windows lines
static CONST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?R)const (.+) (.+) = (.+);").unwrap());

/// Right-hand side of a constant declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Int(i64),
    /// Literal source text, quotes included for string constants
    Text(String),
}

impl ConstantValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstantValue::Int(v) => Some(*v),
            ConstantValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConstantValue::Int(_) => None,
            ConstantValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{}", v),
            ConstantValue::Text(s) => f.write_str(s),
        }
    }
}

/// A file-scope constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConstant {
    pub kind: String,
    pub name: String,
    pub value: ConstantValue,
}

/// Extract every single-line constant declaration, in source order
pub fn extract_constants(source: &str) -> Vec<SourceConstant> {
    CONST_RE
        .captures_iter(source)
        .map(|caps| {
            let kind = caps[1].to_string();
            let name = caps[2].to_string();
            let value = coerce_value(&kind, &name, &caps[3]);
            SourceConstant { kind, name, value }
        })
        .collect()
}

fn coerce_value(kind: &str, name: &str, raw: &str) -> ConstantValue {
    if kind != INT_KIND {
        return ConstantValue::Text(raw.to_string());
    }

    match parse_int(raw) {
        Some(v) => ConstantValue::Int(v),
        None => {
            tracing::debug!(constant = name, value = raw, "int constant is not a literal, keeping text");
            ConstantValue::Text(raw.to_string())
        }
    }
}

/// Parse decimal or `0x` hex integer literals, tolerating surrounding blanks
fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    // Only one leading sign; std parsing would accept another after it
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<i64>().ok()?,
        None => return None,
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// First constant with the given name (earlier declarations win)
pub fn find_constant<'a>(constants: &'a [SourceConstant], name: &str) -> Option<&'a SourceConstant> {
    constants.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_constant() {
        let consts = extract_constants("const int FOO = 5;");
        assert_eq!(
            consts,
            vec![SourceConstant {
                kind: "int".to_string(),
                name: "FOO".to_string(),
                value: ConstantValue::Int(5),
            }]
        );
    }

    #[test]
    fn test_string_constant_keeps_quotes() {
        let consts = extract_constants("const string FOO = \"bar\";");
        assert_eq!(consts.len(), 1);
        assert_eq!(consts[0].kind, "string");
        assert_eq!(consts[0].value, ConstantValue::Text("\"bar\"".to_string()));
    }

    #[test]
    fn test_string_with_spaces() {
        let consts = extract_constants("const string NAME_SWORD = \"Iron Sword\";\r\n");
        assert_eq!(consts[0].name, "NAME_SWORD");
        assert_eq!(consts[0].value.as_text(), Some("\"Iron Sword\""));
    }

    #[test]
    fn test_multiple_lines_in_order() {
        let src = "const int A = 1;\r\nconst float B = 2.5;\nconst int C = -3;\n";
        let consts = extract_constants(src);
        let names: Vec<_> = consts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(consts[1].value, ConstantValue::Text("2.5".to_string()));
        assert_eq!(consts[2].value.as_int(), Some(-3));
    }

    #[test]
    fn test_hex_int() {
        let consts = extract_constants("const int MASK = 0x10;");
        assert_eq!(consts[0].value, ConstantValue::Int(16));
    }

    #[test]
    fn test_repeated_or_misplaced_sign_is_not_a_literal() {
        let consts = extract_constants("const int A = --5;\r\nconst int B = -+7;\r\nconst int C = 0x-5;\r\nconst int D = +5;\r\n");
        let values: Vec<_> = consts.iter().map(|c| c.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                ConstantValue::Text("--5".to_string()),
                ConstantValue::Text("-+7".to_string()),
                ConstantValue::Text("0x-5".to_string()),
                ConstantValue::Int(5),
            ]
        );
    }

    #[test]
    fn test_non_literal_int_falls_back_to_text() {
        let consts = extract_constants("const int B = A + 1;");
        assert_eq!(consts[0].value, ConstantValue::Text("A + 1".to_string()));
    }

    #[test]
    fn test_duplicates_kept_first_wins() {
        let src = "const int A = 1;\nconst int A = 2;\n";
        let consts = extract_constants(src);
        assert_eq!(consts.len(), 2);
        assert_eq!(find_constant(&consts, "A").unwrap().value, ConstantValue::Int(1));
        assert!(find_constant(&consts, "B").is_none());
    }

    #[test]
    fn test_multiline_declaration_not_matched() {
        let consts = extract_constants("const int A =\n 5;");
        assert!(consts.is_empty());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&ConstantValue::Int(5)).unwrap();
        assert_eq!(json, "5");
        let json = serde_json::to_string(&ConstantValue::Text("\"x\"".to_string())).unwrap();
        assert_eq!(json, "\"\\\"x\\\"\"");
    }
}
