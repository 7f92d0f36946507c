//! Decompiled script scraping.
//!
//! Recovers constants, item instances, prototypes and functions from a
//! decompiled script dump by pattern matching over the raw text. Each pass
//! is an independent `&str -> Vec<record>` function; malformed declarations
//! simply do not match or lose the offending statement.

pub mod category;
pub mod constants;
pub mod functions;
pub mod instances;
pub mod properties;

pub use category::{category_by_tag, category_label, classify, ItemCategory, CATEGORY_TAGS};
pub use constants::{extract_constants, find_constant, ConstantValue, SourceConstant, INT_KIND};
pub use functions::{extract_functions, SourceFunction};
pub use instances::{
    extract_instances, extract_prototypes, find_instance, has_item_prefix, SourceInstance,
    ITEM_PREFIX, ITEM_SENTINEL,
};
pub use properties::{decompose, strip_unquoted_whitespace, Properties};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Script source is not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),
}

/// Everything recovered from one script file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSource {
    pub constants: Vec<SourceConstant>,
    pub instances: Vec<SourceInstance>,
    pub prototypes: Vec<SourceInstance>,
    pub functions: Vec<SourceFunction>,
}

impl ScriptSource {
    /// Run every extraction pass over the source text
    pub fn parse(source: &str) -> Self {
        let parsed = ScriptSource {
            constants: extract_constants(source),
            instances: extract_instances(source),
            prototypes: extract_prototypes(source),
            functions: extract_functions(source),
        };

        tracing::info!(
            constants = parsed.constants.len(),
            instances = parsed.instances.len(),
            prototypes = parsed.prototypes.len(),
            functions = parsed.functions.len(),
            dropped_lines = parsed.dropped_lines(),
            "parsed script source"
        );

        parsed
    }

    /// Decode raw file bytes and parse them
    ///
    /// A leading UTF-8 byte order mark is skipped. Bytes that are not valid
    /// UTF-8 are the only hard failure.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScriptError> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let text = std::str::from_utf8(data)?;
        Ok(Self::parse(text))
    }

    /// Total property statements dropped across all instances
    pub fn dropped_lines(&self) -> usize {
        self.instances.iter().map(|i| i.dropped_lines).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
            && self.instances.is_empty()
            && self.prototypes.is_empty()
            && self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "const string NAME_SWORD = \"Iron Sword\";\r\nconst int VALUE_SWORD = 120;\r\n\r\ninstance ITMW_SWORD01(Item) {\r\n\tname = NAME_SWORD;\r\n\tvalue = VALUE_SWORD;\r\n};\r\n\r\nfunc void Use_Sword() {\r\n\tB_Say();\r\n};\r\n\r\n";

    #[test]
    fn test_parse_all_passes() {
        let parsed = ScriptSource::parse(SOURCE);
        assert_eq!(parsed.constants.len(), 2);
        assert_eq!(parsed.instances.len(), 1);
        assert_eq!(parsed.functions.len(), 1);
        assert!(parsed.prototypes.is_empty());
        assert_eq!(parsed.dropped_lines(), 0);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = ScriptSource::parse(SOURCE);
        let b = ScriptSource::parse(SOURCE);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_from_bytes_with_bom() {
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend_from_slice(SOURCE.as_bytes());
        let parsed = ScriptSource::from_bytes(&data).unwrap();
        assert_eq!(parsed.constants[0].name, "NAME_SWORD");
    }

    #[test]
    fn test_from_bytes_rejects_binary() {
        let result = ScriptSource::from_bytes(&[0x66, 0xFF, 0xFE, 0x00]);
        assert!(matches!(result, Err(ScriptError::NotText(_))));
    }

    #[test]
    fn test_garbage_text_is_empty_not_error() {
        let parsed = ScriptSource::parse("this is not a script at all {{{ ;;; }}}");
        assert!(parsed.is_empty());
    }
}
