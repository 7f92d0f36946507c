//! Instance body decomposition into `key = value` pairs

/// Ordered property pairs recovered from a declaration body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub pairs: Vec<(String, String)>,
    /// Non-empty statements that did not split into exactly `key=value`
    pub dropped: usize,
}

/// Split an instance body into property assignments
///
/// Whitespace is removed outside string literals only, then the body is
/// split on `;` and each statement on `=`. A statement that does not yield
/// exactly two parts is dropped, so a value containing `=` (even inside
/// quotes) loses the whole line.
pub fn decompose(body: &str) -> Properties {
    let compact = strip_unquoted_whitespace(body);
    let compact = compact.strip_suffix(';').unwrap_or(&compact);

    let mut props = Properties::default();
    for line in compact.split(';') {
        let parts: Vec<&str> = line.split('=').collect();
        if let [key, value] = parts.as_slice() {
            props.pairs.push((key.to_string(), value.to_string()));
        } else if !line.is_empty() {
            tracing::debug!(statement = line, parts = parts.len(), "dropping property statement");
            props.dropped += 1;
        }
    }
    props
}

/// Remove whitespace that is not enclosed in double quotes
///
/// A quote preceded by a backslash does not toggle the quoted state.
pub fn strip_unquoted_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quoted = false;
    let mut escaped = false;

    for c in text.chars() {
        if quoted {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                quoted = false;
            }
            out.push(c);
        } else if c == '"' {
            quoted = true;
            out.push(c);
        } else if !c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

/// Value of the first property with the given key
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
