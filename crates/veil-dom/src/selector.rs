//! CSS Selector subset
//!
//! Parses and matches the selector shapes the accessibility layer is
//! configured with: selector lists (`,`), compound simple selectors
//! (`*`, tag, `#id`, `.class`, `[attr]`, `[attr=value]`) and `:not()`.
//! Combinators are rejected at parse time.

use crate::ElementData;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported selector syntax: {0}")]
    Unsupported(String),

    #[error("malformed selector: {0}")]
    Malformed(String),
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

/// One compound selector (no combinators)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
    not: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrTest {
    Present(String),
    Equals(String, String),
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut alternatives = Vec::new();
        for part in split_list(input) {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::Malformed("empty list entry".into()));
            }
            alternatives.push(parse_compound(part)?);
        }
        Ok(Self { alternatives })
    }

    /// Test an element against the selector list
    pub fn matches(&self, element: &ElementData) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }
}

impl Compound {
    fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&el.name) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        if self.classes.iter().any(|c| !el.classes.contains(c)) {
            return false;
        }
        for test in &self.attrs {
            let ok = match test {
                AttrTest::Present(name) => el.has_attr(name),
                AttrTest::Equals(name, value) => el.attr(name) == Some(value.as_str()),
            };
            if !ok {
                return false;
            }
        }
        !self.not.iter().any(|n| n.matches(el))
    }
}

/// Split a selector list on top-level commas (brackets, parens and quotes
/// are respected)
fn split_list(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(input: &str) -> Result<Compound, SelectorError> {
    let chars: Vec<char> = input.chars().collect();
    let mut compound = Compound::default();
    let mut i = 0usize;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => {
                return Err(SelectorError::Unsupported(format!(
                    "combinators are not supported: {input:?}"
                )));
            }
            '>' | '+' | '~' => {
                return Err(SelectorError::Unsupported(format!(
                    "combinators are not supported: {input:?}"
                )));
            }
            '*' => {
                if i != 0 {
                    return Err(SelectorError::Malformed(input.to_string()));
                }
                i += 1;
            }
            '#' => {
                let (ident, next) = read_ident(&chars, i + 1);
                if ident.is_empty() {
                    return Err(SelectorError::Malformed(input.to_string()));
                }
                compound.id = Some(ident);
                i = next;
            }
            '.' => {
                let (ident, next) = read_ident(&chars, i + 1);
                if ident.is_empty() {
                    return Err(SelectorError::Malformed(input.to_string()));
                }
                compound.classes.push(ident);
                i = next;
            }
            '[' => {
                let end = find_close(&chars, i, '[', ']')
                    .ok_or_else(|| SelectorError::Malformed(input.to_string()))?;
                let inner: String = chars[i + 1..end].iter().collect();
                compound.attrs.push(parse_attr_test(inner.trim())?);
                i = end + 1;
            }
            ':' => {
                let rest: String = chars[i + 1..].iter().collect();
                if !rest.to_ascii_lowercase().starts_with("not(") {
                    return Err(SelectorError::Unsupported(format!(
                        "only :not() is supported: {input:?}"
                    )));
                }
                let open = i + 4; // index of '('
                let end = find_close(&chars, open, '(', ')')
                    .ok_or_else(|| SelectorError::Malformed(input.to_string()))?;
                let inner: String = chars[open + 1..end].iter().collect();
                compound.not.push(parse_compound(inner.trim())?);
                i = end + 1;
            }
            c if is_ident_char(c) => {
                if i != 0 {
                    return Err(SelectorError::Malformed(input.to_string()));
                }
                let (ident, next) = read_ident(&chars, i);
                compound.tag = Some(ident.to_ascii_lowercase());
                i = next;
            }
            _ => return Err(SelectorError::Malformed(input.to_string())),
        }
    }

    Ok(compound)
}

fn read_ident(chars: &[char], from: usize) -> (String, usize) {
    let mut i = from;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[from..i].iter().collect(), i)
}

/// Find the index of the close delimiter matching the open one at `open`
fn find_close(chars: &[char], open: usize, open_c: char, close_c: char) -> Option<usize> {
    debug_assert_eq!(chars.get(open), Some(&open_c));
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, c) if c == open_c => depth += 1,
            (None, c) if c == close_c => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_attr_test(inner: &str) -> Result<AttrTest, SelectorError> {
    if inner.is_empty() {
        return Err(SelectorError::Malformed("empty attribute test".into()));
    }
    match inner.split_once('=') {
        None => Ok(AttrTest::Present(inner.to_string())),
        Some((name, value)) => {
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                return Err(SelectorError::Malformed(inner.to_string()));
            }
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Ok(AttrTest::Equals(name.to_string(), value.to_string()))
        }
    }
}
