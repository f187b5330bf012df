use alloc::string::String;

use crate::split_words;

// -----------------------------------------------------------------------------
// CaseStyle

/// How words are rendered into a serialized name.
///
/// - `separator`: put between words, words are concatenated when `None`.
/// - `capitalize_first`: upper-case the first letter of the first word.
/// - `capitalize_rest`: upper-case the first letter of every other word.
///
/// Letters that do not start a word are always lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseStyle {
    pub separator: Option<char>,
    pub capitalize_first: bool,
    pub capitalize_rest: bool,
}

impl CaseStyle {
    #[inline]
    pub const fn new(separator: Option<char>, capitalize_first: bool, capitalize_rest: bool) -> Self {
        Self {
            separator,
            capitalize_first,
            capitalize_rest,
        }
    }
}

// -----------------------------------------------------------------------------
// transform

/// Renders `raw` in the given case style.
///
/// The words come from [`split_words`]. Leading and trailing underscores of
/// `raw` are kept as they are.
///
/// # Examples
///
/// ```
/// use vc_naming::{CaseStyle, transform};
///
/// let snake = CaseStyle::new(Some('_'), false, false);
/// assert_eq!(transform("__someFieldName_", snake), "__some_field_name_");
///
/// let pascal = CaseStyle::new(None, true, true);
/// assert_eq!(transform("some-field-name", pascal), "SomeFieldName");
/// ```
pub fn transform(raw: &str, style: CaseStyle) -> String {
    let leading = raw.bytes().take_while(|b| *b == b'_').count();
    let trailing = raw[leading..].bytes().rev().take_while(|b| *b == b'_').count();

    let mut name = String::with_capacity(raw.len() + 4);
    name.extend(core::iter::repeat_n('_', leading));

    for (index, word) in split_words(raw).iter().enumerate() {
        let capitalize = if index == 0 {
            style.capitalize_first
        } else {
            if let Some(separator) = style.separator {
                name.push(separator);
            }
            style.capitalize_rest
        };
        push_word(&mut name, word, capitalize);
    }

    name.extend(core::iter::repeat_n('_', trailing));
    name
}

fn push_word(name: &mut String, word: &str, capitalize: bool) {
    let mut first_letter = true;
    for c in word.chars() {
        if !c.is_alphabetic() {
            name.push(c);
        } else if first_letter && capitalize {
            name.extend(c.to_uppercase());
            first_letter = false;
        } else {
            name.extend(c.to_lowercase());
            first_letter = false;
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    const PASCAL: CaseStyle = CaseStyle::new(None, true, true);
    const CAMEL_HYPHEN: CaseStyle = CaseStyle::new(Some('-'), false, true);
    const LOWER_SPACES: CaseStyle = CaseStyle::new(Some(' '), false, false);

    #[test]
    fn word_casing() {
        assert_eq!(transform("some_Field_Name", PASCAL), "SomeFieldName");
        assert_eq!(transform("SomeFieldName", CAMEL_HYPHEN), "some-Field-Name");
        assert_eq!(transform("parseHTTPResponse", PASCAL), "ParseHttpResponse");
        assert_eq!(transform("parseHTTPResponse", LOWER_SPACES), "parse http response");
    }

    #[test]
    fn non_letters_kept_in_place() {
        assert_eq!(transform("2fast4you", PASCAL), "2Fast4you");
        assert_eq!(transform("field2Name", CAMEL_HYPHEN), "field2-Name");
    }

    #[test]
    fn case_mapping_may_expand() {
        assert_eq!(transform("ßtraße", PASCAL), "SStraße");
    }

    #[test]
    fn underscore_padding() {
        assert_eq!(transform("_id", PASCAL), "_Id");
        assert_eq!(transform("__user_name__", CAMEL_HYPHEN), "__user-Name__");
        assert_eq!(transform("-_x_-", PASCAL), "X");
    }

    #[test]
    fn only_padding_for_empty_words() {
        assert_eq!(transform("", PASCAL), "");
        assert_eq!(transform("___", LOWER_SPACES), "___");
        assert_eq!(transform("--", LOWER_SPACES), "");
    }
}
