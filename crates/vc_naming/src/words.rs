use alloc::string::String;
use alloc::vec::Vec;

/// Characters that separate words and never appear in them.
const SEPARATORS: [char; 11] = [' ', '-', '.', ',', '_', '/', '\\', '=', '+', ':', ';'];

#[inline]
fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Returns `true` for a buffer holding exactly one uppercase letter.
#[inline]
fn is_single_upper(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Splits a raw property name into words.
///
/// A word starts at an uppercase letter or after a separator
/// (space, `-`, `.`, `,`, `_`, `/`, `\`, `=`, `+`, `:`, `;`), separators are
/// dropped. Runs of single uppercase letters form one word, so acronyms stay
/// together. A separator between two letters keeps them apart.
///
/// The result never contains empty words.
///
/// # Examples
///
/// ```
/// use vc_naming::split_words;
///
/// assert_eq!(split_words("parseHTTPResponse"), ["parse", "HTTP", "Response"]);
/// assert_eq!(split_words("ABCWord"), ["ABC", "Word"]);
/// assert_eq!(split_words("__some_Field_Name"), ["some", "Field", "Name"]);
/// assert_eq!(split_words("X_Y"), ["X", "Y"]);
/// assert!(split_words("__").is_empty());
/// ```
pub fn split_words(raw: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    // The last word is an acronym that adjacent single capitals extend.
    let mut acronym = false;
    // A separator was seen since the last character of `word`.
    let mut boundary = false;

    for c in raw.chars().skip_while(|c| is_separator(*c)) {
        if is_separator(c) {
            boundary = true;
            continue;
        }

        let upper = c.is_uppercase();
        if (upper || boundary) && !word.is_empty() {
            let continues = upper && !boundary && is_single_upper(&word);
            flush(&mut words, &mut word, acronym);
            acronym = continues;
        }

        boundary = false;
        word.push(c);
    }

    if !word.is_empty() {
        flush(&mut words, &mut word, acronym);
    }

    words
}

/// Moves `word` into `words`, appending it to the trailing acronym if it is
/// one more capital.
fn flush(words: &mut Vec<String>, word: &mut String, acronym: bool) {
    match words.last_mut() {
        Some(last) if acronym && is_single_upper(word) => {
            last.push_str(word);
            word.clear();
        }
        _ => words.push(core::mem::take(word)),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_words() {
        assert_eq!(split_words("someFieldName"), ["some", "Field", "Name"]);
        assert_eq!(split_words("SomeFieldName"), ["Some", "Field", "Name"]);
        assert_eq!(split_words("field2Name"), ["field2", "Name"]);
        assert_eq!(split_words("x"), ["x"]);
    }

    #[test]
    fn acronyms() {
        assert_eq!(split_words("ABCWord"), ["ABC", "Word"]);
        assert_eq!(split_words("AWord"), ["A", "Word"]);
        assert_eq!(split_words("parseHTTPResponse"), ["parse", "HTTP", "Response"]);
        assert_eq!(split_words("getXY"), ["get", "XY"]);
        assert_eq!(split_words("getX"), ["get", "X"]);
        assert_eq!(split_words("HTTP"), ["HTTP"]);
        assert_eq!(split_words("getXY_"), ["get", "XY"]);
    }

    #[test]
    fn separators() {
        assert_eq!(split_words("some_Field_Name"), ["some", "Field", "Name"]);
        assert_eq!(split_words("some field-name"), ["some", "field", "name"]);
        assert_eq!(split_words("a.b,c/d\\e=f+g:h;i"), ["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        assert_eq!(split_words("--lead__and..trail;;"), ["lead", "and", "trail"]);
    }

    #[test]
    fn separator_blocks_acronym() {
        assert_eq!(split_words("X_Y_Z"), ["X", "Y", "Z"]);
        assert_eq!(split_words("X_YZ"), ["X", "YZ"]);
        assert_eq!(split_words("AB_C"), ["AB", "C"]);
    }

    #[test]
    fn no_empty_words() {
        assert!(split_words("").is_empty());
        assert!(split_words("__").is_empty());
        assert!(split_words(" - ").is_empty());
        for raw in ["ABC", "_A_", "a__b", "Über", "ßtraße", "A1B2"] {
            assert!(split_words(raw).iter().all(|word| !word.is_empty()), "{raw}");
        }
    }
}
