use std::fmt::Write;

/// Escape an identifier (id or class token) for use inside a CSS locator.
///
/// Follows the CSSOM `CSS.escape()` rules: leading digits become hex escapes,
/// ASCII punctuation is backslash-escaped, non-ASCII passes through.
pub fn escape_identifier(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());

    for (i, &c) in chars.iter().enumerate() {
        let leading_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        match c {
            '\0' => out.push('\u{FFFD}'),
            c if c.is_ascii_control() || leading_digit => {
                let _ = write!(out, "\\{:x} ", c as u32);
            }
            '-' if chars.len() == 1 => out.push_str("\\-"),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

/// Escape a value for a double-quoted attribute selector
pub fn escape_attribute_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_untouched() {
        assert_eq!(escape_identifier("hero-title"), "hero-title");
        assert_eq!(escape_identifier("nav_item"), "nav_item");
        assert_eq!(escape_identifier("-webkit"), "-webkit");
        assert_eq!(escape_identifier("über"), "über");
    }

    #[test]
    fn test_utility_tokens_escaped() {
        assert_eq!(escape_identifier("md:flex"), "md\\:flex");
        assert_eq!(escape_identifier("w-1/2"), "w-1\\/2");
        assert_eq!(escape_identifier("hover:bg-[#fff]"), "hover\\:bg-\\[\\#fff\\]");
    }

    #[test]
    fn test_leading_digits() {
        assert_eq!(escape_identifier("1col"), "\\31 col");
        assert_eq!(escape_identifier("-2x"), "-\\32 x");
        assert_eq!(escape_identifier("-"), "\\-");
    }

    #[test]
    fn test_attribute_value() {
        assert_eq!(escape_attribute_value("el-4"), "el-4");
        assert_eq!(escape_attribute_value("a\"b"), "a\\\"b");
    }
}
