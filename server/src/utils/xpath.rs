//! XPath utility functions

/// Escape single quotes for interpolation into a single-quoted XPath literal.
///
/// Each `'` becomes `\'`. XPath 1.0 has no escape syntax inside literals, so
/// this only keeps the generated expression well-formed for the upstream
/// service, which accepts the backslash form. It is not a general sanitizer.
///
/// # Example
///
/// ```
/// use assetlens_server::utils::xpath::escape_literal;
///
/// let name = "McDonald's";
/// let cond = format!("@Name='{}'", escape_literal(name));
/// assert_eq!(cond, "@Name='McDonald\\'s'");
/// ```
pub fn escape_literal(s: &str) -> String {
    s.replace('\'', "\\'")
}
