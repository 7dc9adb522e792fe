//! Provider-facing phone number formatting

/// Prefix a country calling code onto locally entered digits
///
/// This is presentation for SMS providers only. The digits themselves are
/// passed through untouched; callers keep the raw form as their lookup key.
///
/// ```
/// use platform::phone::with_country_code;
/// assert_eq!(with_country_code("+91", "9000000001"), "+919000000001");
/// assert_eq!(with_country_code("91", "9000000001"), "+919000000001");
/// ```
pub fn with_country_code(country_code: &str, digits: &str) -> String {
    let code = country_code.trim().trim_start_matches('+');
    format!("+{code}{digits}")
}
