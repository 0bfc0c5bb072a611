//! Utility functions and helpers

/// Substrings marking a template value that has not been replaced
pub const PLACEHOLDER_MARKERS: [&str; 2] = ["YOUR_", "_HERE"];

/// Notification address shipped with the template
pub const PLACEHOLDER_EMAIL: &str = "your-email@company.com";

/// Check whether a value still carries a placeholder marker
pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|marker| value.contains(marker))
}

/// Check whether a required value is empty or unreplaced
pub fn is_unset(value: &str) -> bool {
    value.is_empty() || is_placeholder(value)
}

/// Loose email shape check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Check an IANA timezone name for the `Area/Location` shape
pub fn looks_like_iana_timezone(tz: &str) -> bool {
    if tz == "UTC" {
        return true;
    }

    let mut parts = tz.split('/');
    let area = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    !area.is_empty()
        && !rest.is_empty()
        && area.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && rest.iter().all(|p| {
            !p.is_empty()
                && p.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        })
}
