//! Email address normalization and masking helpers
//!
//! Addresses are compared and keyed in normalized form (trimmed and
//! lower-cased). Validation is deliberately shallow: the address only has to
//! contain an `@`; deliverability is the mail transport's problem.

/// Normalize an email address for use as a store key.
///
/// Trims surrounding whitespace and lower-cases the whole address so that
/// ` User@Example.COM ` and `user@example.com` map to the same record.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether an address is acceptable as a recipient.
///
/// Only requires a non-empty address containing `@`.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    !trimmed.is_empty() && trimmed.contains('@')
}

/// Mask an email address for logging (keep the first character of the local
/// part and the full domain).
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
