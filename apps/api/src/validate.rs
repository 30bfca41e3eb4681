//! Advisory resume validation.
//!
//! Format checks on profile fields, surfaced to the user as suggestions.
//! Persistence never enforces any of this — an empty or odd-looking
//! document is still a storable document.

use serde::Serialize;

use crate::models::resume::Resume;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Loose email shape check: one `@`, a non-empty local part, a dotted
/// domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    domain.contains('.') && labels.all(|l| !l.is_empty())
}

pub fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

/// Phone numbers keep their formatting in the document; validity only asks
/// that stripping separators leaves 7 to 15 digits, optionally after a `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Checks the fields worth flagging: name and role present, contact
/// channels well-formed when supplied.
pub fn validate_resume(resume: &Resume) -> ValidationReport {
    let mut errors = Vec::new();

    if resume.profile.name.trim().is_empty() {
        errors.push("Name is required.".to_string());
    }
    if resume.profile.role.trim().is_empty() {
        errors.push("Role is required.".to_string());
    }

    if let Some(email) = non_empty(resume.profile.contact.get("email")) {
        if !is_valid_email(email) {
            errors.push("Email address looks malformed.".to_string());
        }
    }
    if let Some(phone) = non_empty(resume.profile.contact.get("phone")) {
        if !is_valid_phone(phone) {
            errors.push("Phone number looks malformed.".to_string());
        }
    }
    for channel in ["github", "blog"] {
        if let Some(url) = non_empty(resume.profile.contact.get(channel)) {
            if !is_valid_url(url) {
                errors.push(format!("The {channel} link should be a full URL."));
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
