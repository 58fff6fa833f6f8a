use serde::Deserialize;

pub const NAME_MAX: usize = 80;
pub const EMAIL_MAX: usize = 120;

/// The contact form as posted. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContact {
    pub csrf_token: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact message that passed every field rule and may be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn validate(raw: &RawContact) -> Result<ValidatedContact, Vec<FieldError>> {
    let name = raw.name.trim();
    let email = raw.email.trim();
    let message = raw.message.trim();

    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required."));
    } else if name.chars().count() > NAME_MAX {
        errors.push(FieldError::new("name", "Name must be at most 80 characters."));
    }

    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required."));
    } else {
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", "Please enter a valid email address."));
        }
        if email.chars().count() > EMAIL_MAX {
            errors.push(FieldError::new("email", "Email must be at most 120 characters."));
        }
    }

    if message.is_empty() {
        errors.push(FieldError::new("message", "Message is required."));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedContact {
        name: name.to_owned(),
        email: email.to_owned(),
        message: message.to_owned(),
    })
}

/// Errors attached to one field, in the order they were found.
pub fn errors_for<'a>(errors: &'a [FieldError], field: &'a str) -> impl Iterator<Item = &'a FieldError> {
    errors.iter().filter(move |e| e.field == field)
}

/// `local@domain.tld` syntax check. Narrower than RFC 5322: no quoted
/// local parts, no IP literals.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local.chars().all(|c| c.is_ascii_graphic() && !matches!(c, '(' | ')' | '<' | '>' | ',' | ';' | ':' | '\\' | '"' | '[' | ']'));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    labels_ok && labels.last().is_some_and(|tld| tld.len() >= 2)
}
