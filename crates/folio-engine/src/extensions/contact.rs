// extensions/contact.rs
//
// Contact form validation and the toast notifications it raises.
// Submission is simulated: the bridge waits `SUBMIT_MS` and reports success.

use thiserror::Error;

use super::i18n::Language;

/// Why a contact form was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// At least one of name, email, subject, message is blank.
    #[error("all fields are required")]
    MissingFields,
    #[error("email address is not valid")]
    InvalidEmail,
}

impl ContactError {
    /// Message shown to the visitor.
    pub fn notice(self, lang: Language) -> &'static str {
        match (self, lang) {
            (ContactError::MissingFields, Language::Fa) => "لطفاً تمام فیلدها را پر کنید.",
            (ContactError::MissingFields, Language::En) => "Please fill in all fields.",
            (ContactError::InvalidEmail, Language::Fa) => "لطفاً ایمیل معتبر وارد کنید.",
            (ContactError::InvalidEmail, Language::En) => "Please enter a valid email address.",
        }
    }
}

/// Field values read from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Required fields first, then the email shape.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ContactError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the domain
/// with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

pub fn success_notice(lang: Language) -> &'static str {
    match lang {
        Language::Fa => "پیام شما با موفقیت ارسال شد!",
        Language::En => "Your message was sent successfully!",
    }
}

/// Submit button label while a submission is in flight.
pub fn sending_label(lang: Language) -> &'static str {
    match lang {
        Language::Fa => "در حال ارسال...",
        Language::En => "Sending...",
    }
}

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NoticeKind {
    /// Modifier class, as in `notification notification-success`.
    pub fn class_name(self) -> &'static str {
        match self {
            NoticeKind::Success => "notification-success",
            NoticeKind::Error => "notification-error",
            NoticeKind::Info => "notification-info",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(self) -> &'static str {
        match self {
            NoticeKind::Success => "check-circle",
            NoticeKind::Error => "exclamation-circle",
            NoticeKind::Info => "info-circle",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NoticeKind::Success => "#00b894",
            NoticeKind::Error => "#e17055",
            NoticeKind::Info => "#6c5ce7",
        }
    }
}

/// Simulated round trip of a submission.
pub const SUBMIT_MS: u32 = 2000;
/// Toast slides in this long after it is attached.
pub const NOTICE_ENTER_MS: u32 = 100;
/// Toast starts sliding out this long after it is attached.
pub const NOTICE_LEAVE_MS: u32 = 5000;
/// Toast is detached this long after it starts sliding out.
pub const NOTICE_REMOVE_MS: u32 = 300;

pub const NOTICE_HIDDEN_TRANSFORM: &str = "translateX(100%)";
pub const NOTICE_SHOWN_TRANSFORM: &str = "translateX(0)";

/// Inline style of a freshly created toast (off-screen to the right).
pub fn notice_style(kind: NoticeKind) -> String {
    format!(
        "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
         padding: 15px 20px; border-radius: 8px; box-shadow: 0 5px 15px rgba(0,0,0,0.3); \
         z-index: 10000; transform: {}; transition: transform 0.3s ease;",
        kind.background(),
        NOTICE_HIDDEN_TRANSFORM
    )
}

/// Inner markup of a toast.
pub fn notice_html(kind: NoticeKind, message: &str) -> String {
    format!(
        "<div class=\"notification-content\"><i class=\"fas fa-{}\"></i><span>{}</span></div>",
        kind.icon(),
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert_eq!(form("Sara", "sara@example.com", "Hi", "Hello").validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(form("", "a@b.co", "s", "m").validate(), Err(ContactError::MissingFields));
        assert_eq!(form("n", "a@b.co", "s", "   ").validate(), Err(ContactError::MissingFields));
    }

    #[test]
    fn missing_fields_are_reported_before_a_bad_email() {
        assert_eq!(form("", "nope", "s", "m").validate(), Err(ContactError::MissingFields));
        assert_eq!(form("n", "nope", "s", "m").validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.ir"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn notices_are_bilingual() {
        assert_eq!(ContactError::InvalidEmail.notice(Language::Fa), "لطفاً ایمیل معتبر وارد کنید.");
        assert_eq!(success_notice(Language::En), "Your message was sent successfully!");
        assert_eq!(ContactError::MissingFields.to_string(), "all fields are required");
    }

    #[test]
    fn toast_markup() {
        let html = notice_html(NoticeKind::Error, "<bad>");
        assert!(html.contains("fa-exclamation-circle"));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(notice_style(NoticeKind::Success).contains("#00b894"));
        assert!(notice_style(NoticeKind::Info).contains(NOTICE_HIDDEN_TRANSFORM));
    }
}
