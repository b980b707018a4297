//! Invitation recipients
//!
//! A [`RecipientSet`] collects the email addresses an invitation goes out to,
//! either one keystroke-confirmed address at a time or from a pasted blob.
//! Every rejected input comes back with a reason so the dialog can explain it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Check whether `input` is an acceptable invitation address.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use taskboard_invite::is_valid_email;
///
/// assert!(is_valid_email(" ada@example.com "));
/// assert!(!is_valid_email("ada@example"));
/// assert!(!is_valid_email("ada lovelace@example.com"));
/// ```
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input.trim())
}

/// Why an address was not added to a [`RecipientSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipientRejection {
    /// Nothing but whitespace was entered
    #[error("Email address is empty")]
    Empty,

    /// The input does not look like an email address
    #[error("Invalid email address: {0}")]
    InvalidFormat(String),

    /// The address is already in the list
    #[error("Email address already added: {0}")]
    Duplicate(String),
}

/// Result of pasting a block of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAddReport {
    /// Addresses appended to the set, in paste order
    pub added: Vec<String>,

    /// Tokens that were dropped, with the reason for each
    pub rejected: Vec<RecipientRejection>,
}

impl BulkAddReport {
    /// Number of addresses that made it into the set.
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Insertion-ordered set of validated email addresses.
///
/// Duplicate detection is a case-sensitive string comparison, so
/// `Ada@example.com` and `ada@example.com` are distinct entries.
///
/// # Examples
///
/// ```
/// use taskboard_invite::RecipientSet;
///
/// let mut recipients = RecipientSet::new();
/// recipients.add_single("a@x.com").unwrap();
/// assert!(recipients.add_single("a@x.com").is_err());
///
/// let report = recipients.add_bulk("b@x.com; not-an-email");
/// assert_eq!(report.added, vec!["b@x.com".to_string()]);
/// assert_eq!(recipients.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientSet {
    emails: Vec<String>,
}

impl RecipientSet {
    /// Creates an empty recipient set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one typed address.
    ///
    /// The input is trimmed before validation. On rejection the set is left
    /// unchanged.
    ///
    /// # Arguments
    ///
    /// * `input` - Raw text from the email field
    ///
    /// # Returns
    ///
    /// The stored (trimmed) address, or the reason it was rejected
    pub fn add_single(&mut self, input: &str) -> Result<String, RecipientRejection> {
        let email = self.check(input)?;
        self.emails.push(email.clone());
        Ok(email)
    }

    /// Add every valid address found in a pasted blob.
    ///
    /// Tokens are separated by any run of commas, semicolons or whitespace
    /// (including newlines and tabs). Invalid tokens and duplicates, whether
    /// of existing entries or of earlier tokens in the same paste, are
    /// dropped and reported.
    pub fn add_bulk(&mut self, raw: &str) -> BulkAddReport {
        let mut report = BulkAddReport::default();

        for token in raw
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            match self.add_single(token) {
                Ok(email) => report.added.push(email),
                Err(rejection) => report.rejected.push(rejection),
            }
        }

        report
    }

    /// Remove an exact-match entry.
    ///
    /// # Returns
    ///
    /// `true` if the address was present
    pub fn remove(&mut self, email: &str) -> bool {
        let before = self.emails.len();
        self.emails.retain(|existing| existing != email);
        self.emails.len() != before
    }

    /// Check if the address is already present (exact match).
    pub fn contains(&self, email: &str) -> bool {
        self.emails.iter().any(|existing| existing == email)
    }

    /// Number of recipients.
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Check if no recipient has been added.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Iterate over recipients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }

    /// Recipients in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.emails
    }

    /// Remove every recipient.
    pub fn clear(&mut self) {
        self.emails.clear();
    }

    fn check(&self, input: &str) -> Result<String, RecipientRejection> {
        let email = input.trim();
        if email.is_empty() {
            return Err(RecipientRejection::Empty);
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(RecipientRejection::InvalidFormat(email.to_string()));
        }
        if self.contains(email) {
            return Err(RecipientRejection::Duplicate(email.to_string()));
        }
        Ok(email.to_string())
    }
}

impl From<RecipientSet> for Vec<String> {
    fn from(set: RecipientSet) -> Self {
        set.emails
    }
}
