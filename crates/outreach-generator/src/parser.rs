//! Parse model output into email records
//!
//! The model is asked for `---EMAIL n---` blocks with a `SUBJECT:` line. It
//! does not always comply, so parsing never fails: unrecognizable input yields
//! fewer records, possibly none.

use outreach_domain::EmailRecord;

/// Number of emails a generation is expected to produce
pub const MAX_EMAILS: usize = 3;

const EMAIL_DELIMITER: &str = "---EMAIL";
const SUBJECT_MARKER: &str = "SUBJECT:";
const FALLBACK_SUBJECT_MARKER: &str = "Subject:";

/// Parse a raw model response into at most [`MAX_EMAILS`] records, in order
///
/// # Examples
///
/// ```
/// use outreach_generator::parse_email_response;
///
/// let emails = parse_email_response("---EMAIL 1---\nSUBJECT: Hi\n\nHello Jane");
/// assert_eq!(emails.len(), 1);
/// assert_eq!(emails[0].subject, "Hi");
/// assert_eq!(emails[0].body, "Hello Jane");
///
/// assert!(parse_email_response("").is_empty());
/// ```
pub fn parse_email_response(response: &str) -> Vec<EmailRecord> {
    let mut emails = parse_delimited(response);

    // The model ignored the delimiters; fall back to plain "Subject:" lines
    if emails.is_empty() {
        emails = parse_subject_lines(response);
    }

    emails.truncate(MAX_EMAILS);
    emails
}

/// Primary format: `---EMAIL n---` headers, optional `SUBJECT:` first line
fn parse_delimited(response: &str) -> Vec<EmailRecord> {
    response
        .split(EMAIL_DELIMITER)
        .skip(1) // preamble
        .filter_map(|section| {
            // First line is the rest of the header (" 1---")
            let (_, content) = section.trim().split_once('\n')?;
            let content = content.trim();

            let email = match content.strip_prefix(SUBJECT_MARKER) {
                Some(rest) => {
                    let (subject, body) = split_first_line(rest);
                    EmailRecord::new(subject, body)
                }
                None => EmailRecord::new("", content),
            };
            Some(email)
        })
        .collect()
}

/// Fallback format: every `Subject:` starts a new email
fn parse_subject_lines(response: &str) -> Vec<EmailRecord> {
    response
        .split(FALLBACK_SUBJECT_MARKER)
        .skip(1)
        .map(|part| {
            let (subject, body) = split_first_line(part.trim());
            EmailRecord::new(subject, body)
        })
        .collect()
}

/// Split into (trimmed first line, trimmed remainder)
fn split_first_line(text: &str) -> (&str, &str) {
    match text.split_once('\n') {
        Some((first, rest)) => (first.trim(), rest.trim()),
        None => (text.trim(), ""),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing arbitrary text never panics and never exceeds the cap
        #[test]
        fn test_parse_is_total(text in ".{0,400}") {
            let emails = parse_email_response(&text);
            prop_assert!(emails.len() <= MAX_EMAILS);
        }

        /// Property: marker-heavy text still respects the cap and trims fields
        #[test]
        fn test_parse_marker_soup(parts in prop::collection::vec(
            prop_oneof![
                Just("---EMAIL".to_string()),
                Just("SUBJECT:".to_string()),
                Just("Subject:".to_string()),
                Just("\n".to_string()),
                "[a-z ]{0,12}",
            ],
            0..40,
        )) {
            let text = parts.concat();
            for email in parse_email_response(&text) {
                prop_assert_eq!(email.subject.trim(), email.subject.as_str());
                prop_assert_eq!(email.body.trim(), email.body.as_str());
            }
        }
    }
}
