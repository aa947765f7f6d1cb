//! Module dedicated to the embedded-header template parser.
//!
//! In embedded mode a rendered template carries its own addressing:
//! leading lines are header directives (see
//! [`classify`](super::header::classify)), everything after the
//! first regular line is the body.

use tracing::trace;

use super::header::{classify, HeaderKey};

/// The set of directives collected from the leading lines of a
/// rendered template.
///
/// Values are raw strings at this stage: address parsing happens
/// later, when the final message gets assembled.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Directives {
    /// Recipient addresses, one per `to` line, in template order.
    pub to: Vec<String>,

    /// Carbon copy addresses, one per `cc` line, in template order.
    pub cc: Vec<String>,

    /// Blind carbon copy addresses, one per `bcc` line, in template
    /// order.
    pub bcc: Vec<String>,

    /// Sender address. The last `from` line wins.
    pub from: Option<String>,

    /// Subject. The last `subject` line wins.
    pub subject: Option<String>,

    /// Reply-To address. The last `reply-to` line wins.
    pub reply_to: Option<String>,

    /// Custom `x-*` headers, in first-occurrence order. The last
    /// value wins per key.
    pub custom: Vec<(String, String)>,
}

impl Directives {
    /// Insert the given directive, applying the accumulation rule of
    /// its key: to/cc/bcc append, from/subject/reply-to overwrite,
    /// custom keys overwrite in place.
    pub fn insert(&mut self, key: HeaderKey, value: String) {
        match key {
            HeaderKey::To => self.to.push(value),
            HeaderKey::Cc => self.cc.push(value),
            HeaderKey::Bcc => self.bcc.push(value),
            HeaderKey::From => self.from = Some(value),
            HeaderKey::Subject => self.subject = Some(value),
            HeaderKey::ReplyTo => self.reply_to = Some(value),
            HeaderKey::Custom(key) => self.insert_custom(key, value),
        }
    }

    fn insert_custom(&mut self, key: String, value: String) {
        match self.custom.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.custom.push((key, value)),
        }
    }

    /// Tell whether no directive has been collected at all.
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
            && self.cc.is_empty()
            && self.bcc.is_empty()
            && self.from.is_none()
            && self.subject.is_none()
            && self.reply_to.is_none()
            && self.custom.is_empty()
    }
}

/// Parse the given rendered template in embedded-header mode.
///
/// Lines are scanned left to right, once. While reading headers,
/// blank lines (whitespace-only included) are skipped and directive
/// lines are collected; the first line that is neither switches the
/// scan to the body for good, itself included. Body lines are
/// accumulated with a `\n` re-appended to each line (the last one
/// included), whatever terminator the input used.
pub fn parse(tpl: &str) -> (Directives, String) {
    let mut directives = Directives::default();
    let mut body = String::new();
    let mut in_body = false;

    for line in tpl.lines() {
        if !in_body && line.trim().is_empty() {
            continue;
        }

        if !in_body {
            if let Some((key, value)) = classify(line) {
                trace!("collect {key} header directive");
                directives.insert(key, value);
                continue;
            }
            in_body = true;
        }

        body.push_str(line);
        body.push('\n');
    }

    (directives, body)
}

/// Tell whether the given body looks like HTML.
///
/// The check is a heuristic: any case-insensitive occurrence of the
/// `<html` substring flags the whole body as HTML. It does not
/// declare any content type by itself.
pub fn looks_like_html(body: &str) -> bool {
    body.to_lowercase().contains("<html")
}

#[cfg(test)]
mod tests {
    use concat_with::concat_line;

    use super::{looks_like_html, parse, Directives};

    #[test]
    fn text_without_directives_is_all_body() {
        let (directives, body) = parse(concat_line!("nothing at all", "second line"));

        assert!(directives.is_empty());
        assert_eq!(body, "nothing at all\nsecond line\n");
    }

    #[test]
    fn empty_template_yields_nothing() {
        let (directives, body) = parse("");

        assert_eq!(directives, Directives::default());
        assert_eq!(body, "");
    }

    #[test]
    fn single_to_directive_then_body() {
        let (directives, body) = parse("to:sokun@ncdd.gov.kh\n<body>whatever ...</body>");

        assert_eq!(directives.to, ["sokun@ncdd.gov.kh"]);
        assert_eq!(body, "<body>whatever ...</body>\n");
        assert!(!looks_like_html(&body));
    }

    #[test]
    fn blank_lines_between_directives_are_skipped() {
        let (directives, body) = parse(concat_line!(
            "",
            "to: sokun@ncdd.gov.kh",
            "  ",
            "subject: Hello !",
            "Body",
        ));

        assert_eq!(directives.to, ["sokun@ncdd.gov.kh"]);
        assert_eq!(directives.subject, Some("Hello !".into()));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn directive_shaped_lines_after_the_body_starts_stay_body() {
        let (directives, body) = parse(concat_line!(
            "to: a@b.com",
            "Hello",
            "to: late@b.com",
            "Bye",
        ));

        assert_eq!(directives.to, ["a@b.com"]);
        assert_eq!(body, "Hello\nto: late@b.com\nBye\n");
    }

    #[test]
    fn single_valued_directives_last_wins() {
        let (directives, _) = parse(concat_line!(
            "from: first@b.com",
            "from: second@b.com",
            "subject: first",
            "subject: second",
            "reply-to: first-reply@b.com",
            "reply-to: second-reply@b.com",
            "Body",
        ));

        assert_eq!(directives.from, Some("second@b.com".into()));
        assert_eq!(directives.subject, Some("second".into()));
        assert_eq!(directives.reply_to, Some("second-reply@b.com".into()));
    }

    #[test]
    fn repeatable_directives_keep_template_order() {
        let (directives, _) = parse(concat_line!(
            "to: a@b.com",
            "cc: c1@b.com",
            "to: b@b.com",
            "cc: c2@b.com",
            "bcc: d@b.com",
            "to: c@b.com",
            "Body",
        ));

        assert_eq!(directives.to, ["a@b.com", "b@b.com", "c@b.com"]);
        assert_eq!(directives.cc, ["c1@b.com", "c2@b.com"]);
        assert_eq!(directives.bcc, ["d@b.com"]);
    }

    #[test]
    fn custom_directives_keep_order_and_last_value() {
        let (directives, _) = parse(concat_line!(
            "X-Campaign: first",
            "X-Mailer: mailer",
            "X-Campaign: second",
            "Body",
        ));

        assert_eq!(
            directives.custom,
            [
                ("x-campaign".to_owned(), "second".to_owned()),
                ("x-mailer".to_owned(), "mailer".to_owned()),
            ]
        );
    }

    #[test]
    fn body_lines_keep_a_terminator_each() {
        let (_, body) = parse(concat_line!("to: a@b.com", "one", "", "two"));

        assert_eq!(body, "one\n\ntwo\n");
    }

    #[test]
    fn crlf_terminators_are_normalized() {
        let (directives, body) = parse("to: a@b.com\r\nline one\r\nline two\r\n");

        assert_eq!(directives.to, ["a@b.com"]);
        assert_eq!(body, "line one\nline two\n");
    }

    #[test]
    fn html_detection_is_case_insensitive() {
        assert!(looks_like_html("<html>"));
        assert!(looks_like_html("leading text <HTML lang=\"en\">"));
        assert!(looks_like_html("<Html>"));
        assert!(!looks_like_html("<body>whatever ...</body>"));
        assert!(!looks_like_html(""));
    }

    #[test]
    fn parse_is_idempotent() {
        let tpl = concat_line!("to: a@b.com", "subject: s", "Body", "", "more");

        assert_eq!(parse(tpl), parse(tpl));
    }
}
