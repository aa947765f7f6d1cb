//! Module dedicated to caller-supplied message metadata.
//!
//! In metadata mode the template only says what the mail says. This
//! module owns the other half: who sends it, who receives it and
//! whether the body should be flagged as HTML.

use serde_json::{json, Value};

use crate::Mailbox;

/// The caller-supplied addressing intent of a message.
///
/// Metadata is built once by the caller, then passed by reference
/// into render calls. Its values are copied verbatim into the
/// composed message, without any validation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct EmailMetadata {
    /// Sender address.
    pub from: Option<Mailbox>,

    /// Recipient addresses.
    pub to: Vec<Mailbox>,

    /// Carbon copy addresses.
    pub cc: Vec<Mailbox>,

    /// Blind carbon copy addresses.
    pub bcc: Vec<Mailbox>,

    /// Whether the rendered body should be flagged as HTML.
    ///
    /// Defaults to `true`: templates are considered HTML unless the
    /// caller explicitly opts out.
    pub is_html_email: bool,
}

impl Default for EmailMetadata {
    fn default() -> Self {
        Self {
            from: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            is_html_email: true,
        }
    }
}

impl EmailMetadata {
    /// Creates a new empty metadata set with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new metadata set from a sender and a single
    /// recipient.
    pub fn new_with_addresses(from: Mailbox, to: Mailbox) -> Self {
        Self {
            from: Some(from),
            to: vec![to],
            ..Default::default()
        }
    }

    /// Customize the sender address.
    pub fn set_from(&mut self, from: Mailbox) {
        self.from = Some(from);
    }

    /// Customize the sender address.
    pub fn set_some_from(&mut self, from: Option<Mailbox>) {
        self.from = from;
    }

    /// Customize the sender address following the builder pattern.
    pub fn with_from(mut self, from: Mailbox) -> Self {
        self.set_from(from);
        self
    }

    /// Customize the sender address following the builder pattern.
    pub fn with_some_from(mut self, from: Option<Mailbox>) -> Self {
        self.set_some_from(from);
        self
    }

    /// Customize the recipient addresses.
    pub fn set_to(&mut self, to: impl IntoIterator<Item = Mailbox>) {
        self.to = to.into_iter().collect();
    }

    /// Customize the recipient addresses following the builder
    /// pattern.
    pub fn with_to(mut self, to: impl IntoIterator<Item = Mailbox>) -> Self {
        self.set_to(to);
        self
    }

    /// Customize the carbon copy addresses.
    pub fn set_cc(&mut self, cc: impl IntoIterator<Item = Mailbox>) {
        self.cc = cc.into_iter().collect();
    }

    /// Customize the carbon copy addresses following the builder
    /// pattern.
    pub fn with_cc(mut self, cc: impl IntoIterator<Item = Mailbox>) -> Self {
        self.set_cc(cc);
        self
    }

    /// Customize the blind carbon copy addresses.
    pub fn set_bcc(&mut self, bcc: impl IntoIterator<Item = Mailbox>) {
        self.bcc = bcc.into_iter().collect();
    }

    /// Customize the blind carbon copy addresses following the
    /// builder pattern.
    pub fn with_bcc(mut self, bcc: impl IntoIterator<Item = Mailbox>) -> Self {
        self.set_bcc(bcc);
        self
    }

    /// Customize the HTML flag.
    pub fn set_html_email(&mut self, html: bool) {
        self.is_html_email = html;
    }

    /// Customize the HTML flag following the builder pattern.
    pub fn with_html_email(mut self, html: bool) -> Self {
        self.set_html_email(html);
        self
    }

    /// Build the model this metadata represents when handed to the
    /// rendering port.
    ///
    /// Addresses are exposed in their display form so templates can
    /// interpolate the addressing they were rendered for.
    pub fn to_model(&self) -> Value {
        json!({
            "from": self.from.as_ref().map(ToString::to_string),
            "to": self.to.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "cc": self.cc.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "bcc": self.bcc.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "is-html-email": self.is_html_email,
        })
    }
}
