//! Module dedicated to the composed message.
//!
//! The main structure of this module is the [`ComposedMessage`],
//! the final outcome of a render call: parsed template artifacts and
//! addressing assembled together, ready for transport.

use mail_builder::{
    headers::{address::Address, raw::Raw},
    MessageBuilder,
};
use tracing::debug;

use crate::{
    tpl::{
        embedded::{self, Directives},
        simple,
    },
    EmailMetadata, Error, Mailbox, Result,
};

/// The message resulting from a render call.
///
/// A composed message owns everything transport needs: addressing,
/// subject, body and the HTML flag. It carries no transport logic
/// itself; use [`ComposedMessage::to_msg_builder`] and friends to
/// turn it into a raw MIME message for whatever sender you use.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct ComposedMessage {
    /// Sender address.
    pub from: Option<Mailbox>,

    /// Recipient addresses.
    pub to: Vec<Mailbox>,

    /// Carbon copy addresses.
    pub cc: Vec<Mailbox>,

    /// Blind carbon copy addresses.
    pub bcc: Vec<Mailbox>,

    /// Reply-To address.
    pub reply_to: Option<Mailbox>,

    /// Subject, possibly empty.
    pub subject: String,

    /// Body, possibly empty.
    pub body: String,

    /// Whether the body is flagged as HTML.
    pub is_html_body: bool,

    /// Custom `x-*` headers, in first-occurrence order.
    pub headers: Vec<(String, String)>,
}

impl ComposedMessage {
    /// Assemble a message from explicit metadata and a rendered
    /// template.
    ///
    /// The template only provides the subject and the body, parsed
    /// in simple mode (see [`simple::parse`]). Everything else is
    /// copied verbatim from the given metadata, without validation:
    /// this mode trusts the caller.
    pub fn from_metadata(tpl: impl AsRef<str>, metadata: &EmailMetadata) -> Self {
        let (subject, body) = simple::parse(tpl.as_ref());

        Self {
            from: metadata.from.clone(),
            to: metadata.to.clone(),
            cc: metadata.cc.clone(),
            bcc: metadata.bcc.clone(),
            reply_to: None,
            subject,
            body,
            is_html_body: metadata.is_html_email,
            headers: Vec::new(),
        }
    }

    /// Assemble a message from a rendered template carrying its own
    /// addressing directives.
    ///
    /// The template is parsed in embedded-header mode (see
    /// [`embedded::parse`]), then assembled with
    /// [`ComposedMessage::from_directives`].
    pub fn from_embedded_headers(tpl: impl AsRef<str>) -> Result<Self> {
        let (directives, body) = embedded::parse(tpl.as_ref());
        Self::from_directives(directives, body)
    }

    /// Assemble a message from already-parsed directives and body.
    ///
    /// Directive values are parsed into mailboxes at this point: an
    /// invalid address fails the whole assembly. The directives need
    /// to carry at least one recipient and a sender, otherwise no
    /// message is built. The HTML flag comes from a heuristic over
    /// the body (see [`embedded::looks_like_html`]).
    pub fn from_directives(directives: Directives, body: String) -> Result<Self> {
        let is_html_body = embedded::looks_like_html(&body);

        let msg = Self {
            from: directives.from.map(|from| from.parse()).transpose()?,
            to: parse_mailboxes(directives.to)?,
            cc: parse_mailboxes(directives.cc)?,
            bcc: parse_mailboxes(directives.bcc)?,
            reply_to: directives
                .reply_to
                .map(|reply_to| reply_to.parse())
                .transpose()?,
            subject: directives.subject.unwrap_or_default(),
            body,
            is_html_body,
            headers: directives.custom,
        };

        if msg.to.is_empty() {
            debug!("cannot build message from template: missing recipient");
            return Err(Error::BuildMessageMissingRecipientError);
        }

        if msg.from.is_none() {
            debug!("cannot build message from template: missing sender");
            return Err(Error::BuildMessageMissingSenderError);
        }

        Ok(msg)
    }

    /// Return the composed message as a [`MessageBuilder`].
    ///
    /// Custom headers are written raw, as they came from the
    /// template. The body lands either as the HTML part or as the
    /// plain text part, depending on the HTML flag.
    pub fn to_msg_builder(&self) -> MessageBuilder<'_> {
        let mut builder = MessageBuilder::new();

        if let Some(from) = &self.from {
            builder = builder.from(to_builder_addr(from));
        }

        if !self.to.is_empty() {
            builder = builder.to(to_builder_addrs(&self.to));
        }

        if !self.cc.is_empty() {
            builder = builder.cc(to_builder_addrs(&self.cc));
        }

        if !self.bcc.is_empty() {
            builder = builder.bcc(to_builder_addrs(&self.bcc));
        }

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(to_builder_addr(reply_to));
        }

        builder = builder.subject(self.subject.as_str());

        for (key, val) in &self.headers {
            builder = builder.header(key.as_str(), Raw::new(val.as_str()));
        }

        if self.is_html_body {
            builder.html_body(self.body.as_str())
        } else {
            builder.text_body(self.body.as_str())
        }
    }

    /// Return the composed message as a raw MIME message [`Vec`].
    pub fn into_vec(self) -> Result<Vec<u8>> {
        self.to_msg_builder()
            .write_to_vec()
            .map_err(Error::WriteMessageToVecError)
    }

    /// Return the composed message as a raw MIME message [`String`].
    pub fn into_string(self) -> Result<String> {
        self.to_msg_builder()
            .write_to_string()
            .map_err(Error::WriteMessageToStringError)
    }
}

fn parse_mailboxes(mboxes: Vec<String>) -> Result<Vec<Mailbox>> {
    mboxes.into_iter().map(|mbox| mbox.parse()).collect()
}

fn to_builder_addr(mbox: &Mailbox) -> Address<'_> {
    Address::new_address(mbox.name.as_deref(), mbox.addr.as_str())
}

fn to_builder_addrs(mboxes: &[Mailbox]) -> Address<'_> {
    Address::new_list(mboxes.iter().map(to_builder_addr).collect())
}
