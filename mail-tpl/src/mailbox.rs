//! Module dedicated to mail addresses.
//!
//! The core concept of this module is the [`Mailbox`] structure,
//! which represents an address a message can be sent from or to.

use std::{fmt, str::FromStr};

use email_address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

/// Regex used to split a display name from an angle-bracketed
/// address.
static MAILBOX: Lazy<Regex> = Lazy::new(|| Regex::new("^(.*)<([^<>]+)>\\s*$").unwrap());

/// The mail address of a sender or recipient.
///
/// A mailbox is composed of an optional display name and an email
/// address.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub struct Mailbox {
    pub name: Option<String>,
    pub addr: String,
}

impl Mailbox {
    /// Builds a new mailbox from an optional display name and an
    /// email address.
    ///
    /// No validation is performed: the given address is trusted as
    /// is. Use the [`FromStr`] implementation to validate untrusted
    /// input.
    pub fn new(name: Option<impl ToString>, addr: impl ToString) -> Self {
        Self {
            name: name.map(|name| name.to_string()),
            addr: addr.to_string(),
        }
    }

    /// Builds a new mailbox from an email address only.
    pub fn new_nameless(addr: impl ToString) -> Self {
        Self::new(Option::<String>::None, addr)
    }
}

/// Parse a mailbox from a string, accepting both the bare
/// `user@domain` form and the `Display Name <user@domain>` form.
///
/// The address part needs to be a valid addr-spec, otherwise an
/// error is returned. Display names are kept verbatim, surrounding
/// whitespace excluded.
impl FromStr for Mailbox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, addr) = match MAILBOX.captures(s.trim()) {
            Some(caps) => {
                let name = caps[1].trim();
                let name = (!name.is_empty()).then(|| name.to_owned());
                (name, caps[2].trim().to_owned())
            }
            None => (None, s.trim().to_owned()),
        };

        EmailAddress::from_str(&addr)
            .map_err(|err| Error::ParseEmailAddressError(err, s.trim().to_owned()))?;

        Ok(Self { name, addr })
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.addr),
            None => write!(f, "{}", self.addr),
        }
    }
}
