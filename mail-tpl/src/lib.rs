#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod mailbox;
pub mod message;
pub mod metadata;
pub mod render;
pub mod tpl;

pub use self::{
    error::{Error, Result},
    mailbox::Mailbox,
    message::ComposedMessage,
    metadata::EmailMetadata,
    render::{MessageRenderer, RenderTemplate},
};
