//! Module dedicated to template rendering.
//!
//! Rendering itself is delegated to an engine implementing the
//! [`RenderTemplate`] trait. The [`MessageRenderer`] drives such an
//! engine and assembles the rendered output into a
//! [`ComposedMessage`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{ComposedMessage, EmailMetadata, Result};

/// Trait implemented by template engines.
///
/// Language- and storage-specific concerns (template lookup paths,
/// caches, engine configuration) belong to the implementor.
#[async_trait]
pub trait RenderTemplate: Send + Sync {
    /// Render the template matching the given name with the given
    /// model.
    async fn render_template(&self, name: &str, model: Option<&Value>) -> Result<String>;
}

/// The message renderer.
///
/// Wraps a template engine and exposes the two rendering modes: one
/// where addressing comes from explicit [`EmailMetadata`], one where
/// the template itself carries its addressing as header directives.
#[derive(Clone)]
pub struct MessageRenderer {
    /// The engine templates are rendered with.
    renderer: Arc<dyn RenderTemplate>,
}

impl MessageRenderer {
    pub fn new(renderer: impl RenderTemplate + 'static) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }

    /// Render the given template and assemble it with the given
    /// metadata.
    ///
    /// The metadata doubles as the template model: its addresses and
    /// HTML flag are exposed to the engine (see
    /// [`EmailMetadata::to_model`]). The rendered output is parsed in
    /// simple mode, first non-blank line as subject and the remainder
    /// as body.
    pub async fn render_with_metadata(
        &self,
        name: &str,
        metadata: &EmailMetadata,
    ) -> Result<ComposedMessage> {
        debug!("render template {name} using metadata as model");

        let tpl = self
            .renderer
            .render_template(name, Some(&metadata.to_model()))
            .await?;

        Ok(ComposedMessage::from_metadata(tpl, metadata))
    }

    /// Render the given template and assemble it from its own header
    /// directives.
    ///
    /// The rendered output is expected to start with `to`, `from`,
    /// `cc`, `bcc`, `subject`, `reply-to` or `x-*` directive lines,
    /// everything after them being the body.
    pub async fn render_with_embedded_headers(
        &self,
        name: &str,
        model: Option<&Value>,
    ) -> Result<ComposedMessage> {
        debug!("render template {name} using embedded header directives");

        let tpl = self.renderer.render_template(name, model).await?;

        ComposedMessage::from_embedded_headers(tpl)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io};

    use async_trait::async_trait;
    use concat_with::concat_line;
    use serde_json::{json, Value};

    use super::{MessageRenderer, RenderTemplate};
    use crate::{EmailMetadata, Error, Mailbox, Result};

    /// In-memory engine with mustache-flavoured placeholders,
    /// substituting top-level string entries of the model.
    struct Templates(HashMap<String, String>);

    fn renderer(tpls: impl IntoIterator<Item = (&'static str, &'static str)>) -> MessageRenderer {
        MessageRenderer::new(Templates(
            tpls.into_iter()
                .map(|(name, tpl)| (name.to_owned(), tpl.to_owned()))
                .collect(),
        ))
    }

    #[async_trait]
    impl RenderTemplate for Templates {
        async fn render_template(&self, name: &str, model: Option<&Value>) -> Result<String> {
            let mut tpl = self
                .0
                .get(name)
                .ok_or_else(|| Error::FindTemplateError(name.to_owned()))?
                .clone();

            if let Some(obj) = model.and_then(Value::as_object) {
                for (key, val) in obj {
                    if let Some(val) = val.as_str() {
                        tpl = tpl.replace(&format!("{{{{{key}}}}}"), val);
                    }
                }
            }

            Ok(tpl)
        }
    }

    fn metadata() -> EmailMetadata {
        EmailMetadata::new_with_addresses(
            Mailbox::new_nameless("from@amail.com"),
            Mailbox::new_nameless("to@email.com"),
        )
    }

    #[test_log::test(tokio::test)]
    async fn renders_with_metadata() {
        let renderer = renderer([("welcome", "Subject line\nBody text")]);

        let msg = renderer
            .render_with_metadata("welcome", &metadata())
            .await
            .unwrap();

        assert_eq!(msg.from, Some(Mailbox::new_nameless("from@amail.com")));
        assert_eq!(msg.to, [Mailbox::new_nameless("to@email.com")]);
        assert_eq!(msg.subject, "Subject line");
        assert_eq!(msg.body, "Body text");
        assert!(msg.is_html_body);
    }

    #[test_log::test(tokio::test)]
    async fn exposes_metadata_to_the_engine() {
        let renderer = renderer([("welcome", "Hello {{from}}\nBody")]);

        let msg = renderer
            .render_with_metadata("welcome", &metadata())
            .await
            .unwrap();

        assert_eq!(msg.subject, "Hello from@amail.com");
    }

    #[test_log::test(tokio::test)]
    async fn renders_with_embedded_headers() {
        let renderer = renderer([(
            "campaign",
            concat_line!(
                "to: {{recipient}}",
                "from: noreply@ncdd.gov.kh",
                "subject: Hello !",
                "Body",
            ),
        )]);

        let msg = renderer
            .render_with_embedded_headers(
                "campaign",
                Some(&json!({ "recipient": "sokun@ncdd.gov.kh" })),
            )
            .await
            .unwrap();

        assert_eq!(msg.to, [Mailbox::new_nameless("sokun@ncdd.gov.kh")]);
        assert_eq!(msg.subject, "Hello !");
        assert_eq!(msg.body, "Body\n");
    }

    #[test_log::test(tokio::test)]
    async fn propagates_missing_templates() {
        let renderer = renderer([]);

        let err = renderer
            .render_with_metadata("missing", &metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::FindTemplateError(name) if name == "missing"));
    }

    #[test_log::test(tokio::test)]
    async fn propagates_engine_failures() {
        struct BrokenEngine;

        #[async_trait]
        impl RenderTemplate for BrokenEngine {
            async fn render_template(&self, name: &str, _model: Option<&Value>) -> Result<String> {
                let source = io::Error::new(io::ErrorKind::Other, "template storage unreachable");
                Err(Error::RenderTemplateError(Box::new(source), name.to_owned()))
            }
        }

        let err = MessageRenderer::new(BrokenEngine)
            .render_with_metadata("welcome", &metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RenderTemplateError(_, name) if name == "welcome"));
    }

    #[test_log::test(tokio::test)]
    async fn propagates_assembly_failures() {
        let renderer = renderer([("campaign", "just a body, no directives")]);

        let err = renderer
            .render_with_embedded_headers("campaign", None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BuildMessageMissingRecipientError));
    }
}
