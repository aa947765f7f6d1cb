use async_trait::async_trait;
use mail_tpl::{EmailMetadata, Error, Mailbox, MessageRenderer, RenderTemplate, Result};
use serde_json::Value;
use tokio::main;

/// Engine serving templates straight from memory, ignoring the
/// model.
struct Templates;

#[async_trait]
impl RenderTemplate for Templates {
    async fn render_template(&self, name: &str, _model: Option<&Value>) -> Result<String> {
        match name {
            "welcome" => Ok(include_str!("./welcome.tpl").to_owned()),
            name => Err(Error::FindTemplateError(name.to_owned())),
        }
    }
}

#[test_log::test(main)]
async fn main() {
    let tpl = include_str!("./welcome.tpl");

    let metadata = EmailMetadata::new_with_addresses(
        Mailbox::new(Some("No Reply"), "noreply@ncdd.gov.kh"),
        Mailbox::new_nameless("sokun@ncdd.gov.kh"),
    )
    .with_html_email(false);

    let msg = MessageRenderer::new(Templates)
        .render_with_metadata("welcome", &metadata)
        .await
        .unwrap();
    let mime = msg.into_string().unwrap();

    println!("================================");
    println!("TEMPLATE");
    println!("================================");
    println!();
    println!("{tpl}");

    println!("================================");
    println!("COMPILED MIME MESSAGE");
    println!("================================");
    println!();
    println!("{mime}");
}
