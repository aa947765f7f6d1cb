use async_trait::async_trait;
use mail_tpl::{Error, MessageRenderer, RenderTemplate, Result};
use serde_json::{json, Value};
use tokio::main;

/// Engine substituting mustache-flavoured placeholders with
/// top-level string entries of the model.
struct Templates;

#[async_trait]
impl RenderTemplate for Templates {
    async fn render_template(&self, name: &str, model: Option<&Value>) -> Result<String> {
        let mut tpl = match name {
            "campaign" => include_str!("./campaign.tpl").to_owned(),
            name => return Err(Error::FindTemplateError(name.to_owned())),
        };

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

#[test_log::test(main)]
async fn main() {
    let tpl = include_str!("./campaign.tpl");
    let model = json!({ "recipient": "sokun@ncdd.gov.kh" });

    let msg = MessageRenderer::new(Templates)
        .render_with_embedded_headers("campaign", Some(&model))
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
