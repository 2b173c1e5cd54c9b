//! `folio contact`: validate and send a message.

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::contact::{ContactClient, ContactForm};

pub async fn run(config: &Config, form: &ContactForm, endpoint: Option<&str>) -> Result<()> {
    let contact = match form.validate() {
        Ok(contact) => contact,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", error.field.label(), error.message);
            }
            anyhow::bail!("Contact form is invalid ({} field(s))", errors.len());
        }
    };

    let client = ContactClient::from_config(&config.contact, endpoint)?;
    client.submit(&contact).await.context("send message")?;

    println!("Message sent.");
    Ok(())
}
