//! Turns engine state into CLI output. Holds no state of its own.

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::filter::TagFilterEngine;
use crate::types::Contact;

fn contact_line(contact: &Contact) -> String {
    let tags = if contact.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", contact.tags.join(", "))
    };
    format!(
        "{:<36}  {:<24}  {:<28}  {}{}",
        contact.id, contact.full_name, contact.email, contact.phone_number, tags
    )
}

/// Visible contacts after filters and search
pub fn render_contacts(engine: &TagFilterEngine, output_format: &OutputFormat) -> anyhow::Result<()> {
    let visible = engine.visible_contacts();

    match output_format {
        OutputFormat::Json => {
            let filters: Vec<&str> = engine.filters().iter().collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "contacts": visible,
                    "filters": filters,
                    "search": engine.search(),
                    "total": engine.contacts().len(),
                }))?
            );
        }
        OutputFormat::Text => {
            if !engine.filters().is_empty() {
                let filters: Vec<&str> = engine.filters().iter().collect();
                println!("Filtering by: {}", filters.join(", "));
            }
            if visible.is_empty() {
                println!("No contacts match");
                return Ok(());
            }
            for contact in &visible {
                println!("{}", contact_line(contact));
            }
            println!("{} of {} contacts", visible.len(), engine.contacts().len());
        }
    }
    Ok(())
}

pub fn render_contact(contact: &Contact, output_format: &OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(contact)?),
        OutputFormat::Text => {
            println!("ID:     {}", contact.id);
            println!("Name:   {}", contact.full_name);
            println!("Email:  {}", contact.email);
            println!("Phone:  {}", contact.phone_number);
            println!("Tags:   {}", contact.tags.join(", "));
        }
    }
    Ok(())
}

/// Tag palette with active filters marked
pub fn render_tags(engine: &TagFilterEngine, output_format: &OutputFormat) -> anyhow::Result<()> {
    let tags = engine.all_tags();

    match output_format {
        OutputFormat::Json => {
            let entries: Vec<Value> = tags
                .iter()
                .map(|tag| json!({ "tag": tag, "active": engine.is_filter_active(tag) }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "tags": entries }))?);
        }
        OutputFormat::Text => {
            if tags.is_empty() {
                println!("No tags in use");
            }
            for tag in &tags {
                let marker = if engine.is_filter_active(tag) { "*" } else { " " };
                println!("{} {}", marker, tag);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_line_lists_tags() {
        let contact = Contact {
            id: "c1".to_string(),
            full_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            tags: vec!["work".to_string(), "vip".to_string()],
        };
        let line = contact_line(&contact);
        assert!(line.starts_with("c1"));
        assert!(line.ends_with("[work, vip]"));
    }
}
