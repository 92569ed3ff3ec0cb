use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::connect;
use crate::cli::render::{render_contact, render_contacts, render_tags};
use crate::cli::utils::{confirm, output_success};
use crate::cli::OutputFormat;
use crate::filter::WorkingContact;
use crate::sync::{ContactsApi, SyncController};

#[derive(Subcommand)]
pub enum ContactCommands {
    #[command(about = "List contacts, optionally filtered by tags and name prefix")]
    List {
        #[arg(long = "tag", help = "Only contacts carrying this tag (repeatable, all must match)")]
        tags: Vec<String>,
        #[arg(long, help = "Case-insensitive name prefix")]
        search: Option<String>,
    },

    #[command(about = "List every tag in use")]
    Tags {
        #[arg(long = "tag", help = "Mark this tag as an active filter (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "Show a single contact")]
    Show {
        #[arg(help = "Contact ID")]
        id: String,
    },

    #[command(about = "Create a contact")]
    Add {
        #[arg(long, help = "Full name")]
        full_name: Option<String>,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Phone number")]
        phone_number: Option<String>,
        #[arg(long = "tag", help = "Tag to attach (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "Edit a contact")]
    Edit {
        #[arg(help = "Contact ID")]
        id: String,
        #[arg(long, help = "Full name")]
        full_name: Option<String>,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Phone number")]
        phone_number: Option<String>,
        #[arg(long = "toggle-tag", help = "Add the tag if absent, remove it if present (repeatable)")]
        toggle_tags: Vec<String>,
        #[arg(long = "add-tag", help = "Attach a new tag (repeatable)")]
        add_tags: Vec<String>,
    },

    #[command(about = "Delete a contact")]
    Delete {
        #[arg(help = "Contact ID")]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

fn apply_fields(
    working: &mut WorkingContact,
    full_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
) {
    if let Some(full_name) = full_name {
        working.full_name = full_name;
    }
    if let Some(email) = email {
        working.email = email;
    }
    if let Some(phone_number) = phone_number {
        working.phone_number = phone_number;
    }
}

/// Add typed-in tags to the working contact, warning about the ones refused
fn add_tags<A: ContactsApi>(controller: &mut SyncController<A>, tags: &[String]) {
    for tag in tags {
        if !controller.engine_mut().add_new_tag(tag) {
            tracing::warn!("Tag '{}' is empty or already present; skipped", tag);
        }
    }
}

pub async fn handle(cmd: ContactCommands, server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut controller = connect(server)?;

    match cmd {
        ContactCommands::List { tags, search } => {
            controller.refresh().await?;
            let engine = controller.engine_mut();
            for tag in &tags {
                if !engine.is_filter_active(tag) {
                    engine.add_filter(tag);
                }
            }
            if let Some(search) = search {
                engine.set_search(search);
            }
            render_contacts(controller.engine(), &output_format)
        }
        ContactCommands::Tags { tags } => {
            controller.refresh().await?;
            for tag in &tags {
                if !controller.engine().is_filter_active(tag) {
                    controller.engine_mut().add_filter(tag);
                }
            }
            render_tags(controller.engine(), &output_format)
        }
        ContactCommands::Show { id } => {
            let contact = controller.api().fetch_contact(&id).await?;
            render_contact(&contact, &output_format)
        }
        ContactCommands::Add {
            full_name,
            email,
            phone_number,
            tags,
        } => {
            controller.begin_create()?;
            if let Some(working) = controller.engine_mut().working_mut() {
                apply_fields(working, full_name, email, phone_number);
            }
            add_tags(&mut controller, &tags);

            let saved = controller.submit().await?;
            output_success(
                &output_format,
                &format!("Contact '{}' created", saved.full_name),
                Some(json!({ "contact": saved })),
            )
        }
        ContactCommands::Edit {
            id,
            full_name,
            email,
            phone_number,
            toggle_tags,
            add_tags: new_tags,
        } => {
            controller.begin_edit(&id).await?;
            if let Some(working) = controller.engine_mut().working_mut() {
                apply_fields(working, full_name, email, phone_number);
            }
            for tag in &toggle_tags {
                controller.engine_mut().toggle_working_tag(tag);
            }
            add_tags(&mut controller, &new_tags);

            let saved = controller.submit().await?;
            output_success(
                &output_format,
                &format!("Contact '{}' updated", saved.full_name),
                Some(json!({ "contact": saved })),
            )
        }
        ContactCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete contact {}?", id))? {
                return output_success(&output_format, "Delete cancelled", None);
            }

            if controller.delete(&id).await? {
                output_success(
                    &output_format,
                    &format!("Contact {} deleted", id),
                    Some(json!({ "id": id, "remaining": controller.engine().contacts().len() })),
                )
            } else {
                Err(anyhow::anyhow!("Contact {} could not be deleted", id))
            }
        }
    }
}
