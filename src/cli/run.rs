use clap::Parser;
use tracing::debug;

use crate::{
    config::{self, Settings},
    logging::{self, Verbosity},
    prelude::{
        AppError, ContactManager, Submitted,
        command::{Cli, Commands, EditFields},
        storage::csv::{export_contacts_to_csv, read_contacts_from_csv},
        validation::Field,
    },
};

pub fn run_app() -> Result<(), AppError> {
    config::load_env();
    let cli = Cli::parse();

    let settings = Settings {
        storage_path: cli.storage_path,
        verbosity: Verbosity::from_occurrences(cli.verbose),
    };
    logging::init_logging(settings.verbosity);
    debug!(path = %settings.storage_path.display(), "opening contact storage");

    let mut manager = ContactManager::open(settings.storage());
    execute(&mut manager, cli.command)
}

fn apply_edits(manager: &mut ContactManager, fields: EditFields) {
    let form = manager.form_mut();
    let edits = [
        (Field::FirstName, fields.first_name),
        (Field::LastName, fields.last_name),
        (Field::Email, fields.email),
        (Field::Phone, fields.phone),
        (Field::Address, fields.address),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            form.set(field, value);
        }
    }
}

/// Runs one command against `manager`, printing results to stdout.
pub fn execute(manager: &mut ContactManager, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Add {
            first_name,
            last_name,
            email,
            phone,
            address,
        } => {
            manager.open_add();
            apply_edits(
                manager,
                EditFields {
                    first_name: Some(first_name),
                    last_name: Some(last_name),
                    email: Some(email),
                    phone: Some(phone),
                    address,
                },
            );

            if let Submitted::Added(id) = manager.submit_form()? {
                println!("Contact added successfully");
                println!("id: {id}");
            }
            Ok(())
        }

        Commands::List => {
            manager.set_search("");
            println!("{}", manager.render());
            Ok(())
        }

        Commands::Search { term } => {
            manager.set_search(term);
            println!("{}", manager.render());
            Ok(())
        }

        Commands::Edit { id, fields } => {
            let Some(id) = manager.store().resolve_id(&id)? else {
                eprintln!("{}", AppError::NotFound("Contact".to_string()));
                return Ok(());
            };

            manager.open_edit_by_id(&id);
            apply_edits(manager, fields);

            match manager.submit_form()? {
                Submitted::Updated(_) => println!("Contact updated successfully"),
                _ => eprintln!("{}", AppError::NotFound("Contact".to_string())),
            }
            Ok(())
        }

        Commands::Delete { id } => {
            let deleted = match manager.store().resolve_id(&id)? {
                Some(id) => manager.delete(&id)?,
                None => false,
            };

            if deleted {
                println!("Contact deleted successfully");
            } else {
                eprintln!("{}", AppError::NotFound("Contact".to_string()));
            }
            Ok(())
        }

        // Import contacts into storage from .csv file
        Commands::Import { src } => {
            let (path, records) = read_contacts_from_csv(src.as_deref())?;
            let report = manager.import(records)?;

            println!(
                "Successfully imported {} contacts from {:?}.",
                report.added + report.updated,
                path
            );
            if report.updated > 0 || report.skipped > 0 {
                println!(
                    "{} added, {} updated, {} skipped",
                    report.added, report.updated, report.skipped
                );
            }
            Ok(())
        }

        Commands::Export { des } => {
            let (path, total) = export_contacts_to_csv(manager.store().contacts(), des.as_deref())?;

            println!("Successfully exported {} contacts to {:?}.", total, path);
            Ok(())
        }
    }
}
