use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::STORAGE_PATH_ENV;
use crate::storage::file::DEFAULT_STORAGE_PATH;

#[derive(Parser, Debug)]
#[command(name = "contact-manager", version, about = "Manage your contacts efficiently and stay organized")]
pub struct Cli {
    /// File holding the persisted contact collection
    #[arg(long, env = STORAGE_PATH_ENV, default_value = DEFAULT_STORAGE_PATH, global = true)]
    pub storage_path: PathBuf,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// First name (required)
        #[arg(long)]
        first_name: String,

        /// Last name (required)
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number, exactly 10 digits
        #[arg(long)]
        phone: String,

        /// Postal address
        #[arg(long)]
        address: Option<String>,
    },
    /// List every contact
    List,
    /// Show contacts whose full name contains TERM (case-insensitive)
    Search {
        term: String,
    },
    /// Edit an existing contact.
    /// Fields left out keep their current value
    Edit {
        /// Contact id, or an unambiguous prefix of it
        #[arg(long)]
        id: String,

        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a contact by id
    Delete {
        /// Contact id, or an unambiguous prefix of it
        #[arg(long)]
        id: String,
    },
    /// Import contacts from a .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<String>,
    },
    /// Export contacts to a .csv file
    Export {
        /// File path to the destination location for export file
        #[arg(short, long)]
        des: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct EditFields {
    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New postal address
    #[arg(long)]
    pub address: Option<String>,
}
