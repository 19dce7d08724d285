use agenda::model::{ContactFields, ContactId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agenda", bin_name = "agenda", version)]
#[command(about = "A small contact directory for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this store file instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub file: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Contact fields as flags. Absent flags mean "not given".
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Given name
    #[arg(long, value_name = "NAME")]
    pub given: Option<String>,

    /// Family name
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Age
    #[arg(long)]
    pub age: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.given.is_none()
            && self.family.is_none()
            && self.age.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    pub fn into_fields(self) -> ContactFields {
        ContactFields {
            given_name: self.given,
            family_name: self.family,
            age: self.age,
            phone: self.phone,
            email: self.email,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a contact
    #[command(visible_alias = "create", alias = "n")]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List all contacts
    #[command(alias = "ls")]
    List {
        /// Print contacts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search contacts (case and accent insensitive)
    #[command(alias = "s")]
    Search {
        /// Search terms, joined with spaces
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// View one or more contacts in full
    #[command(alias = "v")]
    View {
        /// Contact ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<ContactId>,
    },

    /// Edit a contact; prompts for each field when no flags are given
    #[command(alias = "e")]
    Edit {
        /// Contact id
        id: ContactId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact id
        id: ContactId,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Import contacts from vCard files or directories of them
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Export the directory as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}
