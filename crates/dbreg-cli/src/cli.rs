//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Database Registry Manager - track analysis databases and database lists
#[derive(Parser, Debug)]
#[command(name = "dbreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the registry file (defaults to the platform
    /// config directory)
    #[arg(long, global = true, env = "DBREG_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the registry tree
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Hide the built-in "Top N" lists
        #[arg(long)]
        no_system_lists: bool,
    },

    /// Add an entry to the registry
    Add {
        #[command(subcommand)]
        action: AddAction,
    },

    /// Remove an entry from the registry
    Remove {
        #[command(subcommand)]
        action: RemoveAction,
    },

    /// Rename a user-defined list
    RenameList {
        /// Current name of the list
        current_name: String,

        /// New name for the list
        new_name: String,

        /// Rename a local list instead of a remote one
        #[arg(long)]
        local: bool,
    },

    /// Rename a local database
    RenameDb {
        /// Current name of the database
        current_name: String,

        /// New name for the database
        new_name: String,

        /// List containing the database; omit for loose databases
        #[arg(long)]
        list: Option<String>,
    },

    /// Select a registry entry
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },

    /// Mark a container as expanded
    Expand {
        #[command(subcommand)]
        target: ExpandTarget,
    },

    /// Mark a container as collapsed
    Collapse {
        #[command(subcommand)]
        target: ExpandTarget,
    },
}

/// Entries that can be added
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AddAction {
    /// Add a remote repository ("owner/name")
    Repo {
        /// Repository in "owner/name" form
        nwo: String,

        /// List to add the repository to; omit for a loose entry
        #[arg(long)]
        list: Option<String>,
    },

    /// Add a remote owner
    Owner {
        /// Owner name
        name: String,
    },

    /// Add an empty user-defined list
    List {
        /// Name of the new list
        name: String,

        /// Create a local list instead of a remote one
        #[arg(long)]
        local: bool,
    },

    /// Add a local database
    Db {
        /// Name of the database
        name: String,

        /// Language the database was built for
        #[arg(short, long)]
        language: String,

        /// Path the database is stored at
        #[arg(short, long)]
        storage_path: String,

        /// List to add the database to; omit for a loose entry
        #[arg(long)]
        list: Option<String>,
    },
}

/// Entries that can be removed
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RemoveAction {
    /// Remove a remote repository
    Repo {
        /// Repository in "owner/name" form
        nwo: String,

        /// List containing the repository; omit for loose entries
        #[arg(long)]
        list: Option<String>,
    },

    /// Remove a remote owner
    Owner {
        /// Owner name
        name: String,
    },

    /// Remove a user-defined list and everything in it
    List {
        /// Name of the list
        name: String,

        /// Remove a local list instead of a remote one
        #[arg(long)]
        local: bool,
    },

    /// Remove a local database
    Db {
        /// Name of the database
        name: String,

        /// List containing the database; omit for loose databases
        #[arg(long)]
        list: Option<String>,
    },
}

/// Entries that can be selected
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SelectAction {
    /// Select a remote repository
    Repo {
        /// Repository in "owner/name" form
        nwo: String,

        /// List containing the repository; omit for loose entries
        #[arg(long)]
        list: Option<String>,
    },

    /// Select a remote owner
    Owner {
        /// Owner name
        name: String,
    },

    /// Select a user-defined or system-defined list
    List {
        /// Name of the list (for example "top_10" for a built-in list)
        name: String,

        /// Select a local list instead of a remote one
        #[arg(long)]
        local: bool,
    },

    /// Select a local database
    Db {
        /// Name of the database
        name: String,

        /// List containing the database; omit for loose databases
        #[arg(long)]
        list: Option<String>,
    },

    /// Clear the current selection
    Clear,
}

/// Containers whose expanded state can be toggled
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ExpandTarget {
    /// The remote root
    Remote,

    /// The local root
    Local,

    /// A user-defined list
    List {
        /// Name of the list
        name: String,

        /// Target a local list instead of a remote one
        #[arg(long)]
        local: bool,
    },
}
