//! Command-line interface for the notebook service.
//!
//! Commands:
//! - list: List notebooks
//! - create: Create a notebook
//! - rename: Change a notebook's title
//! - delete: Delete a notebook and its notes
//! - show: Show a notebook with its notes
//! - add-note: Add a note to a notebook
//! - note: Show a single note
//!
//! Configuration via environment:
//! - NOTEBOOK_URL: Base URL of the notebook server (default: http://localhost:3000)
//! - NOTEBOOK_TOKEN: JWT Bearer token for authentication
//! - NOTEBOOK_USER: Development identity (server must allow it)

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    Api, add_note::AddNoteArgs, create::CreateArgs, delete::DeleteArgs, list::ListArgs,
    note::NoteArgs, rename::RenameArgs, show::ShowArgs,
};

/// Notebook CLI
///
/// Manage notebooks and notes from the command line. Prints JSON by
/// default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "notebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notebook server URL
    #[arg(
        long,
        env = "NOTEBOOK_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// JWT Bearer token for authentication
    #[arg(long, env = "NOTEBOOK_TOKEN", global = true)]
    token: Option<String>,

    /// Development identity sent as X-User
    #[arg(long, env = "NOTEBOOK_USER", global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notebooks
    List(ListArgs),

    /// Create a new notebook
    Create(CreateArgs),

    /// Change a notebook's title
    Rename(RenameArgs),

    /// Delete a notebook and its notes
    Delete(DeleteArgs),

    /// Show a notebook with its notes
    Show(ShowArgs),

    /// Add a note to a notebook
    AddNote(AddNoteArgs),

    /// Show a single note
    Note(NoteArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api = Api::new(&cli.url, cli.token.as_deref(), cli.user.as_deref())?;

    match cli.command {
        Commands::List(args) => commands::list::execute(&api, cli.human, args).await,
        Commands::Create(args) => commands::create::execute(&api, cli.human, args).await,
        Commands::Rename(args) => commands::rename::execute(&api, cli.human, args).await,
        Commands::Delete(args) => commands::delete::execute(&api, cli.human, args).await,
        Commands::Show(args) => commands::show::execute(&api, cli.human, args).await,
        Commands::AddNote(args) => commands::add_note::execute(&api, cli.human, args).await,
        Commands::Note(args) => commands::note::execute(&api, cli.human, args).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_note() {
        let cli = Cli::try_parse_from([
            "notebook",
            "--user",
            "alice",
            "add-note",
            "nb1",
            "Milk",
            "--content",
            "2 litres",
        ])
        .unwrap();

        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Commands::AddNote(args) => {
                assert_eq!(args.notebook_id, "nb1");
                assert_eq!(args.title, "Milk");
                assert_eq!(args.content.as_deref(), Some("2 litres"));
            }
            _ => panic!("expected add-note"),
        }
    }

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["notebook", "--human", "delete", "nb1", "-y"]).unwrap();
        assert!(cli.human);
        assert!(matches!(cli.command, Commands::Delete(ref a) if a.yes && a.notebook_id == "nb1"));
    }

    #[test]
    fn test_rename_requires_title() {
        assert!(Cli::try_parse_from(["notebook", "rename", "nb1"]).is_err());
    }
}
