//! DELETE command - Delete a notebook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Api, HumanReadable, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Notebook ID to delete
    pub notebook_id: String,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Response from deleting a notebook.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteNotebookResponse {
    pub id: String,
    pub message: String,
}

impl HumanReadable for DeleteNotebookResponse {
    fn print_human(&self) {
        println!("{}", "Notebook deleted successfully!".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
    }
}

/// Execute the delete command.
pub async fn execute(api: &Api, human: bool, args: DeleteArgs) -> Result<()> {
    // Confirmation prompt for interactive use
    if human && !args.yes {
        eprint!(
            "{} Delete notebook {} and all of its notes? [y/N] ",
            "Warning:".yellow().bold(),
            args.notebook_id
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let path = format!("/api/notebook/{}", args.notebook_id);
    let request = api.mutating(Method::DELETE, &path).await?;
    let response: DeleteNotebookResponse = make_request(request).await?;

    output(&response, human)
}
