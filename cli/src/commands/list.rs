//! LIST command - List notebooks.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{Api, HumanReadable, format_timestamp, make_request, output};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    // No additional arguments needed
}

/// Notebook summary as returned by `GET /api/notebook`.
#[derive(Debug, Deserialize, Serialize)]
pub struct NotebookSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub note_count: usize,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Response from listing notebooks.
#[derive(Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ListNotebooksResponse {
    pub notebooks: Vec<NotebookSummary>,
}

impl HumanReadable for ListNotebooksResponse {
    fn print_human(&self) {
        println!("{}", "Notebooks".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notebooks.is_empty() {
            println!("  {}", "(No notebooks)".dimmed());
            return;
        }

        for notebook in &self.notebooks {
            println!(
                "  {} {}",
                notebook.title.bold(),
                format!("[{} notes]", notebook.note_count).dimmed()
            );
            println!("    {} {}", "ID:".cyan(), notebook.id);
            println!(
                "    {} {}",
                "Updated:".cyan(),
                format_timestamp(&notebook.updated)
            );
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notebooks.len());
    }
}

/// Execute the list command.
pub async fn execute(api: &Api, human: bool, _args: ListArgs) -> Result<()> {
    let response: ListNotebooksResponse = make_request(api.get("/api/notebook")).await?;

    output(&response, human)
}
