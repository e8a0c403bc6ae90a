//! RENAME command - Change a notebook's title.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Method;
use serde::Serialize;

use super::{Api, NotebookResponse, make_request, output};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Notebook ID to rename
    pub notebook_id: String,

    /// New title
    pub title: String,
}

/// Request body for updating a notebook.
#[derive(Serialize)]
struct UpdateNotebookRequest {
    id: String,
    title: String,
}

/// Execute the rename command.
pub async fn execute(api: &Api, human: bool, args: RenameArgs) -> Result<()> {
    let request_body = UpdateNotebookRequest {
        id: args.notebook_id,
        title: args.title,
    };

    let request = api.mutating(Method::PUT, "/api/notebook/update").await?;
    let response: NotebookResponse = make_request(request.json(&request_body)).await?;

    if human {
        println!("{}", "Notebook renamed.".green().bold());
        println!();
    }
    output(&response, human)
}
