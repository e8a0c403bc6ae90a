//! CREATE command - Create a new notebook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Method;
use serde::Serialize;

use super::{Api, NotebookResponse, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Title for the new notebook
    pub title: String,
}

/// Request body for creating a notebook.
#[derive(Serialize)]
struct CreateNotebookRequest {
    title: String,
}

/// Execute the create command.
pub async fn execute(api: &Api, human: bool, args: CreateArgs) -> Result<()> {
    let request_body = CreateNotebookRequest { title: args.title };

    let request = api.mutating(Method::POST, "/api/notebook/create").await?;
    let response: NotebookResponse = make_request(request.json(&request_body)).await?;

    if human {
        println!("{}", "Notebook created successfully!".green().bold());
        println!();
    }
    output(&response, human)
}
