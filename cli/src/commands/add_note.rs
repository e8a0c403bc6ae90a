//! ADD-NOTE command - Add a note to a notebook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Method;
use serde::Serialize;

use super::{Api, NoteResponse, make_request, output};

/// Arguments for the add-note command.
#[derive(Args)]
pub struct AddNoteArgs {
    /// Notebook ID to add the note to
    pub notebook_id: String,

    /// Note title
    pub title: String,

    /// Note body
    #[arg(short = 'c', long)]
    pub content: Option<String>,
}

/// Request body for adding a note.
#[derive(Serialize)]
struct AddNoteRequest {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

/// Execute the add-note command.
pub async fn execute(api: &Api, human: bool, args: AddNoteArgs) -> Result<()> {
    let request_body = AddNoteRequest {
        title: args.title,
        content: args.content,
    };

    let path = format!("/api/notebook/{}/add-note", args.notebook_id);
    let request = api.mutating(Method::POST, &path).await?;
    let response: NoteResponse = make_request(request.json(&request_body)).await?;

    if human {
        println!("{}", "Note added.".green().bold());
        println!();
    }
    output(&response, human)
}
