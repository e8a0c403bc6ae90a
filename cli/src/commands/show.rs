//! SHOW command - Fetch a notebook with its notes.

use anyhow::Result;
use clap::Args;

use super::{Api, NotebookResponse, make_request, output};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Notebook ID to show
    pub notebook_id: String,
}

/// Execute the show command.
pub async fn execute(api: &Api, human: bool, args: ShowArgs) -> Result<()> {
    let path = format!("/api/notebook/{}", args.notebook_id);
    let response: NotebookResponse = make_request(api.get(&path)).await?;

    output(&response, human)
}
