//! NOTE command - Fetch a single note.

use anyhow::Result;
use clap::Args;

use super::{Api, NoteResponse, make_request, output};

/// Arguments for the note command.
#[derive(Args)]
pub struct NoteArgs {
    /// Note ID to fetch
    pub note_id: String,
}

/// Execute the note command.
pub async fn execute(api: &Api, human: bool, args: NoteArgs) -> Result<()> {
    let path = format!("/api/notebook/note/{}", args.note_id);
    let response: NoteResponse = make_request(api.get(&path)).await?;

    output(&response, human)
}
