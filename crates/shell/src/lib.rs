//! `cataloger-shell`: a terminal front end for item entry.
//!
//! Reads one command per line, drives an [`ItemEntryForm`], and prints whatever the form
//! reports back. After every submit or cancel a fresh form is opened.

pub mod command;
pub mod host;
pub mod platform;

use cataloger_entry::{
    BarcodeIngestor, Field, FormConfig, ItemEntryForm, ScanOutcome, SubmitError,
};
use cataloger_inventory::Item;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{Command, HELP};
use crate::host::CatalogHost;
use crate::platform::TypedBarcode;

/// Run the shell until `quit` or end of input. Returns every item added.
pub async fn run<R, W>(input: R, mut output: W, config: FormConfig) -> anyhow::Result<Vec<Item>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut form = ItemEntryForm::new(CatalogHost::default(), config);
    let ingestor = BarcodeIngestor::new(TypedBarcode::default());
    let mut lines = input.lines();

    output.write_all(b"new item (type `help` for commands)\n").await?;
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write_line(&mut output, &e.to_string()).await?;
                continue;
            }
        };

        let mut replies = Vec::new();
        match command {
            Command::Quit => break,
            Command::Help => replies.push(HELP.to_string()),
            Command::Set(field, text) => form.set_field(field, text)?,
            Command::Tag(text) => {
                if let Ok(Some(tag)) = form.add_tag(&text) {
                    replies.push(format!("tagged {tag}"));
                }
            }
            Command::Untag(text) => {
                if !form.remove_tag(&text)? {
                    replies.push(format!("no tag {text}"));
                }
            }
            Command::Scan(payload) => {
                ingestor.platform().stage(payload);
                match form.scan(&ingestor).await {
                    Ok(ScanOutcome::Delivered(p)) => replies.push(format!("scanned {p}")),
                    Ok(ScanOutcome::PermissionRequested(permission)) => {
                        replies.push(format!("camera permission {permission:?}; scan again"))
                    }
                    Ok(_) => {}
                    Err(e) => replies.push(e.to_string()),
                }
            }
            Command::Show => replies.extend(describe(&form)),
            Command::Submit => match form.submit() {
                Ok(_) => {
                    form.reopen();
                    replies.push("new item".to_string());
                }
                Err(SubmitError::Rejected(_)) => {}
                Err(e) => return Err(e.into()),
            },
            Command::Cancel => {
                form.reopen();
                replies.push("discarded; new item".to_string());
            }
        }

        for line in form.host_mut().drain_output().into_iter().chain(replies) {
            write_line(&mut output, &line).await?;
        }
        form.take_notices();
    }

    output.flush().await?;
    Ok(form.into_host().into_items())
}

fn describe(form: &ItemEntryForm<CatalogHost>) -> Vec<String> {
    let mut lines: Vec<String> = Field::ALL
        .into_iter()
        .map(|f| format!("  {f}: {}", form.field(f).unwrap_or("")))
        .collect();
    if let Some(tags) = form.tags() {
        let tags: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        lines.push(format!("  tags: [{}]", tags.join(", ")));
    }
    lines
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await
}
