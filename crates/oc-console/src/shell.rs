//! Line-oriented dashboard shell.
//!
//! Each input line is a query or a command. An answer is printed once the
//! thinking delay has elapsed; a line that arrives first supersedes it.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use uuid::Uuid;

use crate::session::Session;

pub const HELP: &str = "Ask about shipments (TR-1241), months, suppliers, logistics, sales, \
inventory or security. Commands: :evidence toggles source data, :help, :quit.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Query(&'a str),
    ToggleEvidence,
    Help,
    Quit,
    Blank,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => Self::Blank,
            ":evidence" | ":e" => Self::ToggleEvidence,
            ":help" | ":h" => Self::Help,
            ":quit" | ":q" => Self::Quit,
            query => Self::Query(query),
        }
    }
}

/// Drive `session` from `input` until EOF or `:quit`.
///
/// An answer still pending at EOF is delivered before returning; one pending
/// at `:quit` is dropped.
pub async fn run<R, W>(
    session: &mut Session,
    input: R,
    output: &mut W,
    delay: Duration,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut pending: Option<(Uuid, Instant)> = None;

    loop {
        let line = match pending {
            Some((ticket, deadline)) => {
                tokio::select! {
                    () = tokio::time::sleep_until(deadline) => {
                        deliver(session, ticket, output).await?;
                        pending = None;
                        continue;
                    }
                    line = lines.next_line() => line?,
                }
            }
            None => lines.next_line().await?,
        };

        let Some(line) = line else { break };

        match Command::parse(&line) {
            Command::Blank => {}
            Command::Quit => {
                tracing::info!("quit requested");
                return Ok(());
            }
            Command::Help => write_line(output, HELP).await?,
            Command::ToggleEvidence => {
                let on = session.toggle_evidence();
                let status = if on {
                    "[evidence shown]"
                } else {
                    "[evidence hidden]"
                };
                write_line(output, status).await?;
                if on {
                    let current = session.last_response().map(|r| r.answer.evidence_json());
                    if let Some(json) = current {
                        write_line(output, &json).await?;
                    }
                }
            }
            Command::Query(text) => {
                let ticket = session.submit(text)?;
                pending = Some((ticket, Instant::now() + delay));
            }
        }
    }

    if let Some((ticket, deadline)) = pending {
        tokio::time::sleep_until(deadline).await;
        deliver(session, ticket, output).await?;
    }
    Ok(())
}

async fn deliver<W>(session: &mut Session, ticket: Uuid, output: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = session.complete(ticket)?;
    if !response.answer.grounded {
        tracing::warn!(%ticket, "delivered a withheld answer");
    }
    write_line(output, &session.render(&response)).await
}

async fn write_line<W>(output: &mut W, text: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
