//! Server-Sent Events (SSE) parser.
//!
//! `streamGenerateContent?alt=sse` answers with one `data:` event per
//! generated chunk. The parser is line based and works on any async
//! buffered reader; [`parse_sse_stream`] adapts a reqwest response.

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::ChatError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    /// The event data (usually JSON). Multi-line data is joined with `\n`.
    pub data: String,
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    on_event: impl FnMut(SseEvent) -> Result<(), ChatError>,
) -> Result<(), ChatError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(|e| std::io::Error::other(e.without_url())));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    parse_sse_reader(reader, on_event).await
}

/// Parse SSE events from a buffered reader.
///
/// An error returned by `on_event` stops parsing and is passed through.
pub async fn parse_sse_reader<R>(
    reader: R,
    mut on_event: impl FnMut(SseEvent) -> Result<(), ChatError>,
) -> Result<(), ChatError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(read_error)?
    {
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                on_event(SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                })?;
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = field_value(line, "event") {
            current_event = Some(event_type.to_string());
        } else if let Some(data) = field_value(line, "data") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data);
        }
        // id:, retry: and comments are ignored
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        on_event(SseEvent {
            event: current_event,
            data: current_data,
        })?;
    }

    Ok(())
}

/// A reqwest body timeout arrives wrapped in the io error from `StreamReader`.
fn read_error(e: std::io::Error) -> ChatError {
    let timed_out = e.kind() == std::io::ErrorKind::TimedOut
        || e.get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout);
    if timed_out {
        ChatError::Timeout
    } else {
        ChatError::RequestFailed(format!("stream read failed: {e}"))
    }
}

/// `name: value` or `name:value`.
fn field_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let value = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(value.strip_prefix(' ').unwrap_or(value))
}
