// External sample feed
//
// Reads "<endpoint-id> <value>" lines from a file or FIFO on a background
// thread and hands parsed entries to the main loop over a channel. The value
// is a latency in milliseconds, 999, or "lost".

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use thiserror::Error;

use super::config::LOST_SENTINEL;

/// One externally supplied measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub endpoint_id: String,
    /// Wire value; LOST_SENTINEL means lost
    pub value: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("missing value for endpoint '{0}'")]
    MissingValue(String),

    #[error("invalid latency '{value}' for endpoint '{endpoint}'")]
    InvalidValue { endpoint: String, value: String },

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Parse one feed line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_feed_line(line: &str) -> Result<Option<FeedEntry>, FeedError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    // Non-empty after trim, so there is at least one field
    let endpoint_id = fields.next().unwrap_or_default().to_string();
    let Some(raw_value) = fields.next() else {
        return Err(FeedError::MissingValue(endpoint_id));
    };
    if let Some(extra) = fields.next() {
        return Err(FeedError::TrailingInput(extra.to_string()));
    }

    let value = if raw_value.eq_ignore_ascii_case("lost") {
        LOST_SENTINEL
    } else {
        let trimmed = raw_value.strip_suffix("ms").unwrap_or(raw_value);
        trimmed.parse::<u32>().map_err(|_| FeedError::InvalidValue {
            endpoint: endpoint_id.clone(),
            value: raw_value.to_string(),
        })?
    };

    Ok(Some(FeedEntry { endpoint_id, value }))
}

/// Spawn a thread reading feed lines from `reader`
///
/// Malformed lines are logged and skipped. The thread ends at EOF, on a read
/// error, or once the receiver is dropped.
pub fn spawn_feed_reader<R>(reader: R) -> Receiver<FeedEntry>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (idx, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "feed read failed, closing feed");
                    break;
                }
            };

            match parse_feed_line(&line) {
                Ok(Some(entry)) => {
                    if tx.send(entry).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "skipping malformed feed line");
                }
            }
        }
        tracing::debug!("feed reader finished");
    });

    rx
}
