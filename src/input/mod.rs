// Input processing module
// Reads raw targets from arguments, a file or stdin and feeds the scan queue

pub mod normalizer;

pub use normalizer::normalize_target;

use crate::Result;
use crate::scanner::pool::TargetQueue;
use anyhow::Context;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Where targets come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// Positional command-line arguments
    Args(Vec<String>),
    /// Newline-delimited file; blank lines and `#` comments yield no target
    File(PathBuf),
    /// Newline-delimited standard input, read until end of stream
    Stdin,
}

impl TargetSource {
    /// Pick the source from the parsed CLI: arguments first, then file, then stdin
    pub fn from_args(args: &crate::cli::Args) -> Self {
        if !args.targets.is_empty() {
            TargetSource::Args(args.targets.clone())
        } else if let Some(path) = &args.input_file {
            TargetSource::File(path.clone())
        } else {
            TargetSource::Stdin
        }
    }

    /// Normalize every target and push it onto the queue
    ///
    /// Blocks while the queue is full. Returns the number of targets
    /// enqueued. The queue is closed when this returns and `queue` drops.
    pub async fn feed(self, queue: TargetQueue) -> Result<usize> {
        match self {
            TargetSource::Args(raw) => {
                let mut enqueued = 0;
                for target in raw.iter().filter_map(|line| normalize_target(line)) {
                    if !enqueue(&queue, target).await {
                        break;
                    }
                    enqueued += 1;
                }
                Ok(enqueued)
            }
            TargetSource::File(path) => {
                let file = tokio::fs::File::open(&path)
                    .await
                    .with_context(|| format!("Failed to open target file {}", path.display()))?;
                feed_lines(BufReader::new(file), queue).await
            }
            TargetSource::Stdin => feed_lines(BufReader::new(tokio::io::stdin()), queue).await,
        }
    }
}

/// Feed newline-delimited targets from any async reader
///
/// Lines are read as raw bytes until end of stream; invalid UTF-8 is replaced
/// rather than ending the input, so one bad line never drops the rest.
pub async fn feed_lines<R>(mut reader: R, queue: TargetQueue) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut enqueued = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read targets")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let Some(target) = normalize_target(&line) else {
            continue;
        };
        if !enqueue(&queue, target).await {
            break;
        }
        enqueued += 1;
    }

    Ok(enqueued)
}

/// Send one target. Returns false once the queue is closed.
async fn enqueue(queue: &TargetQueue, target: String) -> bool {
    if queue.send(target).await.is_err() {
        debug!("Target queue closed, stopping input");
        return false;
    }
    true
}
