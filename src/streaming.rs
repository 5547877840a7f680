//! Streaming hash computation over any byte-chunk stream
//!
//! Wraps a `Stream<Item = Vec<u8>>` and hashes chunks incrementally as they
//! arrive, emitting a progress item per chunk and the final result when the
//! input ends.

use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{HashResult, Result, Transform};

pin_project! {
    /// Streaming hasher that processes chunks incrementally.
    pub struct StreamingHasher<S, T> {
        #[pin]
        input: S,
        transform: T,
        finished: bool,
        total_bytes: u64,
    }
}

impl<S, T> StreamingHasher<S, T>
where
    S: Stream<Item = Vec<u8>>,
    T: Transform,
{
    /// Create a streaming hasher over `input`.
    pub fn new(input: S, mut transform: T) -> Self {
        transform.initialize();
        Self {
            input,
            transform,
            finished: false,
            total_bytes: 0,
        }
    }

    /// Total number of bytes processed so far.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

/// Progress item from a streaming hash computation.
#[derive(Debug, Clone)]
pub struct StreamHashChunk {
    /// Bytes processed in this chunk
    pub bytes_processed: u64,
    /// Total bytes processed so far
    pub total_bytes: u64,
    /// Whether this is the final item carrying the result
    pub is_final: bool,
    /// Final result (only present when `is_final` is true)
    pub result: Option<HashResult>,
}

/// Outcome of draining a [`StreamingHasher`] to completion.
#[derive(Debug, Clone)]
pub struct StreamHashResult {
    /// The final hash value
    pub result: HashResult,
    /// Total bytes processed
    pub total_bytes: u64,
}

impl<S, T> Stream for StreamingHasher<S, T>
where
    S: Stream<Item = Vec<u8>>,
    T: Transform,
{
    type Item = Result<StreamHashChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.input.as_mut().poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                let chunk_size = chunk.len() as u64;
                *this.total_bytes += chunk_size;
                this.transform.update(&chunk);

                Poll::Ready(Some(Ok(StreamHashChunk {
                    bytes_processed: chunk_size,
                    total_bytes: *this.total_bytes,
                    is_final: false,
                    result: None,
                })))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                match this.transform.finalize() {
                    Ok(result) => Poll::Ready(Some(Ok(StreamHashChunk {
                        bytes_processed: 0,
                        total_bytes: *this.total_bytes,
                        is_final: true,
                        result: Some(result),
                    }))),
                    Err(err) => Poll::Ready(Some(Err(err))),
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Drain a streaming hasher and collect the final result.
///
/// # Errors
///
/// Propagates finalize failures; fails when the stream ends without a final
/// item.
pub async fn collect_hash<S, T>(mut hasher: StreamingHasher<S, T>) -> Result<StreamHashResult>
where
    S: Stream<Item = Vec<u8>> + Unpin,
    T: Transform + Unpin,
{
    use futures::StreamExt;

    let mut total_bytes = 0;
    let mut final_result = None;

    while let Some(chunk_result) = hasher.next().await {
        let chunk = chunk_result?;
        total_bytes = chunk.total_bytes;

        if chunk.is_final {
            final_result = chunk.result;
            break;
        }
    }

    let result = final_result.ok_or_else(|| {
        crate::HashError::invalid_argument("stream ended without producing a final result")
    })?;

    Ok(StreamHashResult {
        result,
        total_bytes,
    })
}
