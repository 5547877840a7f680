//! Asynchronous, cancellable convenience hashing
//!
//! Each operation is the synchronous update loop with suspension points at
//! chunk boundaries. Cancellation is a `tokio::sync::oneshot` signal, polled
//! between chunks only — never mid-chunk — so a cancelled transform is left
//! in a well-defined buffered state and the failure surfaces as
//! [`HashError::Cancelled`] rather than a silent partial result.

use std::io::SeekFrom;
use std::path::Path;

use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::oneshot;

use crate::async_result::AsyncHashResult;
use crate::{ByteRange, HashError, HashResult, Result, TextEncoding, Transform};

/// Signal half of a cancellation channel accepted by every operation here.
pub type CancelSignal = oneshot::Receiver<()>;

fn is_cancelled(cancel: &mut Option<&mut CancelSignal>) -> bool {
    match cancel.as_mut() {
        Some(rx) => matches!(rx.try_recv(), Ok(())),
        None => false,
    }
}

/// Hash an in-memory buffer, yielding to the runtime between chunks.
///
/// # Errors
///
/// `Cancelled` when the signal fires between chunks; propagates finalize
/// failures.
pub async fn compute_bytes<T: Transform + ?Sized>(
    transform: &mut T,
    data: &[u8],
    mut cancel: Option<&mut CancelSignal>,
) -> Result<HashResult> {
    transform.initialize();
    for chunk in data.chunks(transform.buffer_size()) {
        if is_cancelled(&mut cancel) {
            tracing::warn!(transform = transform.name(), "buffer hashing cancelled");
            return Err(HashError::Cancelled);
        }
        transform.update(chunk);
        tokio::task::yield_now().await;
    }
    transform.finalize()
}

/// Hash text under the given encoding, yielding between chunks.
///
/// # Errors
///
/// Same conditions as [`compute_bytes`].
pub async fn compute_text<T: Transform + ?Sized>(
    transform: &mut T,
    text: &str,
    encoding: TextEncoding,
    cancel: Option<&mut CancelSignal>,
) -> Result<HashResult> {
    compute_bytes(transform, &encoding.encode(text), cancel).await
}

/// Hash every chunk a byte stream yields.
///
/// # Errors
///
/// `Cancelled` when the signal fires between chunks; propagates finalize
/// failures.
pub async fn compute_stream<T, S>(
    transform: &mut T,
    mut stream: S,
    mut cancel: Option<&mut CancelSignal>,
) -> Result<HashResult>
where
    T: Transform + ?Sized,
    S: Stream<Item = Vec<u8>> + Unpin,
{
    transform.initialize();
    let mut total = 0u64;
    while let Some(chunk) = stream.next().await {
        if is_cancelled(&mut cancel) {
            tracing::warn!(
                transform = transform.name(),
                bytes = total,
                "stream hashing cancelled"
            );
            return Err(HashError::Cancelled);
        }
        transform.update(&chunk);
        total += chunk.len() as u64;
    }
    tracing::debug!(transform = transform.name(), bytes = total, "stream hashed");
    transform.finalize()
}

/// Hash a byte range of a file, reading in `buffer_size()` chunks.
///
/// # Errors
///
/// `NotFound` when the file does not exist, `Io` on other access failures,
/// `InvalidArgument` when the range extends past the end of the file,
/// `Cancelled` when the signal fires between chunks.
pub async fn compute_file<T: Transform + ?Sized>(
    transform: &mut T,
    path: impl AsRef<Path>,
    range: ByteRange,
    mut cancel: Option<&mut CancelSignal>,
) -> Result<HashResult> {
    let path = path.as_ref();
    let mut file = File::open(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            HashError::NotFound(path.to_path_buf())
        } else {
            HashError::Io(err)
        }
    })?;
    if range.from > 0 {
        file.seek(SeekFrom::Start(range.from)).await?;
    }

    transform.initialize();
    let mut buf = vec![0u8; transform.buffer_size()];
    let mut remaining = range.length;
    let mut total = 0u64;
    loop {
        if is_cancelled(&mut cancel) {
            tracing::warn!(
                transform = transform.name(),
                bytes = total,
                "file hashing cancelled"
            );
            return Err(HashError::Cancelled);
        }
        let cap = match remaining {
            Some(left) => left.min(buf.len() as u64) as usize,
            None => buf.len(),
        };
        if cap == 0 {
            break;
        }
        let n = file.read(&mut buf[..cap]).await?;
        if n == 0 {
            if remaining.is_some_and(|left| left > 0) {
                return Err(HashError::invalid_argument(
                    "range extends past end of file",
                ));
            }
            break;
        }
        transform.update(&buf[..n]);
        if let Some(left) = &mut remaining {
            *left -= n as u64;
        }
        total += n as u64;
    }
    tracing::debug!(transform = transform.name(), bytes = total, "file hashed");
    transform.finalize()
}

/// Run a whole-buffer hash on the runtime and resolve through an
/// [`AsyncHashResult`].
pub fn spawn_bytes(mut transform: Box<dyn Transform>, data: Vec<u8>) -> AsyncHashResult {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = compute_bytes(transform.as_mut(), &data, None).await;
        let _ = tx.send(result);
    });
    AsyncHashResult::new(rx)
}
