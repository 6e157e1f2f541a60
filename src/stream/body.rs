//! Paced body streams for the drip and range endpoints.
//!
//! Each chunk is yielded as its own body frame, so the transport writes
//! (and flushes) it before the next pause begins. Dropping the stream on
//! client disconnect stops further chunks immediately.

use std::convert::Infallible;

use axum::body::Bytes;
use futures_util::stream::{self, Stream};

use super::pacing;

/// `numbytes` single `*` bytes, each preceded by the same pause, so total
/// elapsed time adds up to the caller's duration budget.
pub fn drip_stream(numbytes: u64, pause_secs: f64) -> impl Stream<Item = Result<Bytes, Infallible>> {
    stream::unfold(0u64, move |sent| async move {
        if sent >= numbytes {
            return None;
        }
        pacing::pause(pause_secs).await;
        Some((Ok(Bytes::from_static(b"*")), sent + 1))
    })
}

/// Bytes `[first, last]` of the synthetic alphabet resource, in chunks of
/// `chunk_size`. Every chunk (a final partial one included) is paced in
/// proportion to its own byte count.
pub fn range_stream(
    first: u64,
    last: u64,
    chunk_size: u64,
    pause_per_byte: f64,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    let chunk_size = chunk_size.max(1);
    stream::unfold(first, move |pos| async move {
        if pos > last {
            return None;
        }
        let end = pos.saturating_add(chunk_size).min(last + 1);
        pacing::pause(pause_per_byte * (end - pos) as f64).await;
        Some((Ok(alphabet_chunk(pos, end)), end))
    })
}

/// The synthetic resource content: byte at absolute position `i` is
/// `'a' + (i mod 26)`.
pub fn alphabet_chunk(start: u64, end: u64) -> Bytes {
    (start..end)
        .map(|i| b'a' + (i % 26) as u8)
        .collect::<Vec<u8>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::time::Instant;

    async fn collect(stream: impl Stream<Item = Result<Bytes, Infallible>>) -> Vec<Bytes> {
        stream.map(|chunk| chunk.unwrap()).collect().await
    }

    #[tokio::test]
    async fn test_drip_emits_exact_byte_count() {
        let chunks = collect(drip_stream(5, 0.0)).await;
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.as_ref() == b"*"));
    }

    #[tokio::test]
    async fn test_drip_paces_to_duration_budget() {
        let start = Instant::now();
        let chunks = collect(drip_stream(4, 0.05)).await;
        assert_eq!(chunks.len(), 4);
        assert!(start.elapsed().as_millis() >= 200);
    }

    #[tokio::test]
    async fn test_alphabet_wraps_at_z() {
        assert_eq!(alphabet_chunk(0, 4).as_ref(), b"abcd");
        assert_eq!(alphabet_chunk(25, 28).as_ref(), b"zab");
    }

    #[tokio::test]
    async fn test_range_stream_chunking() {
        let chunks = collect(range_stream(0, 25, 10, 0.0)).await;
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].as_ref(), b"abcdefghij");
        assert_eq!(chunks[1].as_ref(), b"klmnopqrst");
        assert_eq!(chunks[2].as_ref(), b"uvwxyz");
    }

    #[tokio::test]
    async fn test_range_stream_mid_resource_offset() {
        let chunks = collect(range_stream(2, 5, 100, 0.0)).await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref(), b"cdef");
    }

    #[tokio::test]
    async fn test_zero_chunk_size_treated_as_one() {
        let chunks = collect(range_stream(0, 2, 0, 0.0)).await;
        assert_eq!(chunks.len(), 3);
    }
}
