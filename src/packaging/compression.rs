//! Gzip compression of downstream bodies.

use std::io::Write;

use axum::body::Body;
use flate2::write::GzEncoder;
use flate2::Compression;
use futures_util::StreamExt;

use crate::adapter::AdapterError;

/// Drain `body` chunk by chunk into a gzip buffer.
///
/// Takes the body by value: it is consumed exactly once, and dropping it on
/// any early return releases the underlying connection.
pub async fn gzip_body(body: Body) -> Result<Vec<u8>, AdapterError> {
    let mut stream = body.into_data_stream();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AdapterError::Compression(e.to_string()))?;
        encoder
            .write_all(&chunk)
            .map_err(|e| AdapterError::Compression(e.to_string()))?;
    }

    encoder
        .finish()
        .map_err(|e| AdapterError::Compression(e.to_string()))
}

/// Read the whole body without compressing it.
pub async fn collect_body(body: Body) -> Result<bytes::Bytes, AdapterError> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AdapterError::DownstreamUnavailable(e.to_string()))
}

#[cfg(test)]
pub(crate) fn gunzip(data: &[u8]) -> Vec<u8> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).unwrap();
    out
}
