//! Media upload: `POST /api/v1/media`, multipart, one file per call.

use std::convert::Infallible;

use {
    bytes::Bytes,
    futures::{Stream, StreamExt},
    reqwest::{
        Body, Method,
        multipart::{Form, Part},
    },
    tracing::debug,
};

use {
    roost_common::{Attachment, FileSource},
    roost_service_traits::ProgressFn,
};

use crate::{ApiClient, Result};

/// Upload body chunk size; one progress callback fires per chunk.
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

impl ApiClient {
    /// Upload one file, reporting cumulative `(loaded, total)` progress as
    /// the body streams out. The response decodes to the created
    /// [`Attachment`]; unrecognized media types decode to
    /// [`MediaKind::Unknown`](roost_common::MediaKind::Unknown).
    pub async fn upload_media(&self, file: FileSource, progress: ProgressFn) -> Result<Attachment> {
        let url = self.endpoint("/api/v1/media")?;
        let total = file.data.len() as u64;
        debug!(file = %file.file_name, bytes = total, "uploading media");

        let body = Body::wrap_stream(progress_chunks(file.data, progress));
        let part = Part::stream_with_length(body, total)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self.request(Method::POST, url).multipart(form).send().await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }
}

/// Split `data` into refcounted chunks, reporting cumulative progress as
/// each chunk is pulled off the stream.
fn progress_chunks(
    data: Bytes,
    progress: ProgressFn,
) -> impl Stream<Item = std::result::Result<Bytes, Infallible>> {
    let total = data.len() as u64;
    let mut chunks = Vec::with_capacity(data.len().div_ceil(UPLOAD_CHUNK_BYTES));
    let mut offset = 0;
    while offset < data.len() {
        let end = (offset + UPLOAD_CHUNK_BYTES).min(data.len());
        chunks.push(data.slice(offset..end));
        offset = end;
    }

    let mut sent = 0u64;
    futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        progress(sent, total);
        Ok(chunk)
    })
}
