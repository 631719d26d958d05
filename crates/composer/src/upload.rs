//! Concurrent upload batches: fan out one task per file, fold per-chunk
//! progress into a batch mean, join all, and keep everything or nothing.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use {
    roost_common::{Attachment, FileSource},
    roost_service_traits::{ProgressFn, UploadService},
};

use crate::error::{Error, Result};

/// Upload every file in `files` concurrently, reporting aggregate batch
/// progress (the mean of all per-file fractions) through `progress`.
///
/// Completion is all-or-nothing: every task is awaited, and if any file
/// failed the results of the files that succeeded are discarded — partial
/// attachment sets make confusing drafts, so one failure gives the user a
/// single retry point. On success, attachments come back in the original
/// file order regardless of completion order.
pub(crate) async fn run_batch<S>(
    service: &S,
    files: Vec<FileSource>,
    progress: Arc<dyn Fn(f32) + Send + Sync>,
) -> Result<Vec<Attachment>>
where
    S: UploadService + ?Sized,
{
    let count = files.len();
    let fractions = Arc::new(Mutex::new(vec![0.0f32; count]));

    let mut uploads = Vec::with_capacity(count);
    for (index, file) in files.into_iter().enumerate() {
        let fractions = Arc::clone(&fractions);
        let progress = Arc::clone(&progress);
        uploads.push(async move {
            let report: ProgressFn = Box::new(move |loaded, total| {
                let fraction = if total == 0 {
                    1.0
                } else {
                    (loaded as f32 / total as f32).clamp(0.0, 1.0)
                };
                let mean = {
                    let mut slots = fractions.lock().unwrap_or_else(|e| e.into_inner());
                    slots[index] = fraction;
                    slots.iter().sum::<f32>() / slots.len() as f32
                };
                progress(mean);
            });
            let name = file.file_name.clone();
            (index, name, service.upload(file, report).await)
        });
    }

    let results = futures::future::join_all(uploads).await;

    let mut attachments: Vec<Option<Attachment>> = vec![None; count];
    let mut first_error = None;
    for (index, name, result) in results {
        match result {
            Ok(attachment) => {
                debug!(file = %name, id = %attachment.id, "attachment uploaded");
                attachments[index] = Some(attachment);
            },
            Err(error) => {
                warn!(file = %name, error = %error, "attachment upload failed");
                first_error.get_or_insert(error);
            },
        }
    }

    match first_error {
        Some(error) => Err(Error::UploadFailed {
            message: error.to_string(),
        }),
        None => Ok(attachments.into_iter().flatten().collect()),
    }
}
