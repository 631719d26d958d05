use roost_service_traits::SendError;

/// Crate-wide result type for composer operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selection would push the draft past the server's attachment limit.
    #[error("attachment limit of {limit} exceeded")]
    AttachmentLimit { limit: usize },

    /// A batch was submitted while a previous batch is still uploading.
    #[error("an upload batch is already in flight")]
    UploadInFlight,

    /// `attach_files` was called with an empty selection.
    #[error("no files to upload")]
    EmptyBatch,

    /// At least one file in the batch failed; the whole batch was discarded.
    #[error("upload failed: {message}")]
    UploadFailed { message: String },

    /// A send attempt failed in a way the pipeline does not recover from.
    #[error(transparent)]
    Send(#[from] SendError),
}
