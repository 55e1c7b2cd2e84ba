use hlab_api::ApiError;
use thiserror::Error;

use crate::event::Envelope;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Sending message envelope failed")]
    ActionSendFailed(#[from] tokio::sync::mpsc::error::SendError<Envelope>),
    #[error("Error aggregation")]
    Aggregate(Vec<AppError>),
    #[error("Backend request failed")]
    Api(#[from] ApiError),
    #[error("Clipboard operation failed")]
    ClipboardFailed(#[from] arboard::Error),
    #[error("Terminal operation failed")]
    TerminalOperationFailed(#[from] std::io::Error),
    #[error("Terminal not initialized")]
    TerminalNotInitialized,
}
