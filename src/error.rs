use crate::site_text::ParseError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("site not found")]
    NotFound,

    #[error("invalid site text: {0}")]
    Parse(#[from] ParseError),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}
