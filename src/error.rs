use thiserror::Error;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The portal returned a page without one of the hidden anti-forgery
    /// fields it normally carries. Usually means the site markup changed.
    #[error("portal page is missing the hidden `{0}` field")]
    PortalFormat(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid portal URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("roster error: {0}")]
    Roster(String),
}
