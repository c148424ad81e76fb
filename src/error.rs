pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The board must hold at least one queen. Reported before any search
    /// state is allocated.
    #[error("invalid board size: n must be at least 1, got {0}")]
    InvalidBoardSize(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
