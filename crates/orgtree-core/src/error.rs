pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No usable records: {records_seen} record(s) read, none with an identifier")]
    EmptyInput { records_seen: usize },

    #[error(
        "Subtree under `{id}` is {depth} levels deep; nested export is limited to {limit} (use the flat export)"
    )]
    TreeTooDeep {
        id: String,
        depth: usize,
        limit: usize,
    },

    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}
