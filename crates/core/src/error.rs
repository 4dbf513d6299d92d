/// Errors raised by the domain layer for the caller's identity and rights.
///
/// Store failures have their own type
/// ([`StoreError`](crate::bulk_import::store::StoreError)); import problems
/// are reported as data, not as errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
