use axum::http::StatusCode;
use thiserror::Error;

/// Ошибки сервисного слоя, которые handlers различают по HTTP-статусу
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid ID: {0}")]
    InvalidId(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// HTTP-статус для ошибки сервиса; всё, что не ServiceError, считается ошибкой хранилища
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<ServiceError>() {
        Some(e) => e.status(),
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Залогировать ошибку и вернуть HTTP-статус
pub fn log_and_status(context: &str, err: anyhow::Error) -> StatusCode {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("{}: {:#}", context, err);
    } else {
        tracing::warn!("{}: {}", context, err);
    }
    status
}

pub fn parse_uuid(id: &str) -> Result<uuid::Uuid, ServiceError> {
    uuid::Uuid::parse_str(id.trim()).map_err(|_| ServiceError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation: anyhow::Error = ServiceError::Validation("empty code".into()).into();
        let missing: anyhow::Error = ServiceError::NotFound("cost center".into()).into();
        let storage = anyhow::anyhow!("database is locked");

        assert_eq!(status_for(&validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&missing), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&storage), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_keeps_service_error() {
        let err = anyhow::Error::from(ServiceError::NotFound("x".into())).context("loading");
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid("not-a-uuid").is_err());
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_uuid(&format!(" {} ", id)).unwrap(), id);
    }
}
