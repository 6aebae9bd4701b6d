//! Conversions from `rusqlite`/`reqwest` errors into `ProspectingError`.

use prospecting_domain::ProspectingError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ProspectingError);

impl From<InfraError> for ProspectingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ProspectingError> for InfraError {
    fn from(value: ProspectingError) -> Self {
        InfraError(value)
    }
}

trait IntoProspectingError {
    fn into_prospecting(self) -> ProspectingError;
}

impl IntoProspectingError for rusqlite::Error {
    fn into_prospecting(self) -> ProspectingError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        ProspectingError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        ProspectingError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        ProspectingError::Database("unique constraint violation".into())
                    }
                    _ => ProspectingError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                ProspectingError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                ProspectingError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ProspectingError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => ProspectingError::Database("invalid UTF-8 returned from sqlite".into()),
            other => ProspectingError::Database(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for InfraError {
    fn from(value: rusqlite::Error) -> Self {
        InfraError(value.into_prospecting())
    }
}

impl IntoProspectingError for reqwest::Error {
    fn into_prospecting(self) -> ProspectingError {
        if self.is_timeout() {
            return ProspectingError::Internal("HTTP request timed out".into());
        }
        if self.is_connect() {
            return ProspectingError::Internal("HTTP connection failure".into());
        }
        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message = format!(
                "HTTP {} {}",
                code,
                status.canonical_reason().unwrap_or("unknown status")
            );
            return match code {
                401 | 403 => ProspectingError::AuthFailed,
                404 => ProspectingError::NotFound(message),
                400..=499 => ProspectingError::InvalidInput(message),
                _ => ProspectingError::Internal(message),
            };
        }
        ProspectingError::Internal(self.to_string())
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(value: reqwest::Error) -> Self {
        InfraError(value.into_prospecting())
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(ProspectingError::Database(format!("connection pool error: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Error as SqlError;
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: ProspectingError = InfraError::from(err).into();
        match mapped {
            ProspectingError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[test]
    fn http_status_401_maps_to_auth_failed() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: ProspectingError = InfraError::from(error).into();
            assert!(matches!(mapped, ProspectingError::AuthFailed));
        });
    }
}
