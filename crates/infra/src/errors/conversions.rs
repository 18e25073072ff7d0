//! Conversions from external infrastructure errors into the client error.

use reqwest::Error as HttpError;
use salt_netapi_domain::SaltError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SaltError);

impl From<InfraError> for SaltError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SaltError> for InfraError {
    fn from(value: SaltError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSaltError {
    fn into_salt(self) -> SaltError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SaltError */
/* -------------------------------------------------------------------------- */

impl IntoSaltError for HttpError {
    fn into_salt(self) -> SaltError {
        if self.is_timeout() {
            return SaltError::Timeout(self.to_string());
        }

        if self.is_connect() {
            return SaltError::Transport(format!("connection failure: {}", self));
        }

        if let Some(status) = self.status() {
            return SaltError::Status {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        if self.is_builder() {
            return SaltError::Config(format!("invalid request: {}", self));
        }

        SaltError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_salt())
    }
}

/// Shorthand used by the transports.
pub(crate) fn http_error(err: HttpError) -> SaltError {
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
