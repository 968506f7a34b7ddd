//! HTTP clients for the Job and Evaluation services, plus the signed-in
//! user lookup.

mod evaluation;
mod jobs;
mod profile;

pub use evaluation::HttpEvaluationService;
pub use jobs::HttpJobService;
pub use profile::LocalStorageProfile;

use common::workflow::ServiceError;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;

fn transport(err: gloo_net::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

/// Non-2xx becomes [`ServiceError::Status`] with the body text; otherwise
/// the body is decoded as `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ServiceError::Decode(err.to_string()))
}
