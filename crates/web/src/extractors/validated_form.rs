//! Validated form extractor.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// URL-encoded form extractor that automatically validates the payload.
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Extract form fields
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        // Validate
        value.validate().map_err(|e| {
            // Report the first failing field in name order
            let message = e
                .field_errors()
                .into_iter()
                .min_by_key(|(field, _)| *field)
                .and_then(|(_, errors)| errors.first())
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            AppError::validation(message)
        })?;

        Ok(ValidatedForm(value))
    }
}
