//! Conversion of `validator` failures into [`AppError`].

use validator::Validate;

use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;

/// Validate a payload, joining every field message into one error.
pub(crate) fn check_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid value for {field}"),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
