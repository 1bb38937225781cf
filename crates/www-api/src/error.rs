// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! API error response
//!

use crate::helpers::ErrorMsg;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use monolift_crud::CrudError;

/// Container for API errors.  Can be sent back to the client
pub struct ApiError(pub (StatusCode, Json<ErrorMsg>));

impl ApiError {
    /// A 400 with the given message
    pub fn bad_request<S: ToString>(message: S) -> Self {
        ApiError((
            StatusCode::BAD_REQUEST,
            Json(ErrorMsg {
                error_msg: message.to_string(),
            }),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(value: sqlx::Error) -> Self {
        let value: CrudError = value.into();
        value.into()
    }
}

impl From<CrudError> for ApiError {
    fn from(value: CrudError) -> Self {
        let status = match &value {
            CrudError::IdNotInDb | CrudError::NameNotInDb => StatusCode::NOT_FOUND,
            CrudError::ExerciseNameAlreadyInUse(_) | CrudError::TemplateNameAlreadyInUse(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError((
            status,
            Json(ErrorMsg {
                error_msg: value.to_string(),
            }),
        ))
    }
}
