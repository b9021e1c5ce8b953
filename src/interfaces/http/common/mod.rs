//! Building blocks shared by all HTTP modules

pub mod api_error;
pub mod validated_json;

pub use api_error::{ApiError, ErrorBody};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
