//! Promotion Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A promotion with this code already exists")
        }
        PromotionsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product in applicable_products")
        }
        PromotionsServiceError::MissingRequiredData | PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promotion payload")
        }
        PromotionsServiceError::NotFound => StatusError::not_found().brief("Promotion not found"),
        PromotionsServiceError::Evaluation(source) => {
            error!("stored promotion could not be evaluated: {source}");

            StatusError::internal_server_error()
        }
        PromotionsServiceError::Sql(source) => {
            error!("failed to process promotion: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront::promotions::evaluation::EvaluationError;

    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            into_status_error(PromotionsServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
        assert_eq!(
            into_status_error(PromotionsServiceError::InvalidReference).code,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            into_status_error(PromotionsServiceError::InvalidData).code,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            into_status_error(PromotionsServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn malformed_promotions_are_server_errors() {
        assert_eq!(
            into_status_error(PromotionsServiceError::Evaluation(EvaluationError::Overflow)).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
