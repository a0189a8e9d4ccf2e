//! Error handling integration tests
//!
//! Verify how gateway errors map to HTTP statuses and per-item results.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;
    use o2ims_gateway::core::batch::{BatchErrorKind, BatchResult};
    use o2ims_gateway::utils::error::{ErrorResponse, GatewayError};

    #[test]
    fn test_backend_errors_become_item_statuses() {
        let cases = [
            (GatewayError::not_found("pool rp-1 not found"), 404),
            (GatewayError::conflict("pool rp-1 already exists"), 409),
            (GatewayError::validation("name is required"), 400),
            (GatewayError::backend("adapter error"), 502),
            (GatewayError::unavailable("adapter offline"), 503),
            (GatewayError::internal("boom"), 500),
        ];

        for (index, (error, status)) in cases.iter().enumerate() {
            let result = BatchResult::business_failure(index, error);
            assert!(!result.success);
            assert_eq!(result.status_code, *status);
            assert!(result.data.is_none());
            assert_eq!(result.error_kind(), Some(BatchErrorKind::BusinessFailure));
        }
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let error = GatewayError::internal("database password rejected");
        let result = BatchResult::business_failure(0, &error);
        // The item carries the display form; the HTTP body hides details.
        assert!(result.error.unwrap().message.contains("database"));

        let body = error.error_response().into_body().try_into_bytes().unwrap();
        let rendered: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(rendered.error.code, "INTERNAL_ERROR");
        assert!(!rendered.error.message.contains("password"));
    }

    #[test]
    fn test_validation_error_body() {
        let error = GatewayError::validation("batch size must be between 1 and 100, got 0");
        let response = error.error_response();
        assert_eq!(response.status().as_u16(), 400);

        let body = response.into_body().try_into_bytes().unwrap();
        let rendered: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(rendered.error.code, "VALIDATION_ERROR");
        assert!(rendered.error.message.contains("got 0"));
        assert!(rendered.error.timestamp > 0);
    }
}
