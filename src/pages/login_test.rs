use super::*;

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("a@b.c", ""), Err("Enter both email and password."));
}

#[test]
fn validate_credentials_requires_email_shape() {
    assert_eq!(validate_credentials("admin", "pw"), Err("Enter a valid email address."));
    assert_eq!(validate_credentials("admin@shop.io", "pw"), Ok(()));
}

#[test]
fn login_failed_message_for_bad_credentials() {
    assert_eq!(login_failed_message(&ApiError::Unauthorized), "Invalid email or password.");
    assert_eq!(
        login_failed_message(&ApiError::Status { status: 400 }),
        "Invalid email or password."
    );
}

#[test]
fn login_failed_message_for_transport_problems() {
    assert_eq!(
        login_failed_message(&ApiError::Timeout(10_000)),
        "Could not reach the server. Try again."
    );
}

#[test]
fn login_failed_message_falls_back_to_error_text() {
    assert_eq!(
        login_failed_message(&ApiError::Status { status: 500 }),
        "Sign-in failed: request failed with status 500"
    );
}
