use crate::state::AppState;
use crate::tests::utils::{body_json, get, init_test_state, request, send};
use http::Method;
use serde_json::json;

fn signup(state: &AppState, email: &str) -> String {
    let resp = send(
        state,
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ada", "email": email, "password": "secret1" })),
        ),
    );
    assert_eq!(resp.status(), 201);
    body_json(resp)["token"].as_str().unwrap().to_string()
}

#[test]
fn signup_returns_token_and_profile() {
    let (_dir, state) = init_test_state();

    let resp = send(
        &state,
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ada", "email": "Ada@Example.com", "password": "secret1" })),
        ),
    );
    assert_eq!(resp.status(), 201);

    let body = body_json(resp);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password").is_none());
}

#[test]
fn duplicate_email_is_rejected() {
    let (_dir, state) = init_test_state();
    signup(&state, "ada@example.com");

    let resp = send(
        &state,
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Other", "email": "ADA@example.com", "password": "secret2" })),
        ),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn short_password_is_rejected() {
    let (_dir, state) = init_test_state();

    let resp = send(
        &state,
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "12345" })),
        ),
    );
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["message"].as_str().unwrap().contains("6"));
}

#[test]
fn login_and_me() {
    let (_dir, state) = init_test_state();
    signup(&state, "ada@example.com");

    let resp = send(
        &state,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1" })),
        ),
    );
    assert_eq!(resp.status(), 200);
    let token = body_json(resp)["token"].as_str().unwrap().to_string();

    let resp = send(&state, get("/api/auth/me", Some(&token)));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["name"], "Ada");
}

#[test]
fn wrong_password_and_unknown_email_look_the_same() {
    let (_dir, state) = init_test_state();
    signup(&state, "ada@example.com");

    let attempt = |email: &str, password: &str| {
        let resp = send(
            &state,
            request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            ),
        );
        (resp.status().as_u16(), body_json(resp)["message"].clone())
    };

    let wrong_password = attempt("ada@example.com", "nope-nope");
    let unknown_email = attempt("bob@example.com", "secret1");
    assert_eq!(wrong_password.0, 401);
    assert_eq!(wrong_password, unknown_email);
}

#[test]
fn me_requires_a_valid_token() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/api/auth/me", None));
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["message"], "No token");

    let resp = send(&state, get("/api/auth/me", Some("bogus")));
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["message"], "Invalid token");
}

#[test]
fn logout_revokes_the_session() {
    let (_dir, state) = init_test_state();
    let token = signup(&state, "ada@example.com");

    let resp = send(&state, request(Method::POST, "/api/auth/logout", Some(&token), None));
    assert_eq!(resp.status(), 200);

    let resp = send(&state, get("/api/auth/me", Some(&token)));
    assert_eq!(resp.status(), 401);
}

#[test]
fn malformed_body_is_400() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, request(Method::POST, "/api/auth/login", None, None));
    assert_eq!(resp.status(), 400);
}
