use crate::state::AppState;
use crate::tests::utils::{body_json, get, init_test_state, request, send};
use http::Method;
use serde_json::json;

fn user_token(state: &AppState) -> String {
    let resp = send(
        state,
        request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "secret1" })),
        ),
    );
    body_json(resp)["token"].as_str().unwrap().to_string()
}

fn add(state: &AppState, token: &str, property_id: serde_json::Value) -> astra::Response {
    send(
        state,
        request(
            Method::POST,
            "/api/cart",
            Some(token),
            Some(json!({ "propertyId": property_id })),
        ),
    )
}

#[test]
fn cart_requires_authentication() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/api/cart", None));
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["message"], "No token");
}

#[test]
fn add_check_list_remove() {
    let (_dir, state) = init_test_state();
    let token = user_token(&state);

    let resp = add(&state, &token, json!(1));
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["message"], "Added to cart");
    assert_eq!(body["item"]["propertyId"], "1");
    assert_eq!(body["item"]["property"]["title"], "Luxury Villa");

    let resp = send(&state, get("/api/cart/check/1", Some(&token)));
    assert_eq!(body_json(resp)["inCart"], true);

    let resp = send(&state, get("/api/cart", Some(&token)));
    assert_eq!(resp.status(), 200);
    let items = body_json(resp);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["property"]["location"], "Malibu, CA");

    let resp = send(&state, request(Method::DELETE, "/api/cart/1", Some(&token), None));
    assert_eq!(resp.status(), 200);

    let resp = send(&state, get("/api/cart/check/1", Some(&token)));
    assert_eq!(body_json(resp)["inCart"], false);
}

#[test]
fn numeric_and_string_ids_are_the_same_item() {
    let (_dir, state) = init_test_state();
    let token = user_token(&state);

    assert_eq!(add(&state, &token, json!("2")).status(), 200);

    let resp = add(&state, &token, json!(2));
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["message"], "Already in your cart");
}

#[test]
fn missing_property_id_is_400() {
    let (_dir, state) = init_test_state();
    let token = user_token(&state);

    let resp = send(
        &state,
        request(Method::POST, "/api/cart", Some(&token), Some(json!({}))),
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["message"], "Property ID required");
}

#[test]
fn removing_an_unsaved_item_is_404() {
    let (_dir, state) = init_test_state();
    let token = user_token(&state);

    let resp = send(&state, request(Method::DELETE, "/api/cart/7", Some(&token), None));
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["message"], "Item not found in cart");
}

#[test]
fn unresolvable_items_are_left_out_of_the_list() {
    let (_dir, state) = init_test_state();
    let token = user_token(&state);

    add(&state, &token, json!(3));
    add(&state, &token, json!("gone-listing"));

    let items = body_json(send(&state, get("/api/cart", Some(&token))));
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["propertyId"], "3");
}
