use crate::db::replace_all_properties;
use crate::domain::{Property, PropertyId, PropertyType};
use crate::tests::utils::{body_json, get, init_test_state, seed_store, send};

#[test]
fn health_check_responds() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/", None));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["ok"], true);
}

#[test]
fn empty_store_serves_sample_data() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/api/properties", None));
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["total"], state.sample.len());
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["totalPages"], state.sample.len().div_ceil(10));
    assert_eq!(body["properties"].as_array().unwrap().len(), 10);
    assert_eq!(body["properties"][0]["title"], "Luxury Villa");
}

#[test]
fn seeded_store_is_preferred_over_sample_data() {
    let (_dir, state) = init_test_state();

    let only = Property {
        id: PropertyId::from(900),
        title: "Harbor Cottage".into(),
        location: "Portland, ME".into(),
        property_type: PropertyType::ForSale,
        bedrooms: 2,
        bathrooms: 1,
        area: "900 sq ft".into(),
        price: "$450,000".into(),
        description: "Small cottage by the water".into(),
        features: vec![],
        images: vec![],
    };
    replace_all_properties(&state.db, &[only]).expect("Seeding failed");

    let body = body_json(send(&state, get("/api/properties", None)));
    assert_eq!(body["total"], 1);
    assert_eq!(body["properties"][0]["title"], "Harbor Cottage");

    // Sample-only ids are still reachable by id.
    let resp = send(&state, get("/api/properties/1", None));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["title"], "Luxury Villa");
}

#[test]
fn filters_are_decoded_and_combined() {
    let (_dir, state) = init_test_state();
    seed_store(&state);

    let body = body_json(send(
        &state,
        get("/api/properties?search=luxury%20villa&location=ca&limit=50", None),
    ));

    let properties = body["properties"].as_array().unwrap();
    assert!(!properties.is_empty());
    for p in properties {
        assert_eq!(p["title"], "Luxury Villa");
        assert!(p["location"].as_str().unwrap().to_lowercase().contains("ca"));
    }
    assert_eq!(body["total"], properties.len());
}

#[test]
fn price_and_bedroom_filters_apply() {
    let (_dir, state) = init_test_state();

    let body = body_json(send(
        &state,
        get(
            "/api/properties?minPrice=1000000&maxPrice=2000000&bedrooms=4&type=for%20sale&limit=100",
            None,
        ),
    ));

    let properties = body["properties"].as_array().unwrap();
    assert!(!properties.is_empty());
    for p in properties {
        assert!(p["bedrooms"].as_u64().unwrap() >= 4);
        assert_eq!(p["type"], "For Sale");
        let price: u64 = p["price"]
            .as_str()
            .unwrap()
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap();
        assert!((1_000_000..=2_000_000).contains(&price));
    }
}

#[test]
fn page_past_the_end_is_empty_but_reports_totals() {
    let (_dir, state) = init_test_state();

    let body = body_json(send(&state, get("/api/properties?page=99&limit=10", None)));
    assert_eq!(body["page"], 99);
    assert_eq!(body["total"], state.sample.len());
    assert!(body["properties"].as_array().unwrap().is_empty());
}

#[test]
fn invalid_paging_values_fall_back_to_defaults() {
    let (_dir, state) = init_test_state();

    let body = body_json(send(&state, get("/api/properties?page=zero&limit=-3", None)));
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[test]
fn unknown_property_is_404() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/api/properties/does-not-exist", None));
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["message"], "Property not found");
}

#[test]
fn unknown_route_is_404_json() {
    let (_dir, state) = init_test_state();

    let resp = send(&state, get("/api/nothing-here", None));
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["message"], "Route not found");
}
