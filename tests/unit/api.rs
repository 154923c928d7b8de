// DTO Parsing and Mapping Tests
// "The shape check happens after transport succeeds, never instead of it"

use serde_json::json;

use rolodex::api::dto::{map_contact, map_contact_list, parse_payload, ContactDto, ContactListDto};
use rolodex::ErrorKind;

fn contact_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "phone": "+44 20 7946 0000",
        "gender": "female",
        "email": "ada@example.com",
        "note": null,
        "telegram": "@ada",
        "avatar": null,
        "company": "Analytical Engines Ltd",
        "address": null,
        "createdAt": 1700000000000i64,
        "updatedAt": 1700000500000i64
    })
}

fn list_json() -> serde_json::Value {
    json!({
        "meta": {
            "skipped": 40,
            "limit": 20,
            "total": 101,
            "criteria": {
                "first_name": { "contains": "Ada" }
            }
        },
        "items": [contact_json(1), contact_json(2)]
    })
}

#[test]
fn valid_contact_parses_and_maps() {
    let dto: ContactDto = parse_payload(contact_json(7)).expect("valid shape");
    let contact = map_contact(dto);

    assert_eq!(contact.id, 7);
    assert_eq!(contact.full_name, "Ada Lovelace");
    assert_eq!(contact.email.as_deref(), Some("ada@example.com"));
    assert!(contact.note.is_none());
    assert_eq!(contact.created_at.timestamp_millis(), 1_700_000_000_000);
}

#[test]
fn missing_field_is_invalid_response() {
    let mut body = contact_json(7);
    body.as_object_mut().unwrap().remove("phone");

    let err = parse_payload::<ContactDto>(body).expect_err("shape must fail");

    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert_eq!(err.status, 0);
    assert_eq!(
        err.message,
        "Invalid response from server. Please try again later."
    );
}

#[test]
fn wrong_type_is_invalid_response() {
    let mut body = contact_json(7);
    body["id"] = json!("seven");

    let err = parse_payload::<ContactDto>(body).expect_err("shape must fail");
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
}

#[test]
fn list_envelope_maps_pagination() {
    let dto: ContactListDto = parse_payload(list_json()).expect("valid shape");
    let list = map_contact_list(dto);

    assert_eq!(list.items.len(), 2);
    assert_eq!(list.meta.total_count, 101);
    // skipped 40 at limit 20 is the third page; 101 items make six pages.
    assert_eq!(list.meta.page, 3);
    assert_eq!(list.meta.total_pages, 6);
}

#[test]
fn zero_limit_does_not_divide_by_zero() {
    let mut body = list_json();
    body["meta"]["limit"] = json!(0);
    body["meta"]["skipped"] = json!(0);

    let dto: ContactListDto = parse_payload(body).expect("valid shape");
    let list = map_contact_list(dto);

    assert_eq!(list.meta.page, 1);
    assert_eq!(list.meta.total_pages, 0);
}

#[test]
fn unknown_criteria_key_is_invalid_response() {
    let mut body = list_json();
    body["meta"]["criteria"]["nickname"] = json!({ "contains": "x" });

    let err = parse_payload::<ContactListDto>(body).expect_err("strict criteria");
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
}
