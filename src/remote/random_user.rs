//! Shaping of random-user API records into flat user rows.
//!
//! The API nests everything (`name.first`, `location.street.number`,
//! `registered.date`); the users page wants one flat row per person. Records
//! that are already flat (no `name` object) pass through untouched.

use jiff::Timestamp;
use serde_json::{Map, Value, json};

/// Flatten a raw random-user record. Returns the record unchanged when it is
/// not in the nested API shape.
pub fn shape_user(raw: Map<String, Value>) -> Map<String, Value> {
    let Some(name) = raw.get("name").and_then(Value::as_object) else {
        return raw;
    };

    let text = |value: Option<&Value>| -> String {
        match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    };

    let full_name = [text(name.get("first")), text(name.get("last"))]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let location = raw.get("location").and_then(Value::as_object);
    let loc = |key: &str| text(location.and_then(|l| l.get(key)));
    let street = location
        .and_then(|l| l.get("street"))
        .and_then(Value::as_object);
    let street_line = [
        text(street.and_then(|s| s.get("number"))),
        text(street.and_then(|s| s.get("name"))),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    let address = [street_line, loc("city"), loc("state"), loc("country")]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let registered_at = raw
        .get("registered")
        .and_then(|r| r.get("date"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Timestamp>().ok());

    let mut shaped = Map::new();
    if let Some(id) = raw.get("id").filter(|v| v.is_string() || v.is_number()) {
        shaped.insert("id".to_string(), id.clone());
    }
    shaped.insert(
        "gender".to_string(),
        json!(capitalize(&text(raw.get("gender")))),
    );
    shaped.insert("name".to_string(), json!(full_name));
    shaped.insert("email".to_string(), json!(text(raw.get("email"))));
    shaped.insert("address".to_string(), json!(address));
    shaped.insert("city".to_string(), json!(loc("city")));
    shaped.insert("country".to_string(), json!(loc("country")));
    shaped.insert("phone".to_string(), json!(text(raw.get("phone"))));
    shaped.insert(
        "registeredDate".to_string(),
        json!(registered_at.map(format_registered).unwrap_or_default()),
    );
    shaped.insert(
        "registeredAt".to_string(),
        registered_at
            .map(|ts| json!(ts.to_string()))
            .unwrap_or(Value::Null),
    );
    shaped.insert(
        "picture".to_string(),
        json!(text(raw.get("picture").and_then(|p| p.get("thumbnail")))),
    );
    shaped
}

/// Upper-case the first character, lower-case the rest ("female" -> "Female")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn format_registered(ts: Timestamp) -> String {
    ts.strftime("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_user() -> Map<String, Value> {
        json!({
            "gender": "female",
            "name": {"title": "Ms", "first": "Esther", "last": "Kiehn"},
            "location": {
                "street": {"number": 4521, "name": "Oak Lawn Ave"},
                "city": "Dallas",
                "state": "Texas",
                "country": "United States",
                "postcode": 75201
            },
            "email": "esther.kiehn@example.com",
            "registered": {"date": "2015-06-05T09:38:35.599Z", "age": 9},
            "phone": "(272) 790-0888",
            "cell": "(489) 330-2385",
            "id": {"name": "SSN", "value": null},
            "picture": {"thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"},
            "nat": "US"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_shape_user_flattens_nested_record() {
        let shaped = shape_user(raw_user());
        assert_eq!(shaped["name"], "Esther Kiehn");
        assert_eq!(shaped["gender"], "Female");
        assert_eq!(
            shaped["address"],
            "4521 Oak Lawn Ave, Dallas, Texas, United States"
        );
        assert_eq!(shaped["city"], "Dallas");
        assert_eq!(shaped["country"], "United States");
        assert_eq!(shaped["registeredDate"], "Jun 05, 2015");
        assert_eq!(shaped["registeredAt"], "2015-06-05T09:38:35.599Z");
        assert_eq!(
            shaped["picture"],
            "https://randomuser.me/api/portraits/thumb/women/1.jpg"
        );
    }

    #[test]
    fn test_shape_user_drops_object_id() {
        let shaped = shape_user(raw_user());
        assert!(!shaped.contains_key("id"));
    }

    #[test]
    fn test_shape_user_passes_flat_records_through() {
        let flat = json!({"id": "#USR1000", "name": "Clint Hoppe", "gender": "Male"})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(shape_user(flat.clone()), flat);
    }

    #[test]
    fn test_shape_user_tolerates_missing_parts() {
        let sparse = json!({"name": {"first": "Darin"}})
            .as_object()
            .cloned()
            .unwrap();
        let shaped = shape_user(sparse);
        assert_eq!(shaped["name"], "Darin");
        assert_eq!(shaped["address"], "");
        assert_eq!(shaped["registeredDate"], "");
        assert!(shaped["registeredAt"].is_null());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("male"), "Male");
        assert_eq!(capitalize("FEMALE"), "Female");
        assert_eq!(capitalize(""), "");
    }
}
