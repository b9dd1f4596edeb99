//! Mock data builders for movie and user payloads.
//!
//! Builders produce records in the shape the upstream APIs send, so tests go
//! through the normalizer the same way live data does.

use serde_json::{Map, Value, json};

/// Builder for a movie catalog record
pub struct MovieBuilder {
    fields: Map<String, Value>,
}

impl MovieBuilder {
    pub fn new(id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("_id".to_string(), json!(id));
        fields.insert("title".to_string(), json!(format!("Movie {id}")));
        Self { fields }
    }

    /// A record without `_id`, as some catalog mirrors return
    pub fn without_id() -> Self {
        let mut builder = Self::new("");
        builder.fields.remove("_id");
        builder.fields.insert("title".to_string(), json!("Untitled"));
        builder
    }

    pub fn title(mut self, title: &str) -> Self {
        self.fields.insert("title".to_string(), json!(title));
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.fields.insert("year".to_string(), json!(year));
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.fields
            .insert("imdb".to_string(), json!({"rating": rating, "votes": 1000}));
        self
    }

    pub fn genres(mut self, genres: &[&str]) -> Self {
        self.fields.insert("genres".to_string(), json!(genres));
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builder for a raw random-user record
pub struct UserBuilder {
    first: String,
    last: String,
    gender: String,
    registered: String,
    country: String,
}

impl UserBuilder {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.to_string(),
            last: last.to_string(),
            gender: "female".to_string(),
            registered: "2015-06-05T12:30:00.000Z".to_string(),
            country: "Norway".to_string(),
        }
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.gender = gender.to_string();
        self
    }

    pub fn registered(mut self, date: &str) -> Self {
        self.registered = date.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn build(self) -> Value {
        let email = format!(
            "{}.{}@example.com",
            self.first.to_lowercase(),
            self.last.to_lowercase()
        );
        json!({
            "gender": self.gender,
            "name": {"title": "Ms", "first": self.first, "last": self.last},
            "location": {
                "street": {"number": 4021, "name": "Storgata"},
                "city": "Oslo",
                "state": "Oslo",
                "country": self.country,
                "postcode": "0150"
            },
            "email": email,
            "registered": {"date": self.registered, "age": 9},
            "phone": "21 34 56 78",
            "id": {"name": "FN", "value": null},
            "picture": {"thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"}
        })
    }
}

/// `n` movies with ids `m0..m{n-1}`
pub fn movies(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            MovieBuilder::new(&format!("m{i}"))
                .year(1990 + i as i64)
                .build()
        })
        .collect()
}

/// Movies with the given ratings, ids `r0..`
pub fn rated_movies(ratings: &[f64]) -> Vec<Value> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, r)| MovieBuilder::new(&format!("r{i}")).rating(*r).build())
        .collect()
}

/// Random-user API response envelope
pub fn users_payload(users: Vec<Value>) -> Value {
    json!({
        "results": users,
        "info": {"seed": "abc", "results": 0, "page": 1, "version": "1.4"}
    })
}
