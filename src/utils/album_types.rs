// This file contains the album record and its seed values.
#![forbid(unsafe_code)]

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Album:
// ---------------------------------------------------------------------------
/// A single album record.  None of the fields are validated; duplicate or
/// empty ids and negative prices are stored as given.
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    pub fn new(id: &str, title: &str, artist: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            price,
        }
    }
}

// ---------------------------------------------------------------------------
// seed_albums:
// ---------------------------------------------------------------------------
/** The records every freshly started server holds, in insertion order. */
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new("1", "Onise Iyanu", "Nathaniel Bassey", 200.0),
        Album::new("2", "I Exalt You", "Kim Walker", 230.0),
        Album::new("3", "I Will Sing", "Don Moen", 180.0),
        Album::new("4", "Grace", "Michael Smith", 220.0),
    ]
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_have_distinct_ids() {
        let seeds = seed_albums();
        let ids: Vec<&str> = seeds.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(Album::new("9", "T", "A", 1.5)).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&String> = obj.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["artist", "id", "price", "title"]);
    }

    #[test]
    fn integer_price_parses() {
        let album: Album = serde_json::from_str(
            r#"{"id":"5","title":"Be Magnified","artist":"Don Moen","price":178}"#).unwrap();
        assert_eq!(album, Album::new("5", "Be Magnified", "Don Moen", 178.0));
    }
}
