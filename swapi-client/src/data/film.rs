use serde::{Deserialize, Serialize};

/// A film resource. Members the API leaves out are deserialized as empty
/// values; members of the wrong type are an error.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Film {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub species: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::Film;
    use serde_json::json;

    #[test]
    fn test_core_fields_are_preserved() {
        let film: Film = serde_json::from_value(json!({
            "title": "The Empire Strikes Back",
            "episode_id": 5,
            "director": "Irvin Kershner"
        }))
        .unwrap();

        assert_eq!(film.title, "The Empire Strikes Back");
        assert_eq!(film.episode_id, 5);
        assert_eq!(film.director, "Irvin Kershner");
        assert!(film.characters.is_empty());
        assert_eq!(film.producer, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let film: Film = serde_json::from_value(json!({
            "title": "Return of the Jedi",
            "episode_id": 6,
            "box_office": 475_106_177
        }))
        .unwrap();

        assert_eq!(film.episode_id, 6);
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let film: Film = serde_json::from_value(json!({"Title": "A New Hope", "Episode_Id": 4})).unwrap();

        assert_eq!(film, Film::default());
    }

    #[test]
    fn test_type_mismatch_fails() {
        let result = serde_json::from_value::<Film>(json!({"title": "A New Hope", "episode_id": "four"}));

        assert!(result.is_err());
    }
}
