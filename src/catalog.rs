use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Maximum number of films kept from a catalog response.
pub const CATALOG_LIMIT: usize = 12;

pub const DEFAULT_ID: &str = "unknown";
pub const DEFAULT_TITLE: &str = "Título não disponível";
pub const DEFAULT_IMAGE: &str =
    "https://via.placeholder.com/300x150/4a6572/ffffff?text=Studio+Ghibli";
pub const DEFAULT_DIRECTOR: &str = "Diretor não informado";
pub const DEFAULT_RELEASE_DATE: &str = "Ano não informado";
pub const DEFAULT_SCORE: &str = "0";
pub const DEFAULT_DESCRIPTION: &str = "Descrição não disponível para este filme.";

/// A film object exactly as the API sent it.
///
/// Every field is optional. Falsy JSON values (`null`, `false`, `""`, `0`)
/// and non-scalar values decode to `None`, so normalization only has to
/// deal with "present" or "absent".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilm {
    #[serde(default, deserialize_with = "truthy_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub movie_banner: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub rt_score: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub description: Option<String>,
}

fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// A normalized catalog entry. No field is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub image: String,
    pub director: String,
    pub release_date: String,
    pub score: String,
    pub description: String,
}

impl Movie {
    /// Score as shown on cards, e.g. `95/100`.
    pub fn score_label(&self) -> String {
        format!("{}/100", self.score)
    }
}

impl From<RawFilm> for Movie {
    fn from(film: RawFilm) -> Self {
        Self {
            id: film.id.unwrap_or_else(|| DEFAULT_ID.to_string()),
            title: film.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            image: film
                .movie_banner
                .or(film.image)
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            director: film.director.unwrap_or_else(|| DEFAULT_DIRECTOR.to_string()),
            release_date: film
                .release_date
                .unwrap_or_else(|| DEFAULT_RELEASE_DATE.to_string()),
            score: film.rt_score.unwrap_or_else(|| DEFAULT_SCORE.to_string()),
            description: film
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

/// Decode a response body into raw films.
///
/// The body must be a JSON array of JSON objects; anything else is an error.
pub fn decode_films(body: &str) -> Result<Vec<RawFilm>, serde_json::Error> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(body)?;
    objects
        .into_iter()
        .map(|object| serde_json::from_value(Value::Object(object)))
        .collect()
}

/// Normalize films and keep the first [`CATALOG_LIMIT`] in response order.
pub fn normalize_catalog(films: Vec<RawFilm>) -> Vec<Movie> {
    films
        .into_iter()
        .map(Movie::from)
        .take(CATALOG_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const FIELD_NAMES: [&str; 8] = [
        "id",
        "title",
        "movie_banner",
        "image",
        "director",
        "release_date",
        "rt_score",
        "description",
    ];

    fn parse_catalog(body: &str) -> Result<Vec<Movie>, serde_json::Error> {
        decode_films(body).map(normalize_catalog)
    }

    fn movie_from(value: Value) -> Movie {
        Movie::from(serde_json::from_value::<RawFilm>(value).unwrap())
    }

    fn assert_no_empty_field(movie: &Movie) {
        for field in [
            &movie.id,
            &movie.title,
            &movie.image,
            &movie.director,
            &movie.release_date,
            &movie.score,
            &movie.description,
        ] {
            assert!(!field.is_empty(), "empty field in {movie:?}");
        }
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let movie = movie_from(json!({}));
        assert_eq!(movie.id, DEFAULT_ID);
        assert_eq!(movie.title, DEFAULT_TITLE);
        assert_eq!(movie.image, DEFAULT_IMAGE);
        assert_eq!(movie.director, DEFAULT_DIRECTOR);
        assert_eq!(movie.release_date, DEFAULT_RELEASE_DATE);
        assert_eq!(movie.score, DEFAULT_SCORE);
        assert_eq!(movie.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_falsy_values_are_replaced() {
        let movie = movie_from(json!({
            "id": null,
            "title": "",
            "director": false,
            "rt_score": 0,
            "description": "",
            "release_date": [],
        }));
        assert_eq!(movie.id, DEFAULT_ID);
        assert_eq!(movie.title, DEFAULT_TITLE);
        assert_eq!(movie.director, DEFAULT_DIRECTOR);
        assert_eq!(movie.score, DEFAULT_SCORE);
        assert_eq!(movie.description, DEFAULT_DESCRIPTION);
        assert_eq!(movie.release_date, DEFAULT_RELEASE_DATE);
    }

    #[test]
    fn test_banner_takes_precedence_over_image() {
        let movie = movie_from(json!({
            "movie_banner": "https://img/banner.jpg",
            "image": "https://img/poster.jpg",
        }));
        assert_eq!(movie.image, "https://img/banner.jpg");

        let movie = movie_from(json!({ "movie_banner": "", "image": "https://img/poster.jpg" }));
        assert_eq!(movie.image, "https://img/poster.jpg");
    }

    #[test]
    fn test_numeric_score_is_kept_as_text() {
        let movie = movie_from(json!({ "rt_score": 95 }));
        assert_eq!(movie.score, "95");
        assert_eq!(movie.score_label(), "95/100");
    }

    #[test]
    fn test_laputa_example() {
        let body = r#"[{"id":"1","title":"Laputa","director":"Miyazaki","release_date":"1986","rt_score":"95","description":"A boy and girl..."}]"#;
        let movies = parse_catalog(body).unwrap();
        assert_eq!(movies.len(), 1);
        let movie = &movies[0];
        assert_eq!(movie.id, "1");
        assert_eq!(movie.title, "Laputa");
        assert_eq!(movie.director, "Miyazaki");
        assert_eq!(movie.release_date, "1986");
        assert_eq!(movie.score_label(), "95/100");
        assert_eq!(movie.description, "A boy and girl...");
        assert_eq!(movie.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_catalog_is_truncated_in_response_order() {
        let films: Vec<Value> = (0..15)
            .map(|i| json!({ "id": i.to_string(), "title": format!("Film {i}") }))
            .collect();
        let body = serde_json::to_string(&films).unwrap();

        let movies = parse_catalog(&body).unwrap();
        assert_eq!(movies.len(), CATALOG_LIMIT);
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"]
        );
    }

    #[test]
    fn test_short_catalog_is_kept_whole() {
        let body = r#"[{"id":"a"},{"id":"b"},{"id":"c"}]"#;
        let movies = parse_catalog(body).unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[2].id, "c");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let movie = movie_from(json!({ "id": "x", "original_title": "天空の城ラピュタ", "running_time": "124" }));
        assert_eq!(movie.id, "x");
    }

    #[test]
    fn test_rejects_non_array_body() {
        assert!(parse_catalog(r#"{"id":"1"}"#).is_err());
        assert!(parse_catalog("not json").is_err());
        assert!(parse_catalog("").is_err());
    }

    #[test]
    fn test_rejects_non_object_elements() {
        assert!(parse_catalog(r#"[{"id":"1"}, 42]"#).is_err());
        assert!(parse_catalog(r#"[null]"#).is_err());
        assert!(parse_catalog(r#"[["1","Laputa"]]"#).is_err());
    }

    #[test]
    fn test_empty_array_is_an_empty_catalog() {
        assert!(parse_catalog("[]").unwrap().is_empty());
    }

    fn field_value() -> impl Strategy<Value = Option<Value>> {
        prop_oneof![
            Just(None),
            Just(Some(Value::Null)),
            Just(Some(Value::String(String::new()))),
            Just(Some(json!(0))),
            Just(Some(Value::Bool(false))),
            Just(Some(json!({ "nested": true }))),
            "[a-zA-Z0-9 ]{1,20}".prop_map(|s| Some(Value::String(s))),
            (1u32..1000).prop_map(|n| Some(json!(n))),
        ]
    }

    proptest! {
        #[test]
        fn normalized_fields_are_never_empty(
            values in proptest::collection::vec(field_value(), FIELD_NAMES.len())
        ) {
            let mut object = Map::new();
            for (name, value) in FIELD_NAMES.iter().zip(values) {
                if let Some(value) = value {
                    object.insert(name.to_string(), value);
                }
            }
            let movie = movie_from(Value::Object(object));
            assert_no_empty_field(&movie);
        }
    }
}
