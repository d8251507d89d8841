#![forbid(unsafe_code)]

use poem::{http::StatusCode, IntoResponse, Response};
use poem_openapi::payload::Payload;
use poem_openapi::registry::{MetaSchemaRef, Registry};
use poem_openapi::types::{ToJSON, Type};
use serde_json::Value;

// ***************************************************************************
//                                PrettyJson
// ***************************************************************************
/** A JSON response payload rendered with indentation.  It documents itself in
 * the OpenAPI spec exactly like `poem_openapi::payload::Json`; only the wire
 * formatting differs.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyJson<T>(pub T);

impl<T: Type> Payload for PrettyJson<T> {
    const CONTENT_TYPE: &'static str = "application/json; charset=utf-8";

    fn schema_ref() -> MetaSchemaRef {
        T::schema_ref()
    }

    fn register(registry: &mut Registry) {
        T::register(registry);
    }
}

impl<T: ToJSON> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        let value = integral_numbers(self.0.to_json().unwrap_or_default());
        match serde_json::to_string_pretty(&value) {
            Ok(body) => Response::builder()
                .content_type(Self::CONTENT_TYPE)
                .body(body),
            Err(e) => Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// integral_numbers:
// ---------------------------------------------------------------------------
/** Floats with no fractional part are written as integers, so a price sent
 * as 178 comes back as 178 rather than 178.0.
 */
fn integral_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => {
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
                _ => Value::Number(n),
            }
        }
        Value::Array(a) => Value::Array(a.into_iter().map(integral_numbers).collect()),
        Value::Object(o) => Value::Object(o.into_iter().map(|(k, v)| (k, integral_numbers(v))).collect()),
        other => other,
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::album_types::Album;

    #[tokio::test]
    async fn body_is_indented() {
        let resp = PrettyJson(Album::new("1", "Grace", "Michael Smith", 220.0)).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("application/json; charset=utf-8"));

        let body = resp.into_body().into_string().await.unwrap();
        assert!(body.contains("\n  \"title\": \"Grace\""));

        let album: Album = serde_json::from_str(&body).unwrap();
        assert_eq!(album.artist, "Michael Smith");
    }

    #[test]
    fn whole_floats_become_integers() {
        let value = serde_json::json!([{"price": 178.0}, {"price": -3.0}, {"price": 1.5}, 200.0, "200.0"]);
        assert_eq!(integral_numbers(value).to_string(), r#"[{"price":178},{"price":-3},{"price":1.5},200,"200.0"]"#);
    }

    #[tokio::test]
    async fn seed_price_has_no_decimal_point() {
        let resp = PrettyJson(Album::new("4", "Grace", "Michael Smith", 220.0)).into_response();
        let body = resp.into_body().into_string().await.unwrap();
        assert!(body.contains("\"price\": 220\n") || body.contains("\"price\": 220,"));
    }
}
