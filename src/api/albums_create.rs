#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, ApiResponse };
use log::{error, info};

use crate::utils::album_store::AlbumStore;
use crate::utils::album_types::Album;
use crate::utils::album_utils::{self, RequestDebug};
use crate::utils::errors::{Errors, HttpResult};
use crate::utils::pretty_json::PrettyJson;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct CreateAlbumApi {
    store: Arc<AlbumStore>,
}

// Implement the debug record trait for logging.
impl RequestDebug for Album {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    id: ");
        s.push_str(&self.id);
        s.push_str("\n    title: ");
        s.push_str(&self.title);
        s.push_str("\n    artist: ");
        s.push_str(&self.artist);
        s.push_str("\n    price: ");
        s.push_str(&self.price.to_string());
        s
    }
}

// ------------------- HTTP Status Codes -------------------
// Bodies that can't be read as an album never reach the endpoint; the
// bad request handler turns the parse error into a 400.
#[derive(Debug, ApiResponse)]
#[oai(bad_request_handler = "bad_request_handler")]
enum CreateResponse {
    #[oai(status = 201)]
    Http201(PrettyJson<Album>),
    #[oai(status = 400)]
    Http400(PrettyJson<HttpResult>),
}

fn make_http_201(album: Album) -> CreateResponse {
    CreateResponse::Http201(PrettyJson(album))
}
fn make_http_400(err: Errors) -> CreateResponse {
    CreateResponse::Http400(PrettyJson(HttpResult::from(&err)))
}

fn bad_request_handler(err: poem::Error) -> CreateResponse {
    let err = Errors::MalformedInput(err.to_string());
    error!("{}", err);
    make_http_400(err)
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl CreateAlbumApi {
    /// Add an album to the end of the collection.  Ids are not checked for
    /// uniqueness.
    #[oai(path = "/albums", method = "post")]
    async fn create_album(&self, http_req: &Request, album: Json<Album>) -> CreateResponse {
        let album = album.0;
        album_utils::debug_request(http_req, &album);

        let count = self.store.append(album.clone()).await;
        info!("Album '{}' ('{}' by '{}') created, {} albums stored.",
              album.id, album.title, album.artist, count);

        make_http_201(album)
    }
}

impl CreateAlbumApi {
    pub fn new(store: Arc<AlbumStore>) -> Self {
        Self {store}
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;

    use crate::api::album_routes;
    use crate::api::tests::{body_album, body_albums, seeded_store};
    use crate::utils::album_types::Album;

    const BE_MAGNIFIED: &str = r#"{"id":"5","title":"Be Magnified","artist":"Don Moen","price":178}"#;

    #[tokio::test]
    async fn create_echoes_and_stores() {
        let cli = TestClient::new(album_routes(seeded_store(), "http://localhost"));
        let expected = Album::new("5", "Be Magnified", "Don Moen", 178.0);

        let resp = cli.post("/albums")
            .content_type("application/json")
            .body(BE_MAGNIFIED)
            .send().await;
        resp.assert_status(StatusCode::CREATED);
        assert_eq!(body_album(resp).await, expected);

        let resp = cli.get("/albums/5").send().await;
        resp.assert_status_is_ok();
        assert_eq!(body_album(resp).await, expected);
    }

    #[tokio::test]
    async fn create_echoes_exact_json() {
        let cli = TestClient::new(album_routes(seeded_store(), "http://localhost"));
        let sent: serde_json::Value = serde_json::from_str(BE_MAGNIFIED).unwrap();

        let resp = cli.post("/albums")
            .content_type("application/json")
            .body(BE_MAGNIFIED)
            .send().await;
        resp.assert_status(StatusCode::CREATED);
        let body = resp.0.into_body().into_string().await.unwrap();
        let echoed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(echoed, sent);

        let body = cli.get("/albums/5").send().await.0.into_body().into_string().await.unwrap();
        let fetched: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(fetched, sent);
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let store = seeded_store();
        let cli = TestClient::new(album_routes(store.clone(), "http://localhost"));

        cli.post("/albums")
            .body(BE_MAGNIFIED)
            .send().await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn create_appends_last() {
        let cli = TestClient::new(album_routes(seeded_store(), "http://localhost"));
        let before = body_albums(cli.get("/albums").send().await).await;

        cli.post("/albums")
            .content_type("application/json")
            .body(BE_MAGNIFIED)
            .send().await
            .assert_status(StatusCode::CREATED);

        let after = body_albums(cli.get("/albums").send().await).await;
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().map(|a| a.id.as_str()), Some("5"));
    }

    #[tokio::test]
    async fn duplicate_and_empty_values_are_accepted() {
        let store = seeded_store();
        let cli = TestClient::new(album_routes(store.clone(), "http://localhost"));

        cli.post("/albums")
            .content_type("application/json")
            .body(r#"{"id":"1","title":"","artist":"","price":-5}"#)
            .send().await
            .assert_status(StatusCode::CREATED);
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn truncated_json_is_400() {
        let store = seeded_store();
        let cli = TestClient::new(album_routes(store.clone(), "http://localhost"));

        let resp = cli.post("/albums")
            .content_type("application/json")
            .body(r#"{"id":"5","title":"Be Mag"#)
            .send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);

        let body = resp.0.into_body().into_string().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid album request:"));
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn wrong_field_type_is_400() {
        let store = seeded_store();
        let cli = TestClient::new(album_routes(store.clone(), "http://localhost"));

        cli.post("/albums")
            .content_type("application/json")
            .body(r#"{"id":"5","title":"Be Magnified","artist":"Don Moen","price":"cheap"}"#)
            .send().await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn missing_field_is_400() {
        let store = seeded_store();
        let cli = TestClient::new(album_routes(store.clone(), "http://localhost"));

        cli.post("/albums")
            .content_type("application/json")
            .body(r#"{"id":"5","title":"Be Magnified","artist":"Don Moen"}"#)
            .send().await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn server_survives_bad_request() {
        let cli = TestClient::new(album_routes(seeded_store(), "http://localhost"));

        cli.post("/albums")
            .content_type("application/json")
            .body("{")
            .send().await
            .assert_status(StatusCode::BAD_REQUEST);

        cli.get("/albums").send().await.assert_status_is_ok();
    }
}
