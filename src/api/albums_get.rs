#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, param::Path, ApiResponse };
use log::debug;

use crate::utils::album_store::AlbumStore;
use crate::utils::album_types::Album;
use crate::utils::album_utils::{self, RequestDebug};
use crate::utils::errors::{Errors, HttpResult};
use crate::utils::pretty_json::PrettyJson;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct GetAlbumApi {
    store: Arc<AlbumStore>,
}

struct ReqGetAlbum
{
    id: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetAlbum {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request parameters:");
        s.push_str("\n    id: ");
        s.push_str(&self.id);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum AlbumResponse {
    #[oai(status = 200)]
    Http200(PrettyJson<Album>),
    #[oai(status = 404)]
    Http404(PrettyJson<HttpResult>),
}

fn make_http_200(album: Album) -> AlbumResponse {
    AlbumResponse::Http200(PrettyJson(album))
}
fn make_http_404(err: Errors) -> AlbumResponse {
    AlbumResponse::Http404(PrettyJson(HttpResult::from(&err)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetAlbumApi {
    /// Get the first album with the given id.
    #[oai(path = "/albums/:id", method = "get")]
    async fn get_album(&self, http_req: &Request, id: Path<String>) -> AlbumResponse {
        let req = ReqGetAlbum {id: id.0};
        album_utils::debug_request(http_req, &req);

        match self.store.find_by_id(&req.id).await {
            Some(album) => make_http_200(album),
            None => {
                debug!("No album with id '{}'.", req.id);
                make_http_404(Errors::AlbumNotFound)
            }
        }
    }
}

impl GetAlbumApi {
    pub fn new(store: Arc<AlbumStore>) -> Self {
        Self {store}
    }
}
