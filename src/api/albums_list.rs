#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, ApiResponse };

use crate::utils::album_store::AlbumStore;
use crate::utils::album_types::Album;
use crate::utils::album_utils::{self, RequestDebug};
use crate::utils::pretty_json::PrettyJson;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct ListAlbumsApi {
    store: Arc<AlbumStore>,
}

// The list request carries no parameters.
struct ReqListAlbums;

impl RequestDebug for ReqListAlbums {
    fn get_request_info(&self) -> String {
        "  Request body: none".to_string()
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum AlbumsResponse {
    #[oai(status = 200)]
    Http200(PrettyJson<Vec<Album>>),
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ListAlbumsApi {
    /// List all albums in the order they were added.
    #[oai(path = "/albums", method = "get")]
    async fn list_albums(&self, http_req: &Request) -> AlbumsResponse {
        album_utils::debug_request(http_req, &ReqListAlbums);
        AlbumsResponse::Http200(PrettyJson(self.store.list().await))
    }
}

impl ListAlbumsApi {
    pub fn new(store: Arc<AlbumStore>) -> Self {
        Self {store}
    }
}
