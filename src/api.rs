#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::utils::album_store::AlbumStore;

pub mod albums_create;
pub mod albums_get;
pub mod albums_list;

use albums_create::CreateAlbumApi;
use albums_get::GetAlbumApi;
use albums_list::ListAlbumsApi;

// From cargo.toml.
const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub type AlbumApis = (ListAlbumsApi, GetAlbumApi, CreateAlbumApi);

// ---------------------------------------------------------------------------
// album_service:
// ---------------------------------------------------------------------------
/** All album endpoints share the one store. */
pub fn album_service(store: Arc<AlbumStore>, server_url: &str) -> OpenApiService<AlbumApis, ()> {
    let endpoints = (
        ListAlbumsApi::new(store.clone()),
        GetAlbumApi::new(store.clone()),
        CreateAlbumApi::new(store),
    );
    OpenApiService::new(endpoints, "Album Server", API_VERSION).server(server_url)
}

// ---------------------------------------------------------------------------
// album_routes:
// ---------------------------------------------------------------------------
/** The complete route tree: the album endpoints at the root plus the swagger
 * ui and the generated openapi documents.
 */
pub fn album_routes(store: Arc<AlbumStore>, server_url: &str) -> Route {
    let api_service = album_service(store, server_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service)
}
