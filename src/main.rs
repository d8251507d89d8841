#![forbid(unsafe_code)]

use std::sync::Arc;

use log::{error, info};
use poem::listener::TcpListener;

use crate::utils::album_store::AlbumStore;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod api;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "AlbumServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    let ctx = match album_init() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("album_server failed to start: {:#}", e);
            std::process::exit(1);
        }
    };

    // --------------- Main Loop Set Up ---------------
    let addr = ctx.listen_addr();
    let server_url = format!("http://{}", addr);
    let store = Arc::new(AlbumStore::seeded());
    info!("{} albums loaded.", store.len().await);

    let app = api::album_routes(store, &server_url);
    info!("{} listening on {}, api docs at {}/docs", ctx.parms.config.title, server_url, server_url);

    // ------------------ Main Loop -------------------
    let result = poem::Server::new(TcpListener::bind(addr.clone()))
        .name(SERVER_NAME)
        .run(app)
        .await;

    // Binding is the only failure expected here.
    if let Err(e) = result {
        let msg = Errors::ListenerBind(addr, e.to_string());
        error!("{}", msg);
        eprintln!("{}", msg);
        return Err(e);
    }
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// album_init:
// ---------------------------------------------------------------------------
/** Initialize logging and read the runtime parameters. */
fn album_init() -> anyhow::Result<RuntimeCtx> {
    init_log()?;

    let ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", ctx)));

    print_version_info();
    Ok(ctx)
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("\n*** Running ALBUM_SERVER={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}.",
          env!("CARGO_PKG_VERSION"),
          env!("GIT_BRANCH"),
          env!("GIT_COMMIT_SHORT"),
          env!("GIT_DIRTY"),
          env!("SOURCE_TIMESTAMP"),
          env!("RUSTC_VERSION"));
}
