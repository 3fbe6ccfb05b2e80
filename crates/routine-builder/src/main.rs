//! A terminal front end for browsing the catalog and building routines.
//!
//! Configuration comes from the environment:
//!
//! - `ROUTINE_RELAY_URL`: the relay endpoint.
//! - `ROUTINE_CATALOG`: the catalog file path or URL.
//! - `ROUTINE_DATA_DIR`: where the selection is persisted.
//! - `RUST_LOG`: the log filter.

#[macro_use]
extern crate tracing;

mod app;
mod command;
mod view;

use std::env;

use routine_advisor::{AdvisorBuilder, RelayClient, RelayEndpoint};
use routine_selection::{
    CatalogBrowser, CatalogSource, FileStorage, SelectionStore,
};
use tokio::sync::mpsc;

use crate::app::App;

const DEFAULT_CATALOG: &str = "data/products.json";
const DEFAULT_DATA_DIR: &str = ".routine-builder";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let catalog = env::var("ROUTINE_CATALOG")
        .unwrap_or_else(|_| DEFAULT_CATALOG.to_owned());
    let data_dir = env::var("ROUTINE_DATA_DIR")
        .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_owned());

    let builder = match RelayEndpoint::from_env() {
        Ok(endpoint) => {
            info!("using relay {endpoint:?}");
            AdvisorBuilder::with_transport(RelayClient::new(endpoint))
        }
        Err(err) => {
            warn!("relay is not configured: {err}");
            view::print_error(&err);
            AdvisorBuilder::unconfigured(err)
        }
    };

    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let advisor = builder
        .on_message(move |message| {
            message_tx.send(message.clone()).ok();
        })
        .build();

    let store = SelectionStore::open(FileStorage::new(data_dir));
    let browser = CatalogBrowser::new(CatalogSource::parse(&catalog));

    App::new(store, browser, advisor, message_rx).run().await;
}
