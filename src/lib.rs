pub mod config;
pub mod request;
pub mod response_writer;
pub mod router;
pub mod server;
pub mod status_code_registry;

pub use config::Config;
pub use request::Request;
pub use response_writer::ResponseWriter;
pub use router::{Params, Route, Router};
pub use server::{Handler, Server};
pub use status_code_registry::ReasonPhrase;

#[cfg(test)]
#[ctor::ctor]
fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .init();
}
