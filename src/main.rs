use clap::Parser;
use tracing::info;

use route_table::{Config, ReasonPhrase, Request, ResponseWriter, Route, Router, Server};

fn home(w: &mut ResponseWriter, _: &mut Request) {
    w.set_reason_phrase(ReasonPhrase::OK);
}

fn echo(w: &mut ResponseWriter, r: &mut Request) {
    let message = r.get_param("message").unwrap_or_default().to_owned();
    w.set_reason_phrase(ReasonPhrase::OK);
    w.set_body_str(&message);
}

fn user_order(w: &mut ResponseWriter, r: &mut Request) {
    let body = format!(
        "user {} order {}",
        r.get_param("id").unwrap_or_default(),
        r.get_param("orderId").unwrap_or_default()
    );
    w.set_reason_phrase(ReasonPhrase::OK);
    w.set_body_str(&body);
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let router = Router::new([
        Route::get("/", home),
        Route::get("/echo/:message", echo).with_summary("echo the path segment back"),
        Route::get("/users/:id/orders/:orderId", user_order),
    ]);
    for route in router.routes() {
        info!(
            method = route.method(),
            path = route.path(),
            summary = route.summary(),
            "route"
        );
    }

    let server = Server::new(&config.addr)?.with_read_timeout(config.read_timeout());
    info!("listening on {}", server.local_addr()?);
    server.run(router);
    Ok(())
}
