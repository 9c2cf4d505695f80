//! C3 Language Server
//!
//! Speaks LSP over stdin/stdout. Logs go to stderr and are controlled
//! with `RUST_LOG` (e.g. `RUST_LOG=c3_index=debug`).

mod config;
mod convert;
mod discovery;
mod server;

use std::sync::Once;

use tower_lsp::{LspService, Server};

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber. Safe to call multiple times.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    });
}

#[tokio::main]
async fn main() {
    init_tracing();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(server::C3LanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
