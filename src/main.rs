use std::io;

fn main() -> io::Result<()> {
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();

    monkey_interp::repl::start(stdin.lock(), stdout.lock())
}

/// Logging stays silent unless RUST_LOG asks for it.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
