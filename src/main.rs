// Console advising tool: load the ABCU course file, then list courses or look one up along
// with its prerequisites.
use std::io;
use std::process;

use course_advisor::config::Config;
use course_advisor::textinterface::TextInterface;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::init();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut interface = TextInterface::init(config);

    if let Err(e) = interface.run() {
        error!(error = %e, "session aborted");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
