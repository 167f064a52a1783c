//! Binary entrypoint for emosearch

fn main() {
    emosearch_cli::init_tracing();

    if let Err(err) = emosearch_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
