/// Initializes the tracing/logging infrastructure for the application.
///
/// Output is compact and filtered through the `RUST_LOG` environment variable:
/// - `RUST_LOG=info` - loads, reloads and writes of the resource
/// - `RUST_LOG=warn` - only values that had to be rewritten or were rejected
/// - `RUST_LOG=settings_mapper=debug` - every resolved property and defaulted bean field
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
