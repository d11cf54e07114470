/// Initialize env_logger once. Idempotent: subsequent calls are no-ops.
///
/// Only fasubset logs at info unless RUST_LOG says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("fasubset=info"),
    )
    .format_timestamp_millis()
    .try_init();
}
