/// Log to stdout filtered by `RUST_LOG`, and record spans for flamegraphs in `./earley.folded`.
/// Keep the returned guard alive until the benchmarks finish, or the folded file is truncated.
#[cfg(feature = "tracing")]
#[must_use]
pub fn init_tracing() -> impl Drop {
    use tracing_flame::FlameLayer;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let (flame_layer, flush_guard) = FlameLayer::with_file("./earley.folded").unwrap();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::Layer::default())
        .with(flame_layer)
        .init();

    flush_guard
}

#[cfg(not(feature = "tracing"))]
#[allow(clippy::missing_const_for_fn)]
pub fn init_tracing() {}
