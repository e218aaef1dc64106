use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber once.
/// `RUST_LOG` wins over the configured level.
pub fn init(level: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let res = if cfg!(test) {
            builder.compact().with_test_writer().try_init()
        } else {
            builder.try_init()
        };
        if let Err(e) = res {
            eprintln!("Failed installing tracing subscriber: {}", e);
        }
    });
}
