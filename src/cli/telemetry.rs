use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initialize logging.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
///
/// # Errors
///
/// Returns an error if a filter directive is invalid or a global subscriber is already set
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let fmt_layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .pretty();

    let filter = env_filter(verbosity_level)?;

    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn env_filter(verbosity_level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("tokio=error".parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_default_level() {
        temp_env::with_var("RUST_LOG", None::<&str>, || {
            let filter = env_filter(Level::INFO);
            assert!(filter.is_ok());
            let rendered = filter.map(|f| f.to_string()).unwrap_or_default();
            assert!(rendered.contains("info"));
            assert!(rendered.contains("hyper=error"));
        });
    }

    #[test]
    fn test_env_filter_rust_log_override() {
        temp_env::with_var("RUST_LOG", Some("tglogin=trace"), || {
            let rendered = env_filter(Level::ERROR)
                .map(|f| f.to_string())
                .unwrap_or_default();
            assert!(rendered.contains("tglogin=trace"));
        });
    }
}
