use anyhow::Context as _;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

const DEFAULT_FILTER: &str = "info";

/// HTML parsing and connection pooling are chatty at debug level; keep them
/// quiet unless `RUST_LOG` names them explicitly.
const NOISY_TARGETS: &[&str] = &["html5ever=warn", "selectors=warn", "hyper_util=warn"];

pub fn init() -> anyhow::Result<()> {
    let (mut filter, explicit) = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => (
            EnvFilter::try_new(&directives).context("parse RUST_LOG")?,
            directives,
        ),
        Err(_) => (
            EnvFilter::try_new(DEFAULT_FILTER).context("build default log filter")?,
            String::new(),
        ),
    };

    for directive in NOISY_TARGETS {
        let target = directive.split('=').next().unwrap_or_default();
        if explicit.contains(target) {
            continue;
        }
        filter = filter.add_directive(
            directive
                .parse::<Directive>()
                .with_context(|| format!("parse log directive {directive}"))?,
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
