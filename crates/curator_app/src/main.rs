mod app;
mod effects;
mod logging;
mod persistence;

use anyhow::{bail, Context};
use curator_engine::{EngineHandle, FetchSettings};
use url::Url;

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    logging::initialize(args.log_settings);

    let base_url = Url::parse(&args.base_url)
        .with_context(|| format!("invalid backend url: {}", args.base_url))?;
    let engine = EngineHandle::new(FetchSettings::new(base_url))
        .map_err(|err| anyhow::anyhow!("failed to start engine: {err}"))?;

    let state_dir = std::env::current_dir().context("current directory unavailable")?;
    app::App::new(engine, args.group_id, state_dir).run()
}

struct Args {
    base_url: String,
    group_id: Option<u64>,
    log_settings: logging::LogSettings,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut base_url = None;
    let mut group_id = None;
    let mut destination = logging::LogDestination::File;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--group" => {
                let value = args.next().context("--group requires a group id")?;
                group_id = Some(value.parse().context("--group id must be an integer")?);
            }
            "--log" => {
                let value = args.next().context("--log requires a destination")?;
                destination = match value.as_str() {
                    "file" => logging::LogDestination::File,
                    "terminal" => logging::LogDestination::Terminal,
                    "both" => logging::LogDestination::Both,
                    other => bail!("unknown log destination: {other}"),
                };
            }
            "--verbose" | "-v" => verbose = true,
            _ if base_url.is_none() => base_url = Some(arg),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let Some(base_url) = base_url else {
        bail!(
            "usage: curator_app <backend-url> [--group <id>] \
             [--log file|terminal|both] [--verbose]"
        );
    };
    Ok(Args {
        base_url,
        group_id,
        log_settings: logging::LogSettings {
            destination,
            verbose,
        },
    })
}
