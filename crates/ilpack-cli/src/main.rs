mod cli;
mod commands;

use cli::{DumpParams, ExportParams, MembersParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    setup_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("export", m)) => {
            let params = ExportParams::from_matches(m);
            commands::export::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("members", m)) => {
            let params = MembersParams::from_matches(m);
            commands::members::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
