use std::path::{Path, PathBuf};

use ilpack_core::{TypeDef, parse_types};
use ilpack_export::{ExportSummary, export_to_path};
use tracing::debug;

pub struct ExportArgs {
    pub metadata_path: PathBuf,
    pub namespace: String,
    pub output: PathBuf,
}

pub fn run(args: ExportArgs) {
    let types = match load_types(&args.metadata_path) {
        Ok(types) => types,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    debug!(path = %args.metadata_path.display(), types = types.len(), "loaded metadata");

    match export_to_path(&types, &args.namespace, &args.output) {
        Ok(summary) => println!("{}", summary_line(&args.output, &summary)),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn load_types(path: &Path) -> Result<Vec<TypeDef>, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_types(&json).map_err(|e| format!("invalid metadata in {}: {}", path.display(), e))
}

pub fn summary_line(output: &Path, summary: &ExportSummary) -> String {
    format!(
        "wrote {}: {} types, {} methods, {} instructions, {} strings, {} blobs",
        output.display(),
        summary.types,
        summary.methods,
        summary.instructions,
        summary.strings,
        summary.blobs
    )
}
