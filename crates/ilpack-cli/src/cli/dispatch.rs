//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::dump::DumpArgs;
use crate::commands::export::ExportArgs;
use crate::commands::members::MembersArgs;

pub struct ExportParams {
    pub metadata_path: PathBuf,
    pub namespace: String,
    pub output: PathBuf,
}

impl ExportParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            metadata_path: required(m, "metadata_path"),
            namespace: required(m, "namespace"),
            output: required(m, "output"),
        }
    }
}

impl From<ExportParams> for ExportArgs {
    fn from(p: ExportParams) -> Self {
        Self {
            metadata_path: p.metadata_path,
            namespace: p.namespace,
            output: p.output,
        }
    }
}

pub struct DumpParams {
    pub module_path: PathBuf,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: required(m, "module_path"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            module_path: p.module_path,
        }
    }
}

pub struct MembersParams {
    pub module_path: PathBuf,
}

impl MembersParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: required(m, "module_path"),
        }
    }
}

impl From<MembersParams> for MembersArgs {
    fn from(p: MembersParams) -> Self {
        Self {
            module_path: p.module_path,
        }
    }
}

/// Fetch an arg that clap guarantees (required or defaulted).
fn required<T: Clone + Send + Sync + 'static>(m: &ArgMatches, id: &str) -> T {
    m.get_one::<T>(id)
        .cloned()
        .unwrap_or_else(|| unreachable!("clap enforces `{id}`"))
}
