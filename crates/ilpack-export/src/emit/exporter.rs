//! Top-level export entry points.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, trace};

use ilpack_core::TypeDef;

use super::{ExportError, ExportSummary, Session, collect_type};

/// Export every top-level type whose namespace equals `namespace` exactly.
///
/// Returns the sink once the trailer tables are written and flushed.
pub fn export<W: Write>(
    types: &[TypeDef],
    namespace: &str,
    sink: W,
) -> Result<(W, ExportSummary), ExportError> {
    let mut session = Session::start(sink)?;

    for ty in types {
        if ty.namespace != namespace {
            trace!(namespace = %ty.namespace, name = %ty.name, "skipping type");
            continue;
        }
        collect_type(&mut session, ty)?;
    }

    let (sink, summary) = session.finish()?;
    info!(
        types = summary.types,
        methods = summary.methods,
        instructions = summary.instructions,
        strings = summary.strings,
        blobs = summary.blobs,
        "export finished"
    );
    Ok((sink, summary))
}

/// Export to a file, replacing `path` only if the whole export succeeds.
///
/// The stream is written to a temporary file next to `path` and renamed
/// over it at the end. On failure the temporary file is removed and `path`
/// keeps its previous contents.
pub fn export_to_path(
    types: &[TypeDef],
    namespace: &str,
    path: impl AsRef<Path>,
) -> Result<ExportSummary, ExportError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    let (writer, summary) = export(types, namespace, BufWriter::new(tmp))?;
    let tmp = writer.into_inner().map_err(|e| e.into_error())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), "wrote export");
    Ok(summary)
}
