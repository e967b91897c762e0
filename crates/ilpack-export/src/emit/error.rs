//! Export error types.

use std::io;

use ilpack_bytecode::{KeyOverflow, Tag};
use ilpack_core::{Code, Label};

/// Error during export.
///
/// Every variant is fatal: the export stops and nothing is published.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The operand is none of the encodable kinds.
    #[error("{method}: unsupported operand kind `{kind}` on `{code}`")]
    UnsupportedOperandKind {
        method: String,
        code: Code,
        kind: String,
    },
    #[error("{method}: branch target {label} is not an instruction of this method")]
    UnresolvedTarget { method: String, label: Label },
    #[error("{method}: duplicate instruction label {label}")]
    DuplicateLabel { method: String, label: Label },
    #[error(transparent)]
    KeyOverflow(#[from] KeyOverflow),
    #[error("too many strings: {0} (max {max})", max = i32::MAX)]
    TooManyStrings(usize),
    #[error("too many blobs: {0} (max {max})", max = i32::MAX)]
    TooManyBlobs(usize),
    #[error("{method}: too many instructions: {count} (max {max})", max = i32::MAX)]
    TooManyInstructions { method: String, count: usize },
    #[error("{method}: too many arguments: {count} (max {max})", max = ilpack_bytecode::MethodSignature::MAX_ARGS)]
    TooManyArguments { method: String, count: u64 },
    #[error("{tag} entry too large: {len} bytes")]
    EntryTooLarge { tag: Tag, len: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
