//! Walks types and writes one method record per method.

use std::io::Write;

use tracing::debug;

use ilpack_bytecode::{INSTRUCTION_SIZE, MethodSignature, Tag};
use ilpack_core::{MethodDef, TypeDef, TypeRef};

use super::instruction::{InstructionEncoder, PositionMap};
use super::reference::{self, QualifiedType};
use super::wire::{len_i32, put_i32, put_u8, put_u64};
use super::{ExportError, Session};

/// Tag, reference word, signature and instruction count.
const RECORD_HEADER_SIZE: usize = 1 + 8 + 4 + 4;

/// Write the methods of `ty`, then recurse into its nested types.
///
/// Nested types are always visited; namespace filtering happens only at
/// the top level.
pub fn collect_type<W: Write>(session: &mut Session<W>, ty: &TypeDef) -> Result<(), ExportError> {
    collect(session, ty, TypeRef::new(ty.namespace.as_str(), ty.name.as_str()))
}

fn collect<W: Write>(
    session: &mut Session<W>,
    ty: &TypeDef,
    this: TypeRef,
) -> Result<(), ExportError> {
    let declaring = reference::qualify(&this);
    debug!(
        namespace = %declaring.namespace,
        name = %declaring.name,
        methods = ty.methods.len(),
        nested = ty.nested.len(),
        "type"
    );
    session.count_type();

    for method in &ty.methods {
        encode_method(session, &declaring, method)?;
    }

    for nested in &ty.nested {
        let nested_ref = TypeRef {
            namespace: nested.namespace.clone(),
            name: nested.name.clone(),
            declaring: Some(Box::new(this.clone())),
        };
        collect(session, nested, nested_ref)?;
    }
    Ok(())
}

/// Write one method record: tag, reference word, signature, instructions.
///
/// The record is assembled in memory and written in one piece, so a failing
/// instruction never leaves a partial record in the sink.
pub fn encode_method<W: Write>(
    session: &mut Session<W>,
    declaring: &QualifiedType,
    method: &MethodDef,
) -> Result<(), ExportError> {
    let full_name = declaring.member_name(&method.name);

    let arg_count = method.arg_count();
    let signature = match u32::try_from(arg_count) {
        Ok(n) if n <= MethodSignature::MAX_ARGS => MethodSignature {
            arg_count: n,
            returns_value: method.returns_value(),
        },
        _ => {
            return Err(ExportError::TooManyArguments {
                method: full_name,
                count: arg_count,
            });
        }
    };

    let positions = PositionMap::build(&full_name, &method.instructions)?;
    let count = len_i32(method.instructions.len()).ok_or_else(|| ExportError::TooManyInstructions {
        method: full_name.clone(),
        count: method.instructions.len(),
    })?;

    let (strings, blobs) = session.tables_mut();
    let key = reference::encode(strings, declaring, &method.name)?;

    let mut record =
        Vec::with_capacity(RECORD_HEADER_SIZE + method.instructions.len() * INSTRUCTION_SIZE);
    put_u8(&mut record, Tag::Method as u8);
    put_u64(&mut record, key.0);
    put_i32(&mut record, signature.pack());
    put_i32(&mut record, count);

    let mut encoder = InstructionEncoder::new(&full_name, &positions, strings, blobs);
    for instr in &method.instructions {
        encoder.encode(instr, &mut record)?;
    }

    debug!(method = %full_name, instructions = method.instructions.len(), "method");
    session.write_record(&record)?;
    session.count_method(method.instructions.len());
    Ok(())
}
