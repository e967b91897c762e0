//! Reference words for methods and member operands.
//!
//! A declaring type is named by walking its enclosing types outward and
//! joining their names with `/`; the namespace is the outermost type's.

use ilpack_bytecode::MemberKey;
use ilpack_core::{MemberRef, TypeRef};

use super::{ExportError, StringTable};

/// A declaring type flattened to the two strings that go into a reference word.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QualifiedType {
    pub namespace: String,
    /// Nested-type path, e.g. `Outer/Inner`.
    pub name: String,
}

impl QualifiedType {
    /// `Namespace.Type::member`, as readers print it.
    pub fn member_name(&self, member: &str) -> String {
        format!("{}.{}::{}", self.namespace, self.name, member)
    }
}

pub fn qualify(ty: &TypeRef) -> QualifiedType {
    let chain: Vec<&TypeRef> = ty.enclosing_chain().collect();
    let namespace = chain.last().map_or("", |t| t.namespace.as_str());
    let names: Vec<&str> = chain.iter().rev().map(|t| t.name.as_str()).collect();
    QualifiedType {
        namespace: namespace.to_owned(),
        name: names.join("/"),
    }
}

/// Intern namespace, type name and member name (in that order) and pack them.
pub fn encode(
    strings: &mut StringTable,
    ty: &QualifiedType,
    member: &str,
) -> Result<MemberKey, ExportError> {
    let namespace = strings.get_or_intern(&ty.namespace)?;
    let type_name = strings.get_or_intern(&ty.name)?;
    let name = strings.get_or_intern(member)?;
    Ok(MemberKey::pack(namespace, type_name, name)?)
}

pub fn encode_member(strings: &mut StringTable, member: &MemberRef) -> Result<MemberKey, ExportError> {
    encode(strings, &qualify(&member.declaring), &member.name)
}
