//! Types, methods and member references as reported by the disassembler.

use serde::Deserialize;

use crate::Instruction;

/// Full name of the return type that makes a method "void".
pub const VOID_TYPE: &str = "System.Void";

/// A type definition with its methods and nested types, in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub nested: Vec<TypeDef>,
}

impl TypeDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, nested: TypeDef) -> Self {
        self.nested.push(nested);
        self
    }
}

/// Reference to a type, carrying its chain of enclosing types.
///
/// Nested types usually report an empty namespace; the namespace that counts
/// is the one of the outermost enclosing type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub declaring: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            declaring: None,
        }
    }

    /// A type nested inside `declaring`.
    pub fn nested_in(declaring: TypeRef, name: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            name: name.into(),
            declaring: Some(Box::new(declaring)),
        }
    }

    /// Iterate from this type outward through its enclosing types.
    pub fn enclosing_chain(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::successors(Some(self), |t| t.declaring.as_deref())
    }
}

/// Field, method or type used as an instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRef {
    pub declaring: TypeRef,
    pub name: String,
}

impl MemberRef {
    pub fn new(declaring: TypeRef, name: impl Into<String>) -> Self {
        Self {
            declaring,
            name: name.into(),
        }
    }

    /// Reference for a type operand (`box`, `newarr`, `ldtoken` ...).
    ///
    /// A nested type is addressed as a member of its enclosing type. A
    /// top-level type has no enclosing type, so it is addressed as itself
    /// with an empty member name.
    pub fn of_type(ty: TypeRef) -> Self {
        match ty.declaring {
            Some(declaring) => Self::new(*declaring, ty.name),
            None => Self::new(ty, ""),
        }
    }
}

/// A method and its decoded body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub generic_params: u32,
    #[serde(default)]
    pub params: u32,
    /// Takes an implicit receiver (`this`).
    #[serde(default)]
    pub has_this: bool,
    /// Full name of the return type.
    #[serde(default = "void_type")]
    pub return_type: String,
    /// Empty for methods without a body (abstract, extern).
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

fn void_type() -> String {
    VOID_TYPE.to_string()
}

impl MethodDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_params: 0,
            params: 0,
            has_this: false,
            return_type: void_type(),
            instructions: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: u32) -> Self {
        self.params = params;
        self
    }

    pub fn with_generic_params(mut self, generic_params: u32) -> Self {
        self.generic_params = generic_params;
        self
    }

    pub fn instance(mut self) -> Self {
        self.has_this = true;
        self
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_body(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = instructions;
        self
    }

    /// Generic parameters, declared parameters and the receiver, if any.
    pub fn arg_count(&self) -> u64 {
        u64::from(self.generic_params) + u64::from(self.params) + u64::from(self.has_this)
    }

    pub fn returns_value(&self) -> bool {
        self.return_type != VOID_TYPE
    }
}
