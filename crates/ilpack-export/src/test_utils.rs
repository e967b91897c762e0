//! Sample types shared by the export tests.

use ilpack_core::{Code, Instruction, Label, MemberRef, MethodDef, Operand, TypeDef, TypeRef};

pub fn op(label: u32, code: Code) -> Instruction {
    Instruction::bare(label, code)
}

pub fn op_with(label: u32, code: Code, operand: Operand) -> Instruction {
    Instruction::new(label, code, operand)
}

pub fn program_ref() -> TypeRef {
    TypeRef::new("Demo", "Program")
}

/// `static int Fab(int n) { if (n > 1) return n + Fab(n - 1); return n; }`
pub fn fab() -> MethodDef {
    MethodDef::new("Fab")
        .with_params(1)
        .returning("System.Int32")
        .with_body(vec![
            op(0, Code::Ldarg0),
            op(1, Code::LdcI4_1),
            op_with(2, Code::BleS, Operand::Target(Label(15))),
            op(4, Code::Ldarg0),
            op(5, Code::Ldarg0),
            op(6, Code::LdcI4_1),
            op(7, Code::Sub),
            op_with(
                8,
                Code::Call,
                Operand::Member(MemberRef::new(program_ref(), "Fab")),
            ),
            op(13, Code::Add),
            op(14, Code::Ret),
            op(15, Code::Ldarg0),
            op(16, Code::Ret),
        ])
}

/// `static void Main() { Console.WriteLine("hi"); }`
pub fn hello() -> MethodDef {
    MethodDef::new("Main").with_body(vec![
        op_with(0, Code::Ldstr, Operand::String("hi".into())),
        op_with(
            5,
            Code::Call,
            Operand::Member(MemberRef::new(
                TypeRef::new("System", "Console"),
                "WriteLine",
            )),
        ),
        op(10, Code::Ret),
    ])
}

/// `Demo.Program` with `Fab`, `Main` and a nested `Helper` type.
pub fn program() -> TypeDef {
    let helper = TypeDef::new("", "Helper").with_method(
        MethodDef::new("Get")
            .instance()
            .returning("System.Int32")
            .with_body(vec![op(0, Code::LdcI4_0), op(1, Code::Ret)]),
    );
    TypeDef::new("Demo", "Program")
        .with_method(fab())
        .with_method(hello())
        .with_nested(helper)
}
