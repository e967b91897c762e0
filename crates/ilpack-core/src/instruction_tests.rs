use crate::{Code, Instruction, Label, MemberRef, Operand, TypeRef};

#[test]
fn label_display() {
    assert_eq!(Label(0).to_string(), "IL_0000");
    assert_eq!(Label(0x1f).to_string(), "IL_001f");
}

#[test]
fn bare_instruction_has_no_operand() {
    let instr = Instruction::bare(4, Code::Ret);

    assert_eq!(instr.label, Label(4));
    assert_eq!(instr.operand, Operand::None);
}

#[test]
fn deserialize_tagged_operands() {
    let instr: Instruction =
        serde_json::from_str(r#"{"label": 2, "opcode": "ble.s", "operand": {"kind": "target", "value": 15}}"#)
            .unwrap();
    assert_eq!(instr.code, Code::BleS);
    assert_eq!(instr.operand, Operand::Target(Label(15)));

    let instr: Instruction = serde_json::from_str(
        r#"{"label": 0, "opcode": "switch", "operand": {"kind": "targets", "value": [4, 8, 12]}}"#,
    )
    .unwrap();
    assert_eq!(
        instr.operand,
        Operand::Targets(vec![Label(4), Label(8), Label(12)])
    );

    let instr: Instruction = serde_json::from_str(r#"{"label": 0, "opcode": "nop"}"#).unwrap();
    assert_eq!(instr.operand, Operand::None);
}

#[test]
fn deserialize_member_operand() {
    let instr: Instruction = serde_json::from_str(
        r#"{
            "label": 8,
            "opcode": "call",
            "operand": {
                "kind": "member",
                "value": {"declaring": {"namespace": "Demo", "name": "Program"}, "name": "Fab"}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(
        instr.operand,
        Operand::Member(MemberRef::new(TypeRef::new("Demo", "Program"), "Fab"))
    );
}

#[test]
fn unknown_operand_kind_is_opaque() {
    let instr: Instruction = serde_json::from_str(
        r#"{"label": 0, "opcode": "calli", "operand": {"kind": "call_site", "value": {"args": 2}}}"#,
    )
    .unwrap();
    assert_eq!(instr.operand, Operand::Opaque("call_site".into()));

    let instr: Instruction = serde_json::from_str(
        r#"{"label": 0, "opcode": "calli", "operand": {"kind": "opaque", "value": "Mono.Cecil.CallSite"}}"#,
    )
    .unwrap();
    assert_eq!(instr.operand, Operand::Opaque("Mono.Cecil.CallSite".into()));
}

#[test]
fn known_operand_kind_with_wrong_value_is_rejected() {
    let result = serde_json::from_str::<Instruction>(
        r#"{"label": 0, "opcode": "ldarg.s", "operand": {"kind": "variable", "value": "x"}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_mnemonic_is_rejected() {
    let err = serde_json::from_str::<Instruction>(r#"{"label": 0, "opcode": "frob"}"#).unwrap_err();
    assert!(err.to_string().contains("unknown opcode mnemonic: frob"));
}

#[test]
fn kind_names() {
    assert_eq!(Operand::None.kind_name(), "none");
    assert_eq!(Operand::F32(1.5).kind_name(), "f32");
    assert_eq!(Operand::Variable(3).kind_name(), "variable");
    assert_eq!(
        Operand::Opaque("Mono.Cecil.CallSite".into()).kind_name(),
        "Mono.Cecil.CallSite"
    );
}
