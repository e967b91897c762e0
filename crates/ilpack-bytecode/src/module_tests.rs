use ilpack_core::Code;

use crate::test_utils::{StreamBuilder, fab_body, key, sample_stream};
use crate::{
    BlobId, ByteOrder, MethodSignature, Module, ModuleError, OperandValue, StringId, Tag,
    split_full_name,
};

fn sid(v: u32) -> StringId {
    StringId::new(v).unwrap()
}

#[test]
fn read_sample_stream() {
    let module = Module::from_bytes(&sample_stream(ByteOrder::Little)).unwrap();

    assert_eq!(module.byte_order(), ByteOrder::Little);
    assert_eq!(module.strings().len(), 5);
    assert_eq!(module.blobs().len(), 1);
    assert_eq!(module.methods().len(), 2);

    let fab = &module.methods()[0];
    assert_eq!(fab.key, key(1, 2, 3));
    assert_eq!(
        fab.signature,
        MethodSignature {
            arg_count: 1,
            returns_value: true
        }
    );
    let codes: Vec<Code> = fab.instructions.iter().map(|i| i.code).collect();
    let expected: Vec<Code> = fab_body().iter().map(|&(c, _)| c).collect();
    assert_eq!(codes, expected);
}

#[test]
fn big_endian_stream_reads_the_same() {
    let little = Module::from_bytes(&sample_stream(ByteOrder::Little)).unwrap();
    let big = Module::from_bytes(&sample_stream(ByteOrder::Big)).unwrap();

    assert_eq!(big.byte_order(), ByteOrder::Big);
    assert_eq!(big.methods(), little.methods());
    assert_eq!(big.strings(), little.strings());
    assert_eq!(
        big.switch_targets(BlobId::new(1).unwrap()),
        Some(vec![1, 3, 5])
    );
}

#[test]
fn operands_decode_by_opcode_kind() {
    let module = Module::from_bytes(&sample_stream(ByteOrder::Little)).unwrap();
    let fab = &module.methods()[0].instructions;
    let pick = &module.methods()[1].instructions;

    assert_eq!(fab[0].operand(), OperandValue::None);
    assert_eq!(fab[2].operand(), OperandValue::Target(10));
    assert_eq!(fab[7].operand(), OperandValue::Member(key(1, 2, 3)));

    assert_eq!(pick[0].operand(), OperandValue::Targets(BlobId::new(1)));
    assert_eq!(pick[1].operand(), OperandValue::String(Some(sid(5))));
    assert_eq!(pick[2].operand(), OperandValue::Float(1.5));
    assert_eq!(pick[3].operand(), OperandValue::Variable(2));
    assert_eq!(pick[4].operand(), OperandValue::Integer(-1));
}

#[test]
fn string_lookups() {
    let module = Module::from_bytes(&sample_stream(ByteOrder::Little)).unwrap();

    assert_eq!(module.string(sid(1)), Some("Demo"));
    assert_eq!(module.string(sid(6)), None);
    assert_eq!(module.find_string("Fab"), Some(sid(3)));
    assert_eq!(module.find_string("Missing"), None);
}

#[test]
fn member_lookups() {
    let module = Module::from_bytes(&sample_stream(ByteOrder::Little)).unwrap();

    assert_eq!(
        module.member_name(key(1, 2, 4)).as_deref(),
        Some("Demo.Program::Pick")
    );
    assert_eq!(module.member_key("Demo", "Program", "Fab"), Some(key(1, 2, 3)));
    assert_eq!(module.member_key("Demo", "Program", "Nope"), None);

    let pick = module.find_method("Demo.Program::Pick").unwrap();
    assert_eq!(pick.instructions.len(), 6);
    assert!(module.find_method("Demo.Program::Main").is_none());
    assert!(module.find_method("no separator").is_none());
}

#[test]
fn split_full_names() {
    assert_eq!(split_full_name("A.B.C::M"), Some(("A.B", "C", "M")));
    assert_eq!(
        split_full_name("N.Outer/Inner::M"),
        Some(("N", "Outer/Inner", "M"))
    );
    assert_eq!(split_full_name("T::.ctor"), Some(("", "T", ".ctor")));
    assert_eq!(split_full_name("N.T"), None);
}

#[test]
fn switch_blob_must_hold_whole_targets() {
    let bytes = StreamBuilder::new(ByteOrder::Little)
        .strings(&[])
        .blobs(&[&[1u8, 0, 0][..]])
        .build();
    let module = Module::from_bytes(&bytes).unwrap();

    assert_eq!(module.switch_targets(BlobId::new(1).unwrap()), None);
    assert_eq!(module.switch_targets(BlobId::new(2).unwrap()), None);
}

#[test]
fn unknown_version_marker() {
    let err = Module::from_bytes(&[2, 0]).unwrap_err();
    assert!(matches!(err, ModuleError::UnknownVersion([2, 0])));
}

#[test]
fn truncated_stream_is_rejected() {
    let mut bytes = sample_stream(ByteOrder::Little);
    bytes.truncate(bytes.len() - 3);

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::UnexpectedEof { needed: 12, .. }));
}

#[test]
fn missing_trailers_are_rejected() {
    let bytes = StreamBuilder::new(ByteOrder::Little)
        .method(key(1, 2, 3), 0, &[(Code::Ret, 0)])
        .build();
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::MissingSection(Tag::String)));

    let bytes = StreamBuilder::new(ByteOrder::Little).strings(&[]).build();
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::MissingSection(Tag::Blob)));
}

#[test]
fn duplicate_trailer_is_rejected() {
    let bytes = StreamBuilder::new(ByteOrder::Little)
        .strings(&["a"])
        .strings(&["b"])
        .build();

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::DuplicateSection(Tag::String)));
}

#[test]
fn unknown_tag_and_opcode() {
    let bytes = StreamBuilder::new(ByteOrder::Little).raw(&[7]).build();
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::UnknownTag { tag: 7, offset: 2 }));

    let bytes = StreamBuilder::new(ByteOrder::Little)
        .raw(&[Tag::Method as u8])
        .u64(0)
        .i32(0)
        .i32(1)
        .raw(&[0xf0])
        .u64(0)
        .build();
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::UnknownOpcode { byte: 0xf0, offset: 19 }));
}

#[test]
fn negative_lengths_are_rejected() {
    let bytes = StreamBuilder::new(ByteOrder::Little)
        .raw(&[Tag::Blob as u8])
        .i32(-1)
        .build();

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.to_string(), "negative blob count -1 at offset 3");
}

#[test]
fn invalid_utf8_is_rejected() {
    let bytes = StreamBuilder::new(ByteOrder::Little)
        .raw(&[Tag::String as u8])
        .i32(1)
        .i32(2)
        .raw(&[0xc3, 0x28])
        .build();

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ModuleError::InvalidUtf8 { index: 1 }));
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    std::fs::write(&path, sample_stream(ByteOrder::Little)).unwrap();

    let module = Module::from_path(&path).unwrap();
    assert_eq!(module.methods().len(), 2);

    let err = Module::from_path(dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, ModuleError::Io(_)));
}
