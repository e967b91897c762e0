use ilpack_bytecode::StringId;

use super::StringTable;

#[test]
fn ids_are_dense_and_one_based() {
    let mut table = StringTable::new();

    let a = table.get_or_intern("Demo").unwrap();
    let b = table.get_or_intern("Program").unwrap();
    let c = table.get_or_intern("Fab").unwrap();

    assert_eq!([a.get(), b.get(), c.get()], [1, 2, 3]);
    assert_eq!(table.len(), 3);
}

#[test]
fn interning_is_idempotent() {
    let mut table = StringTable::new();

    let a = table.get_or_intern("x").unwrap();
    let b = table.get_or_intern("y").unwrap();
    let again = table.get_or_intern("x").unwrap();

    assert_eq!(a, again);
    assert_ne!(a, b);
    assert_eq!(table.len(), 2);
}

#[test]
fn lookup_does_not_insert() {
    let mut table = StringTable::new();
    table.get_or_intern("present").unwrap();

    assert_eq!(table.get("present"), StringId::new(1));
    assert_eq!(table.get("absent"), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn equality_is_exact() {
    let mut table = StringTable::new();

    let lower = table.get_or_intern("name").unwrap();
    let upper = table.get_or_intern("Name").unwrap();
    let empty = table.get_or_intern("").unwrap();

    assert_ne!(lower, upper);
    assert_eq!(empty.get(), 3);
}

#[test]
fn resolve_and_iterate_in_order() {
    let mut table = StringTable::new();
    let b = table.get_or_intern("b").unwrap();
    table.get_or_intern("a").unwrap();

    assert_eq!(table.resolve(b), Some("b"));
    assert_eq!(table.resolve(StringId::new(3).unwrap()), None);
    assert_eq!(table.iter().collect::<Vec<_>>(), ["b", "a"]);
}

#[test]
fn emit_string_section() {
    let mut table = StringTable::new();
    table.get_or_intern("ab").unwrap();
    table.get_or_intern("é").unwrap();

    let mut out = Vec::new();
    table.emit(&mut out).unwrap();

    assert_eq!(
        out,
        [
            1, 2, 0, 0, 0, // tag, count
            2, 0, 0, 0, b'a', b'b', //
            2, 0, 0, 0, 0xc3, 0xa9,
        ]
    );
}
