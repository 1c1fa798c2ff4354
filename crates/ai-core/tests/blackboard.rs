use ai_core::{BbKey, Blackboard};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let k_u32 = BbKey::<u32>::new(1);
    let k_str = BbKey::<String>::new(2);

    let mut bb = Blackboard::new();
    assert!(!bb.contains(k_u32));

    bb.set(k_u32, 123);
    bb.set(k_str, "hello".to_string());

    assert_eq!(bb.get(k_u32).copied(), Some(123));
    assert_eq!(bb.get(k_str).map(|s| s.as_str()), Some("hello"));

    assert_eq!(bb.remove(k_u32), Some(123));
    assert_eq!(bb.get(k_u32), None);
    assert_eq!(bb.len(), 1);
}

#[test]
fn blackboard_type_mismatch_reads_as_absent() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(1), 1u32);

    assert_eq!(bb.get(BbKey::<i32>::new(1)), None);
    assert!(bb.get_mut(BbKey::<i32>::new(1)).is_none());
    // The original value is untouched by a mismatched read.
    assert_eq!(bb.get(BbKey::<u32>::new(1)).copied(), Some(1));
}

#[test]
fn get_or_insert_with_replaces_mismatched_value() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(7), 5u32);

    let value = bb.get_or_insert_with(BbKey::<Vec<u8>>::new(7), Vec::new);
    value.push(3);

    assert_eq!(bb.get(BbKey::<Vec<u8>>::new(7)).cloned(), Some(vec![3]));
    assert_eq!(bb.get(BbKey::<u32>::new(7)), None);
}
