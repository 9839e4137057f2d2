use super::*;

#[test]
fn memory_binding_counts_writes_but_not_edits() {
    let mut b = MemoryBinding::new(1.0);
    assert_eq!(b.capture_initial(), 1.0);
    b.write(2.0);
    b.set(3.0);
    assert_eq!(b.read(), 3.0);
    assert_eq!(b.writes(), 1);
}

#[test]
fn mutable_reference_forwards() {
    fn bump<B: TargetBinding<Value = f64>>(mut b: B) {
        let v = b.read();
        b.write(v + 1.0);
    }
    let mut b = MemoryBinding::new(1.0);
    bump(&mut b);
    assert_eq!(*b.value(), 2.0);
}
