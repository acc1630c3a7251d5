use super::*;

fn result(tag: u8) -> CompositionResult {
    CompositionResult {
        encoded_bytes: vec![tag],
        width: 1,
        height: 1,
        byte_size: 1,
        warnings: Vec::new(),
    }
}

#[test]
fn generations_increase() {
    let slot = PreviewSlot::new();
    let a = slot.begin();
    let b = slot.begin();
    assert!(b > a);
    assert_eq!(b.get(), a.get() + 1);
    assert!(!slot.is_current(a));
    assert!(slot.is_current(b));
}

#[test]
fn stale_results_are_dropped() {
    let slot = PreviewSlot::new();
    let old = slot.begin();
    let new = slot.begin();

    assert!(slot.publish(new, result(2)));
    assert!(!slot.publish(old, result(1)));
    assert_eq!(slot.latest().unwrap().encoded_bytes, vec![2]);
    assert_eq!(slot.latest_generation(), Some(new));
}

#[test]
fn superseded_before_publish_leaves_slot_empty() {
    let slot = PreviewSlot::new();
    let first = slot.begin();
    let _second = slot.begin();
    assert!(!slot.publish(first, result(1)));
    assert!(slot.latest().is_none());
}

#[test]
fn concurrent_publishers_keep_only_the_newest() {
    let slot = Arc::new(PreviewSlot::new());
    let gens: Vec<_> = (0..8).map(|_| slot.begin()).collect();
    let newest = *gens.last().unwrap();

    std::thread::scope(|s| {
        for (i, g) in gens.iter().enumerate() {
            let slot = slot.clone();
            let g = *g;
            s.spawn(move || {
                slot.publish(g, result(i as u8));
            });
        }
    });
    assert_eq!(slot.latest_generation(), Some(newest));
    assert_eq!(slot.latest().unwrap().encoded_bytes, vec![7]);
}
