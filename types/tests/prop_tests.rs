use proptest::prelude::*;

use credence_types::{CandidateId, Timestamp, ValidationId};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// Timestamp bincode serialization roundtrip.
    #[test]
    fn timestamp_bincode_roundtrip(secs in 0u64..u64::MAX) {
        let t = Timestamp::new(secs);
        let encoded = bincode::serialize(&t).unwrap();
        let decoded: Timestamp = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, t);
    }

    /// Opaque IDs roundtrip through new/as_str unchanged.
    #[test]
    fn candidate_id_roundtrip(raw in "[a-z0-9_-]{1,40}") {
        let id = CandidateId::new(raw.clone());
        prop_assert_eq!(id.as_str(), raw.as_str());
    }

    /// ValidationId bincode serialization roundtrip.
    #[test]
    fn validation_id_bincode_roundtrip(raw in "[a-f0-9]{32}") {
        let id = ValidationId::new(format!("vld_{raw}"));
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: ValidationId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }
}

/// Generated validation IDs never collide in a modest batch.
#[test]
fn generated_validation_ids_unique_in_batch() {
    use std::collections::HashSet;
    let ids: HashSet<ValidationId> = (0..1000).map(|_| ValidationId::generate()).collect();
    assert_eq!(ids.len(), 1000);
}
