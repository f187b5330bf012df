use foldhash::fast::FixedState;

/// Fixed hash state for kind-keyed tables.
pub(crate) const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5E77_1A6B_C0DE_F00D);

/// A `hashbrown` map using [`FIXED_HASH_STATE`].
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

#[inline]
pub(crate) const fn new_map<K, V>() -> HashMap<K, V> {
    HashMap::with_hasher(FIXED_HASH_STATE)
}

#[inline]
pub(crate) fn map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FIXED_HASH_STATE)
}
