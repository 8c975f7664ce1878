//! Hash collections used throughout the pipeline.
//!
//! Symbol tables use Fx hashing; anything whose iteration order leaks into
//! generated output must use [`FxIndexMap`] / [`FxIndexSet`] instead.

use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

pub use rustc_hash::{FxHashMap, FxHashSet};

/// An insertion-ordered map with Fx hashing.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// An insertion-ordered set with Fx hashing.
pub type FxIndexSet<T> = indexmap::IndexSet<T, BuildHasherDefault<FxHasher>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_map_keeps_insertion_order() {
        let mut map: FxIndexMap<&str, u32> = FxIndexMap::default();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        map.insert("zeta", 3);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(map["zeta"], 3);
    }
}
