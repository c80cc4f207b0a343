use crate::{
    cube::{CubeState, PackedCube},
    error::{Result, SearchError},
};
use rand::{seq::index::sample, Rng};
use rustc_hash::FxHashMap;
use std::collections::{hash_map::Entry, BTreeMap};

// A mapping from cube states to the number of moves needed to reach them
// from the solved state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTable {
    entries: FxHashMap<PackedCube, u8>,
}

impl SearchTable {
    pub fn new() -> SearchTable {
        SearchTable::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, state: &CubeState) -> Option<u8> {
        self.get_packed(state.pack())
    }

    pub fn get_packed(&self, key: PackedCube) -> Option<u8> {
        self.entries.get(&key).copied()
    }

    pub fn contains(&self, state: &CubeState) -> bool {
        self.entries.contains_key(&state.pack())
    }

    // Record a depth for a state unless it is already known. Returns true if
    // the state was new.
    pub fn insert_if_absent(&mut self, state: &CubeState, depth: u8) -> bool {
        match self.entries.entry(state.pack()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(x) => {
                x.insert(depth);
                true
            }
        }
    }

    // Make room for `additional` more entries, reporting allocation failure
    // instead of aborting.
    pub fn try_reserve(&mut self, additional: usize, depth: u8) -> Result<()> {
        self.entries
            .try_reserve(additional)
            .map_err(|source| SearchError::OutOfMemory { depth, source })
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeState, u8)> + '_ {
        self.entries.iter().map(|(k, v)| (k.unpack(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = (PackedCube, u8)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    // All states recorded at a depth, sorted by packed key.
    pub fn states_at(&self, depth: u8) -> Vec<CubeState> {
        let mut keys = self
            .entries
            .iter()
            .filter(|(_, d)| **d == depth)
            .map(|(k, _)| *k)
            .collect::<Vec<_>>();
        keys.sort();
        keys.into_iter().map(PackedCube::unpack).collect()
    }

    pub fn depth_counts(&self) -> BTreeMap<u8, usize> {
        let mut res = BTreeMap::new();
        for depth in self.entries.values() {
            *res.entry(*depth).or_insert(0) += 1;
        }
        res
    }

    pub fn max_depth(&self) -> Option<u8> {
        self.entries.values().copied().max()
    }

    // Take the union of two tables. When both know a state, the smaller
    // depth wins.
    pub fn merge(&mut self, other: SearchTable) {
        self.entries.reserve(other.len());
        for (key, depth) in other.entries {
            self.entries
                .entry(key)
                .and_modify(|x| *x = (*x).min(depth))
                .or_insert(depth);
        }
    }

    // Keep at most `width` states per depth, chosen uniformly at random.
    // Depth values are never changed.
    pub fn prune<R: Rng>(&self, width: usize, rng: &mut R) -> SearchTable {
        let mut groups: BTreeMap<u8, Vec<PackedCube>> = BTreeMap::new();
        for (key, depth) in &self.entries {
            groups.entry(*depth).or_default().push(*key);
        }

        let mut res = SearchTable::new();
        for (depth, mut keys) in groups {
            if keys.len() <= width {
                res.entries.extend(keys.into_iter().map(|k| (k, depth)));
                continue;
            }
            // Sort first so the selection only depends on the RNG.
            keys.sort();
            for idx in sample(rng, keys.len(), width) {
                res.entries.insert(keys[idx], depth);
            }
        }
        res
    }
}

impl FromIterator<(CubeState, u8)> for SearchTable {
    fn from_iter<T: IntoIterator<Item = (CubeState, u8)>>(iter: T) -> Self {
        let mut res = SearchTable::new();
        for (state, depth) in iter {
            res.insert_if_absent(&state, depth);
        }
        res
    }
}

// Convenience wrapper over SearchTable::prune.
pub fn prune<R: Rng>(table: &SearchTable, width: usize, rng: &mut R) -> SearchTable {
    table.prune(width, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use rand::{rngs::StdRng, SeedableRng};

    fn sample_table() -> SearchTable {
        let solved = CubeState::solved();
        let mut table = SearchTable::new();
        table.insert_if_absent(&solved, 0);
        for m in Move::ALL {
            let one = solved.apply(m);
            table.insert_if_absent(&one, 1);
            for m2 in Move::successors(Some(m.face())) {
                table.insert_if_absent(&one.apply(m2), 2);
            }
        }
        table
    }

    #[test]
    fn insert_keeps_first_depth() {
        let mut table = SearchTable::new();
        let cube = CubeState::solved().apply(Move::ALL[4]);
        assert!(table.insert_if_absent(&cube, 1));
        assert!(!table.insert_if_absent(&cube, 3));
        assert_eq!(table.get(&cube), Some(1));
        assert!(table.contains(&cube));
        assert!(!table.contains(&CubeState::solved()));
    }

    #[test]
    fn merge_prefers_smaller_depth() {
        let a = CubeState::solved().apply(Move::ALL[0]);
        let b = CubeState::solved().apply(Move::ALL[7]);
        let mut t1: SearchTable = [(a, 3), (b, 1)].into_iter().collect();
        let t2: SearchTable = [(a, 1), (b, 4), (CubeState::solved(), 0)]
            .into_iter()
            .collect();
        t1.merge(t2);
        assert_eq!(t1.len(), 3);
        assert_eq!(t1.get(&a), Some(1));
        assert_eq!(t1.get(&b), Some(1));
        assert_eq!(t1.get(&CubeState::solved()), Some(0));
    }

    #[test]
    fn prune_cardinality() {
        let table = sample_table();
        let counts = table.depth_counts();
        let mut rng = StdRng::seed_from_u64(5);
        for width in [0, 1, 10, 18, 100, 1000] {
            let pruned = table.prune(width, &mut rng);
            let pruned_counts = pruned.depth_counts();
            for (depth, count) in &counts {
                let expected = (*count).min(width);
                assert_eq!(
                    pruned_counts.get(depth).copied().unwrap_or(0),
                    expected,
                    "width {} depth {}",
                    width,
                    depth
                );
            }
            for (state, depth) in pruned.iter() {
                assert_eq!(table.get(&state), Some(depth));
            }
        }
    }

    #[test]
    fn prune_is_reproducible() {
        let table = sample_table();
        let p1 = table.prune(20, &mut StdRng::seed_from_u64(11));
        let p2 = table.prune(20, &mut StdRng::seed_from_u64(11));
        assert_eq!(p1, p2);
    }

    #[test]
    fn states_at_depth() {
        let table = sample_table();
        let ones = table.states_at(1);
        assert_eq!(ones.len(), 18);
        assert!(ones.iter().all(|s| table.get(s) == Some(1)));
        assert_eq!(table.states_at(0), vec![CubeState::solved()]);
        assert_eq!(table.max_depth(), Some(2));
    }
}
