use crate::{cube::PackedCube, table::SearchTable, vectorize::FeatureKind};
use serde::{Deserialize, Serialize};

// One (features, label) pair for downstream learners.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LabeledSample {
    pub depth: u8,
    // The packed cube as a hex string.
    pub state: String,
    pub features: Vec<f64>,
}

// Every entry of a table as a labeled sample, ordered by depth and then by
// packed state.
pub fn labeled_samples(
    table: &SearchTable,
    kind: FeatureKind,
) -> impl Iterator<Item = LabeledSample> {
    let mut keys: Vec<(u8, PackedCube)> = table.keys().map(|(k, d)| (d, k)).collect();
    keys.sort();
    keys.into_iter().map(move |(depth, key)| LabeledSample {
        depth,
        state: key.to_string(),
        features: kind.vectorize(&key.unpack()).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exhaustive::exhaustive, limits::SearchLimits, vectorize::STICKER_FEATURES};

    #[test]
    fn samples_cover_table_in_order() {
        let table = exhaustive(2, &SearchLimits::unbounded()).unwrap();
        let samples = labeled_samples(&table, FeatureKind::Stickers).collect::<Vec<_>>();
        assert_eq!(samples.len(), table.len());
        assert_eq!(samples[0].depth, 0);
        assert!(samples.windows(2).all(|w| w[0].depth <= w[1].depth));
        assert!(samples.iter().all(|s| s.features.len() == STICKER_FEATURES));
        assert_eq!(samples.iter().filter(|s| s.depth == 1).count(), 18);
    }

    #[test]
    fn json_lines() {
        let table = exhaustive(1, &SearchLimits::unbounded()).unwrap();
        let sample = labeled_samples(&table, FeatureKind::Cubies).next().unwrap();
        let line = serde_json::to_string(&sample).unwrap();
        assert!(line.starts_with("{\"depth\":0,\"state\":\""));
        let parsed: LabeledSample = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, sample);
        assert_eq!(parsed.state.len(), 25);
    }
}
