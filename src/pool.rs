use crate::heuristics::Scorer;
use rand::Rng;

/// Weighted candidate set with draw-without-replacement semantics.
///
/// A draw never touches the pool it came from; it hands back a fresh pool
/// with the chosen entry knocked out. Holding on to an older pool value is
/// all it takes to rewind a draw.
///
/// Entries at weight zero or below stay in the collection but can never be
/// drawn, which is how "banned before we even started" is encoded.
#[derive(Debug, Clone, Default)]
pub struct WeightedPool {
    entries: Vec<(String, f64)>,
    total: f64,
}

impl WeightedPool {
    /// Build a pool from any keyed source. The transform maps each entry to
    /// its (key, weight) pair; anything it weighs at zero or below starts out
    /// unselectable.
    pub fn from_source<I, K, V, F>(source: I, transform: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        F: Fn(K, V) -> (String, f64),
    {
        let entries: Vec<(String, f64)> = source
            .into_iter()
            .map(|(key, value)| transform(key, value))
            .collect();

        let total = entries.iter().map(|(_, weight)| weight.max(0.0)).sum();

        Self { entries, total }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many entries are still in the running.
    pub fn selectable(&self) -> usize {
        self.entries.iter().filter(|(_, weight)| *weight > 0.0).count()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn weight_of(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, weight)| *weight)
    }

    /// One weighted draw. The scorer reshapes every weight right before the
    /// roll; a result at or below zero takes the entry out of this round.
    ///
    /// Returns the chosen key plus the pool to keep drawing from. With no
    /// selectable candidate left the key is `None` and the pool comes back
    /// as-is.
    pub fn select<R>(&self, scorer: Option<&Scorer>, rng: &mut R) -> (Option<String>, Self)
    where
        R: Rng + ?Sized,
    {
        let effective: Vec<f64> = self
            .entries
            .iter()
            .map(|(key, weight)| match (*weight > 0.0, scorer) {
                (false, _) => 0.0,
                (true, None) => *weight,
                (true, Some(score)) => score(key, *weight).max(0.0),
            })
            .collect();

        let total: f64 = effective.iter().sum();
        if total <= 0.0 {
            return (None, self.clone());
        }

        let mut roll = rng.gen_range(0.0, total);
        let mut chosen = None;

        for (index, weight) in effective.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }

            if roll < *weight {
                chosen = Some(index);
                break;
            }

            roll -= weight;
        }

        // rounding can push the roll a hair past the last candidate
        let index = match chosen.or_else(|| (0..effective.len()).rev().find(|i| effective[*i] > 0.0)) {
            Some(index) => index,
            None => return (None, self.clone()),
        };

        let mut next = self.clone();
        next.entries[index].1 = 0.0;
        next.total = next.entries.iter().map(|(_, weight)| weight.max(0.0)).sum();

        (Some(self.entries[index].0.clone()), next)
    }
}
