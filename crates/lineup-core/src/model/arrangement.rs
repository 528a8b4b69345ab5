use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::combinatorics::{LINEUP_PERMUTATIONS, LINEUP_SIZE, LineupPermutations};
use crate::error::ParseError;

/// Assignment of roster players to lineup slots.
///
/// `indices()[slot]` is the roster index fielded in `slot`. Rosters are kept in
/// rating order, so the label `"1-2-3"` means strongest player in the first
/// slot. Ordering follows the label's lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arrangement([usize; LINEUP_SIZE]);

impl Arrangement {
    /// The rank-ordered arrangement, `"1-2-3"`.
    pub const CANONICAL: Arrangement = Arrangement([0, 1, 2]);

    /// Every arrangement in canonical (lexicographic) order.
    pub fn all() -> [Arrangement; LINEUP_PERMUTATIONS] {
        let perms = LineupPermutations::new();
        let perms = perms.as_slice();
        std::array::from_fn(|i| Arrangement(perms[i]))
    }

    /// Wraps `indices` if it is a permutation of `{0, 1, 2}`.
    pub fn from_indices(indices: [usize; LINEUP_SIZE]) -> Option<Self> {
        let mut sorted = indices;
        sorted.sort_unstable();
        (sorted == [0, 1, 2]).then_some(Arrangement(indices))
    }

    pub const fn indices(self) -> [usize; LINEUP_SIZE] {
        self.0
    }

    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    /// Reorders roster entries into slot order.
    pub fn apply<T>(self, roster: &[T; LINEUP_SIZE]) -> [&T; LINEUP_SIZE] {
        self.0.map(|index| &roster[index])
    }
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{}-{}-{}", a + 1, b + 1, c + 1)
    }
}

impl FromStr for Arrangement {
    type Err = ParseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Arrangement(label.to_string());

        let mut indices = [0usize; LINEUP_SIZE];
        let mut parts = label.trim().split('-');
        for slot in indices.iter_mut() {
            let rank: usize = parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(invalid)?;
            if !(1..=LINEUP_SIZE).contains(&rank) {
                return Err(invalid());
            }
            *slot = rank - 1;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Arrangement::from_indices(indices).ok_or_else(invalid)
    }
}

impl Serialize for Arrangement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Arrangement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_one_based() {
        let labels: Vec<String> = Arrangement::all().iter().map(|a| a.to_string()).collect();
        assert_eq!(
            labels,
            ["1-2-3", "1-3-2", "2-1-3", "2-3-1", "3-1-2", "3-2-1"]
        );
    }

    #[test]
    fn canonical_comes_first() {
        assert_eq!(Arrangement::all()[0], Arrangement::CANONICAL);
        assert!(Arrangement::default().is_canonical());
    }

    #[test]
    fn ordering_matches_label_order() {
        let all = Arrangement::all();
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(
            all.windows(2)
                .all(|pair| pair[0].to_string() < pair[1].to_string())
        );
    }

    #[test]
    fn parse_roundtrips_every_label() {
        for arrangement in Arrangement::all() {
            let parsed: Arrangement = arrangement.to_string().parse().unwrap();
            assert_eq!(parsed, arrangement);
        }
        assert_eq!(" 2 - 1 - 3 ".parse::<Arrangement>().unwrap().indices(), [1, 0, 2]);
    }

    #[test]
    fn rejects_invalid_labels() {
        for label in ["", "1-2", "1-2-3-4", "1-1-2", "0-1-2", "1-2-4", "a-b-c"] {
            assert_eq!(
                label.parse::<Arrangement>(),
                Err(ParseError::Arrangement(label.to_string()))
            );
        }
    }

    #[test]
    fn apply_places_roster_entries_in_slots() {
        let roster = ["first", "second", "third"];
        let arrangement: Arrangement = "2-3-1".parse().unwrap();
        assert_eq!(arrangement.apply(&roster), [&"second", &"third", &"first"]);
    }

    #[test]
    fn from_indices_requires_a_permutation() {
        assert!(Arrangement::from_indices([2, 0, 1]).is_some());
        assert!(Arrangement::from_indices([0, 0, 1]).is_none());
        assert!(Arrangement::from_indices([0, 1, 3]).is_none());
    }

    #[test]
    fn serializes_as_label() {
        let arrangement: Arrangement = "3-1-2".parse().unwrap();
        let json = serde_json::to_string(&arrangement).unwrap();
        assert_eq!(json, "\"3-1-2\"");
        let back: Arrangement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, arrangement);
        assert!(serde_json::from_str::<Arrangement>("\"1-1-1\"").is_err());
    }
}
