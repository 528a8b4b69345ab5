//! Finite enumerations used by the evaluator and the outcome model.
//!
//! Both generators materialize their full sequence up front, so a value can
//! be iterated any number of times and shared freely.

/// Players fielded by each side.
pub const LINEUP_SIZE: usize = 3;

/// Orderings of a [`LINEUP_SIZE`] roster (3!).
pub const LINEUP_PERMUTATIONS: usize = 6;

/// Every ordering of `{0, 1, 2}` in ascending lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupPermutations {
    permutations: Vec<[usize; LINEUP_SIZE]>,
}

impl LineupPermutations {
    pub fn new() -> Self {
        let mut permutations = Vec::with_capacity(LINEUP_PERMUTATIONS);
        let mut current = [0usize, 1, 2];
        loop {
            permutations.push(current);
            if !next_permutation(&mut current) {
                break;
            }
        }
        Self { permutations }
    }

    pub fn as_slice(&self) -> &[[usize; LINEUP_SIZE]] {
        &self.permutations
    }

    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }
}

impl Default for LineupPermutations {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances `data` to its lexicographic successor. Returns `false` once the
/// sequence is in descending order.
fn next_permutation(data: &mut [usize]) -> bool {
    if data.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..data.len() - 1).rev().find(|&i| data[i] < data[i + 1]) else {
        return false;
    };

    let successor = (pivot + 1..data.len())
        .rev()
        .find(|&i| data[i] > data[pivot])
        .unwrap_or(pivot + 1);

    data.swap(pivot, successor);
    data[pivot + 1..].reverse();
    true
}

/// All `k`-element subsets of `{0, .., n-1}`, each sorted ascending, listed
/// in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetCombinations {
    subsets: Vec<Vec<usize>>,
}

impl SubsetCombinations {
    pub fn new(n: usize, k: usize) -> Self {
        let mut subsets = Vec::new();

        if k <= n {
            let mut indices: Vec<usize> = (0..k).collect();
            loop {
                subsets.push(indices.clone());

                // Rightmost position that has not reached its ceiling (n - k + i).
                let Some(pos) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
                    break;
                };

                indices[pos] += 1;
                for next in pos + 1..k {
                    indices[next] = indices[next - 1] + 1;
                }
            }
        }

        Self { subsets }
    }

    pub fn as_slice(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.subsets.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
}
