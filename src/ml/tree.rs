// ============================================================
// Layer 5 — Regression Tree (CART)
// ============================================================
// A binary tree grown greedily on squared error.
//
// At each node:
//   1. Visit every feature, in an order shuffled by the tree's RNG
//   2. Sort the node's samples by that feature
//   3. Try a threshold halfway between each pair of consecutive
//      distinct values, keeping the one that removes the most SSE
//   4. Samples with value <= threshold go left, the rest right
//
// A node becomes a leaf (predicting the mean of its targets) when
// it holds fewer than `min_samples_split` samples, reaches
// `max_depth`, has constant targets, or has no feature with two
// distinct values left.
//
// Maximising   sum_l² / n_l + sum_r² / n_r
// is equivalent to minimising the children's total SSE, and needs
// only running sums, so each feature costs one sort plus one pass.
//
// Nodes live in a flat Vec and refer to children by index, which
// keeps the serialised form simple.
//
// Reference: Breiman et al. (1984) Classification and Regression Trees

use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::domain::schema::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

/// Growth limits shared by every tree of a forest.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow a tree on the samples listed in `sample` (indices into
    /// `rows`/`targets`; duplicates allowed, as in a bootstrap).
    pub fn fit(
        rows:    &[FeatureVector],
        targets: &[f64],
        sample:  &[usize],
        params:  TreeParams,
        rng:     &mut StdRng,
    ) -> Self {
        let mut builder = TreeBuilder { rows, targets, params, rng, nodes: Vec::new() };
        let mut idx     = sample.to_vec();
        if !idx.is_empty() {
            builder.grow(&mut idx);
        }
        Self { nodes: builder.nodes }
    }

    pub fn predict(&self, row: &FeatureVector) -> f64 {
        let mut at = 0;
        loop {
            match self.nodes.get(at) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split { feature, threshold, left, right }) => {
                    at = if row[*feature] <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of splits on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack   = vec![(0usize, 0usize)];
        while let Some((at, depth)) = stack.pop() {
            match self.nodes.get(at) {
                Some(Node::Split { left, right, .. }) => {
                    // Children always sit after their parent.
                    for child in [*left, *right] {
                        if child > at {
                            stack.push((child, depth + 1));
                        }
                    }
                }
                _ => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Structural check used when loading a persisted tree: every
    /// split refers to a real feature and to child nodes that exist
    /// further down the vector (so traversal always terminates).
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(i, node)| match *node {
                Node::Leaf { value } => value.is_finite(),
                Node::Split { feature, threshold, left, right } => {
                    feature < FEATURE_COUNT
                        && threshold.is_finite()
                        && left > i
                        && right > i
                        && left < self.nodes.len()
                        && right < self.nodes.len()
                }
            })
    }
}

// ─── TreeBuilder ──────────────────────────────────────────────────────────────
struct TreeBuilder<'a> {
    rows:    &'a [FeatureVector],
    targets: &'a [f64],
    params:  TreeParams,
    rng:     &'a mut StdRng,
    nodes:   Vec<Node>,
}

struct BestSplit {
    feature:   usize,
    threshold: f64,
    score:     f64,
}

/// Where a freshly pushed node hangs in the tree.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    LeftOf(usize),
    RightOf(usize),
}

/// A node still to be grown: its samples are `idx[range]`.
struct Pending {
    range: Range<usize>,
    depth: usize,
    slot:  Slot,
}

impl TreeBuilder<'_> {
    /// Grow the whole tree over `idx` with an explicit work stack,
    /// so depth is bounded by memory rather than by the call stack.
    /// Left children are popped first, which keeps nodes in
    /// pre-order and every child after its parent.
    fn grow(&mut self, idx: &mut [usize]) {
        let mut stack = vec![Pending { range: 0..idx.len(), depth: 0, slot: Slot::Root }];

        while let Some(Pending { range, depth, slot }) = stack.pop() {
            let node_id = self.nodes.len();
            let part    = &mut idx[range.clone()];
            let mean    = part.iter().map(|&i| self.targets[i]).sum::<f64>() / part.len() as f64;
            self.nodes.push(Node::Leaf { value: mean });
            self.attach(slot, node_id);

            let too_small = part.len() < self.params.min_samples_split;
            let too_deep  = self.params.max_depth.is_some_and(|d| depth >= d);
            let first     = self.targets[part[0]];
            let pure      = part.iter().all(|&i| self.targets[i] == first);
            if too_small || too_deep || pure {
                continue;
            }

            let Some(best) = self.best_split(part) else {
                continue;
            };

            let feature = best.feature;
            sort_by_feature(self.rows, part, feature);
            let split = range.start + part.partition_point(|&i| self.rows[i][feature] <= best.threshold);

            // Child indices are filled in by `attach` as each child is grown.
            self.nodes[node_id] = Node::Split {
                feature,
                threshold: best.threshold,
                left:      node_id,
                right:     node_id,
            };
            stack.push(Pending { range: split..range.end, depth: depth + 1, slot: Slot::RightOf(node_id) });
            stack.push(Pending { range: range.start..split, depth: depth + 1, slot: Slot::LeftOf(node_id) });
        }
    }

    fn attach(&mut self, slot: Slot, child: usize) {
        match slot {
            Slot::Root => {}
            Slot::LeftOf(parent) => {
                if let Node::Split { left, .. } = &mut self.nodes[parent] {
                    *left = child;
                }
            }
            Slot::RightOf(parent) => {
                if let Node::Split { right, .. } = &mut self.nodes[parent] {
                    *right = child;
                }
            }
        }
    }

    fn best_split(&mut self, idx: &mut [usize]) -> Option<BestSplit> {
        let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
        features.shuffle(&mut *self.rng);

        let n     = idx.len();
        let total = idx.iter().map(|&i| self.targets[i]).sum::<f64>();
        let mut best: Option<BestSplit> = None;

        for feature in features {
            sort_by_feature(self.rows, idx, feature);

            let mut left_sum = 0.0;
            for k in 1..n {
                left_sum += self.targets[idx[k - 1]];

                let lo = self.rows[idx[k - 1]][feature];
                let hi = self.rows[idx[k]][feature];
                if lo == hi {
                    continue;
                }

                let n_left    = k as f64;
                let n_right   = (n - k) as f64;
                let right_sum = total - left_sum;
                let score     = left_sum * left_sum / n_left + right_sum * right_sum / n_right;

                if best.as_ref().map_or(true, |b| score > b.score) {
                    // Adjacent floats can round the midpoint up to `hi`.
                    let mid       = lo + (hi - lo) / 2.0;
                    let threshold = if mid >= hi { lo } else { mid };
                    best = Some(BestSplit { feature, threshold, score });
                }
            }
        }

        best
    }
}

fn sort_by_feature(rows: &[FeatureVector], idx: &mut [usize], feature: usize) {
    idx.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));
}
