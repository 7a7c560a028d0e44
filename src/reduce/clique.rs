//! Maximum clique search over the distinguishability relation.
//!
//! Branch-and-bound with a greedy-colouring bound (Tomita & Seki's MCQ, the
//! scheme Konc & Janežič's MCQD refines). Candidates are partitioned into
//! colour classes of mutually too-close nodes; at most one node per class can
//! join a clique, so `|current| + colours` bounds every clique in the branch.
//! Candidates are kept sorted by colour and expanded from the highest colour
//! down, which lets a whole tail of the list be cut at once.

use super::graph::ClosenessGraph;

/// Largest set of pairwise distinguishable nodes within `nodes`, ascending.
///
/// Among equally large cliques the search order decides, which depends only on
/// `nodes` and the graph. A single node is a clique of size one.
pub(crate) fn maximum_clique(graph: &ClosenessGraph, nodes: &[usize]) -> Vec<usize> {
    // Initial order: most distinguishable neighbours first, so the greedy
    // colouring packs dense nodes into few classes.
    let mut ordered: Vec<(usize, usize)> = nodes
        .iter()
        .map(|&v| {
            let degree = nodes
                .iter()
                .filter(|&&u| graph.is_distinguishable(v, u))
                .count();
            (v, degree)
        })
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let ordered: Vec<usize> = ordered.into_iter().map(|(v, _)| v).collect();

    let mut best = Vec::new();
    let mut current = Vec::with_capacity(nodes.len());
    expand(graph, &mut current, colour_sort(graph, &ordered), &mut best);
    best.sort_unstable();
    best
}

/// Greedy colouring: each node joins the first class holding no node it is
/// distinguishable from. Returns `(node, colour)` ordered by colour, colours
/// counted from 1.
fn colour_sort(graph: &ClosenessGraph, candidates: &[usize]) -> Vec<(usize, usize)> {
    let mut classes: Vec<Vec<usize>> = Vec::new();
    for &v in candidates {
        let class = classes
            .iter()
            .position(|class| class.iter().all(|&u| !graph.is_distinguishable(u, v)));
        match class {
            Some(c) => classes[c].push(v),
            None => classes.push(vec![v]),
        }
    }
    classes
        .into_iter()
        .enumerate()
        .flat_map(|(c, class)| class.into_iter().map(move |v| (v, c + 1)))
        .collect()
}

fn expand(
    graph: &ClosenessGraph,
    current: &mut Vec<usize>,
    mut candidates: Vec<(usize, usize)>,
    best: &mut Vec<usize>,
) {
    while let Some((v, colour)) = candidates.pop() {
        if current.len() + colour <= best.len() {
            return;
        }
        current.push(v);
        let next: Vec<usize> = candidates
            .iter()
            .map(|&(u, _)| u)
            .filter(|&u| graph.is_distinguishable(v, u))
            .collect();
        if next.is_empty() {
            if current.len() > best.len() {
                best.clone_from(current);
            }
        } else {
            expand(graph, current, colour_sort(graph, &next), best);
        }
        current.pop();
    }
}
