//! Import cycle detection.
//!
//! Cycles are the strongly connected components of the resolved import
//! graph, found with an iterative Tarjan traversal so that deep chains
//! cannot exhaust the call stack. Nodes are visited in path order and
//! successor lists are sorted, which makes both the set of cycles and the
//! order of nodes inside each cycle reproducible.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::file_id::FileId;
use crate::graph::DependencyGraph;

const UNVISITED: usize = usize::MAX;

/// Dense index view of the graph: node `i` is the i-th path in sorted order.
struct IndexedGraph<'a> {
    ids: Vec<&'a FileId>,
    successors: Vec<Vec<usize>>,
}

impl<'a> IndexedGraph<'a> {
    fn build(graph: &'a DependencyGraph) -> Self {
        let ids: Vec<&FileId> = graph.files.keys().collect();
        let index: FxHashMap<&FileId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let successors = graph
            .files
            .values()
            .enumerate()
            .map(|(node_index, node)| {
                let mut succ: Vec<usize> = node
                    .imports
                    .iter()
                    .filter_map(|imp| imp.resolved_path.as_ref())
                    .filter_map(|target| index.get(target).copied())
                    // self-imports are not cycles
                    .filter(|&target| target != node_index)
                    .collect();
                succ.sort_unstable();
                succ.dedup();
                succ
            })
            .collect();

        Self { ids, successors }
    }
}

/// Tarjan's strongly connected components over a dense adjacency list.
///
/// Uses an explicit frame stack of `(node, next_child)` instead of
/// recursion. Components are returned in the order Tarjan completes them;
/// singletons are included.
pub fn strongly_connected_components(successors: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = successors.len();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut frames: Vec<(usize, usize)> = Vec::new();
    let mut next_index = 0usize;
    let mut components = Vec::new();

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, child) = *frame;

            if let Some(&succ) = successors[node].get(child) {
                frame.1 += 1;
                if index[succ] == UNVISITED {
                    index[succ] = next_index;
                    lowlink[succ] = next_index;
                    next_index += 1;
                    stack.push(succ);
                    on_stack[succ] = true;
                    frames.push((succ, 0));
                } else if on_stack[succ] {
                    lowlink[node] = lowlink[node].min(index[succ]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[node]);
            }

            if lowlink[node] == index[node] {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}

type Adjacency = FxHashMap<usize, Vec<usize>>;

/// BFS tree from `root`: maps every reached node to the node it was
/// reached from.
fn bfs_parents(root: usize, adjacency: &Adjacency) -> FxHashMap<usize, usize> {
    let mut parent = FxHashMap::default();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        let next_nodes = adjacency.get(&node).map(Vec::as_slice).unwrap_or_default();
        for &next in next_nodes {
            if next != root && !parent.contains_key(&next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    parent
}

/// Follow `links` from `from` until `start`. Excludes `from`, includes
/// `start`.
fn path_to_start(from: usize, start: usize, links: &FxHashMap<usize, usize>) -> Vec<usize> {
    let mut path = Vec::new();
    let mut cursor = from;
    while cursor != start {
        let Some(&step) = links.get(&cursor) else {
            break;
        };
        path.push(step);
        cursor = step;
    }
    path
}

/// Tree path from `start` down to `to`. Excludes `start`, includes `to`.
fn path_from_start(to: usize, start: usize, parent: &FxHashMap<usize, usize>) -> Vec<usize> {
    let mut path = Vec::new();
    let mut cursor = to;
    while cursor != start {
        path.push(cursor);
        let Some(&up) = parent.get(&cursor) else {
            break;
        };
        cursor = up;
    }
    path.reverse();
    path
}

/// Order a component as a closed walk starting at its smallest member.
///
/// Every consecutive pair (with wraparound) is an edge. For a simple cycle
/// this is the cycle itself; for denser components a member may appear more
/// than once.
///
/// One BFS tree out of the start and one into it are built per component.
/// Members are listed in pre-order of the outgoing tree; when the next
/// member is not a child of the current one, the walk returns to the start
/// through the incoming tree and descends again.
fn closed_walk(component: &[usize], successors: &[Vec<usize>]) -> Vec<usize> {
    let members: FxHashSet<usize> = component.iter().copied().collect();
    let Some(&start) = component.iter().min() else {
        return Vec::new();
    };

    let mut forward: Adjacency = FxHashMap::default();
    let mut backward: Adjacency = FxHashMap::default();
    for &node in component {
        for &succ in &successors[node] {
            if members.contains(&succ) {
                forward.entry(node).or_default().push(succ);
                backward.entry(succ).or_default().push(node);
            }
        }
    }
    for preds in backward.values_mut() {
        preds.sort_unstable();
    }

    let out_parent = bfs_parents(start, &forward);
    let in_next = bfs_parents(start, &backward);

    let mut sorted = component.to_vec();
    sorted.sort_unstable();
    let mut children: Adjacency = FxHashMap::default();
    for &node in &sorted {
        if let Some(&parent) = out_parent.get(&node) {
            children.entry(parent).or_default().push(node);
        }
    }

    let mut order = Vec::with_capacity(component.len());
    let mut pending = vec![start];
    while let Some(node) = pending.pop() {
        order.push(node);
        if let Some(kids) = children.get(&node) {
            pending.extend(kids.iter().rev());
        }
    }

    let mut walk = vec![start];
    let mut current = start;
    for &target in order.iter().skip(1) {
        if out_parent.get(&target) != Some(&current) {
            walk.extend(path_to_start(current, start, &in_next));
            walk.extend(path_from_start(target, start, &out_parent));
        } else {
            walk.push(target);
        }
        current = target;
    }

    let mut back = path_to_start(current, start, &in_next);
    // the walk wraps around to `start`
    back.pop();
    walk.extend(back);

    walk
}

/// Find import cycles in a graph.
///
/// Each cycle starts at its lexicographically smallest file, and cycles are
/// ordered by that first file. Components of a single file are never
/// reported, even when the file imports itself.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<FileId>> {
    let indexed = IndexedGraph::build(graph);

    let mut walks: Vec<Vec<usize>> = strongly_connected_components(&indexed.successors)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| closed_walk(&component, &indexed.successors))
        .collect();
    walks.sort_by_key(|walk| walk.first().copied());

    walks
        .into_iter()
        .map(|walk| {
            walk.into_iter()
                .map(|i| indexed.ids[i].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_helpers::{edge_graph, id};

    fn assert_closed_walk(graph: &DependencyGraph, cycle: &[FileId]) {
        for (i, from) in cycle.iter().enumerate() {
            let to = &cycle[(i + 1) % cycle.len()];
            assert!(
                graph.dependencies(from).contains(to),
                "{from} -> {to} is not an edge"
            );
        }
    }

    #[test]
    fn three_node_ring_is_one_cycle_in_order() {
        let graph = edge_graph(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles, vec![vec![id("a"), id("b"), id("c")]]);
    }

    #[test]
    fn ring_entered_from_a_later_node_still_starts_at_smallest() {
        let graph = edge_graph(&[("c", "b"), ("b", "a"), ("a", "c")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles, vec![vec![id("a"), id("c"), id("b")]]);
        assert_closed_walk(&graph, &cycles[0]);
    }

    #[test]
    fn acyclic_graph_and_self_loops_have_no_cycles() {
        let graph = edge_graph(&[("a", "b"), ("b", "c"), ("a", "c"), ("d", "d")]);
        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn separate_components_are_reported_separately() {
        let graph = edge_graph(&[
            ("x", "y"),
            ("y", "x"),
            ("a", "b"),
            ("b", "a"),
            ("b", "x"),
        ]);
        let cycles = find_cycles(&graph);
        assert_eq!(
            cycles,
            vec![vec![id("a"), id("b")], vec![id("x"), id("y")]]
        );
    }

    #[test]
    fn figure_eight_walk_covers_every_member() {
        // a <-> b and a <-> c share only a
        let graph = edge_graph(&[("a", "b"), ("b", "a"), ("a", "c"), ("c", "a")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        assert_eq!(cycle, &vec![id("a"), id("b"), id("a"), id("c")]);
        assert_closed_walk(&graph, cycle);
    }

    #[test]
    fn hub_and_spokes_return_through_the_hub() {
        let spokes: Vec<String> = (0..2_000).map(|i| format!("s{i:04}")).collect();
        let mut edges: Vec<(&str, &str)> = Vec::new();
        for spoke in &spokes {
            edges.push(("a", spoke.as_str()));
            edges.push((spoke.as_str(), "a"));
        }

        let graph = edge_graph(&edges);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        assert_eq!(cycle.len(), 2 * spokes.len());
        assert_eq!(&cycle[..4], &[id("a"), id("s0000"), id("a"), id("s0001")]);
        assert_closed_walk(&graph, cycle);
    }

    #[test]
    fn walk_reenters_through_the_start_when_branches_diverge() {
        // a -> b -> d -> a and a -> c -> a, with d only reachable via b
        let graph = edge_graph(&[("a", "b"), ("b", "d"), ("d", "a"), ("a", "c"), ("c", "a")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles, vec![vec![id("a"), id("b"), id("d"), id("a"), id("c")]]);
        assert_closed_walk(&graph, &cycles[0]);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..20_000).map(|i| format!("n{i:05}")).collect();
        let mut edges: Vec<(&str, &str)> = names
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect();
        edges.push((names[names.len() - 1].as_str(), names[0].as_str()));

        let graph = edge_graph(&edges);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 20_000);
        assert_eq!(cycles[0][0], id("n00000"));
    }

    #[test]
    fn tarjan_on_raw_adjacency() {
        // 0 -> 1 -> 2 -> 0, 3 -> 2
        let successors = vec![vec![1], vec![2], vec![0], vec![2]];
        let mut components = strongly_connected_components(&successors);
        for component in &mut components {
            component.sort_unstable();
        }
        components.sort();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3]]);
    }
}
