//! Elementary cycle enumeration (Johnson's algorithm).
//!
//! Nodes are numbered by store order. Vertices outside every nontrivial
//! strongly connected component lie on no cycle and are dropped up front.
//! The search then repeatedly takes the least remaining vertex `s` that sits
//! in a nontrivial component of the subgraph `>= s`, enumerates the circuits
//! through `s` inside that component, and moves past it. Every cycle is
//! found exactly once, starting from its earliest node.
//!
//! Both the component search and the circuit search keep explicit stacks,
//! so long narrative loops cannot exhaust the call stack.

use std::collections::{HashMap, HashSet};
use story_graph::{NodeId, NodeStore};

/// Find every elementary cycle in the store's choice graph.
///
/// Choices leading to missing nodes are ignored and parallel choices between
/// the same pair of nodes count as one edge. Each cycle is returned as its
/// node sequence, starting from the node that comes first in store order.
pub fn find_cycles(store: &NodeStore) -> Vec<Vec<NodeId>> {
    let ids: Vec<&NodeId> = store.ids().collect();
    let adjacency = build_adjacency(store);

    let mut on_cycle = vec![false; adjacency.len()];
    for component in strongly_connected(&adjacency, |_| true) {
        if is_nontrivial(&adjacency, &component) {
            for v in component {
                on_cycle[v] = true;
            }
        }
    }

    let mut finder = CycleFinder::new(&adjacency);
    let mut floor = 0;
    while let Some((start, component)) = least_component(&adjacency, &on_cycle, floor) {
        finder.search_from(start, &component);
        floor = start + 1;
    }

    finder
        .cycles
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|i| ids[i].clone()).collect())
        .collect()
}

/// Deduplicated successor lists, in first-choice order.
fn build_adjacency(store: &NodeStore) -> Vec<Vec<usize>> {
    let positions: HashMap<&str, usize> = store
        .ids()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    store
        .nodes()
        .map(|node| {
            let mut successors = Vec::new();
            for choice in &node.choices {
                if let Some(&to) = positions.get(choice.target.as_str()) {
                    if !successors.contains(&to) {
                        successors.push(to);
                    }
                }
            }
            successors
        })
        .collect()
}

fn is_nontrivial(adjacency: &[Vec<usize>], component: &[usize]) -> bool {
    match component {
        [v] => adjacency[*v].contains(v),
        _ => true,
    }
}

/// The nontrivial component of the subgraph `>= floor` holding the least
/// vertex, together with that vertex.
fn least_component(
    adjacency: &[Vec<usize>],
    on_cycle: &[bool],
    floor: usize,
) -> Option<(usize, Vec<usize>)> {
    strongly_connected(adjacency, |v| v >= floor && on_cycle[v])
        .into_iter()
        .filter(|component| is_nontrivial(adjacency, component))
        .filter_map(|component| {
            let least = component.iter().copied().min()?;
            Some((least, component))
        })
        .min_by_key(|(least, _)| *least)
}

/// Tarjan's strongly connected components over the vertices accepted by
/// `active`.
fn strongly_connected<F>(adjacency: &[Vec<usize>], active: F) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> bool,
{
    const UNVISITED: usize = usize::MAX;

    let n = adjacency.len();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut components = Vec::new();
    let mut next_index = 0;

    // (vertex, position of the next successor to look at)
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if !active(root) || index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(&(v, next)) = frames.last() {
            if let Some(&w) = adjacency[v].get(next) {
                let top = frames.len() - 1;
                frames[top].1 += 1;

                if !active(w) {
                    continue;
                }
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}

/// One vertex on the current circuit path.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next: usize,
    found: bool,
}

impl Frame {
    fn new(vertex: usize) -> Self {
        Self {
            vertex,
            next: 0,
            found: false,
        }
    }
}

struct CycleFinder<'a> {
    adjacency: &'a [Vec<usize>],
    in_component: Vec<bool>,
    blocked: Vec<bool>,
    /// Vertices to unblock when the key vertex is unblocked.
    blocked_by: Vec<HashSet<usize>>,
    path: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

impl<'a> CycleFinder<'a> {
    fn new(adjacency: &'a [Vec<usize>]) -> Self {
        let n = adjacency.len();
        Self {
            adjacency,
            in_component: vec![false; n],
            blocked: vec![false; n],
            blocked_by: vec![HashSet::new(); n],
            path: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn search_from(&mut self, start: usize, component: &[usize]) {
        for &v in component {
            self.in_component[v] = true;
            self.blocked[v] = false;
            self.blocked_by[v].clear();
        }

        self.circuit(start);

        for &v in component {
            self.in_component[v] = false;
        }
    }

    fn enter(&mut self, v: usize) {
        self.path.push(v);
        self.blocked[v] = true;
    }

    /// Enumerate every circuit through `start` within the current component.
    fn circuit(&mut self, start: usize) {
        let adjacency = self.adjacency;
        self.enter(start);
        let mut frames = vec![Frame::new(start)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.vertex;

            if let Some(&w) = adjacency[v].get(frame.next) {
                frame.next += 1;
                if !self.in_component[w] {
                    continue;
                }
                if w == start {
                    self.cycles.push(self.path.clone());
                    frame.found = true;
                } else if !self.blocked[w] {
                    self.enter(w);
                    frames.push(Frame::new(w));
                }
                continue;
            }

            let found = frame.found;
            frames.pop();

            if found {
                self.unblock(v);
                if let Some(parent) = frames.last_mut() {
                    parent.found = true;
                }
            } else {
                for &w in &adjacency[v] {
                    if self.in_component[w] {
                        self.blocked_by[w].insert(v);
                    }
                }
            }
            self.path.pop();
        }
    }

    fn unblock(&mut self, v: usize) {
        self.blocked[v] = false;
        let mut pending = vec![v];

        while let Some(u) = pending.pop() {
            for w in std::mem::take(&mut self.blocked_by[u]) {
                if self.blocked[w] {
                    self.blocked[w] = false;
                    pending.push(w);
                }
            }
        }
    }
}
