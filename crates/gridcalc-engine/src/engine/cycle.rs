//! Topological ordering and cycle detection for the dependency graph.
//!
//! When a formula is entered, every formula cell must be reorderable so that
//! its dependencies are computed first (e.g., A1 references B1, B1
//! references C1: the order must be C1, B1, A1). A back-edge on the current
//! DFS path means a circular reference, which must be rejected before it
//! causes infinite recomputation.

use std::collections::HashSet;

use super::deps::DepGraph;

const NO_DEPS: &[String] = &[];

/// Sort the graph dependency-first: every cell appears after all cells it
/// references. Referenced leaves appear in the output even when they are
/// not keys.
///
/// Returns an empty order when the graph contains a cycle. An empty result
/// is ambiguous with "no formulas to order"; the caller is responsible for
/// telling the two apart.
pub fn sort_graph(graph: &DepGraph) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();

    // Fresh DFS from every key, in graph insertion order.
    for root in graph.keys() {
        if visited.contains(root.as_str()) {
            continue;
        }
        if !visit(root, graph, &mut visited, &mut on_stack, &mut order) {
            return Vec::new();
        }
    }
    order
}

/// Post-order DFS from `root` using an explicit work-stack rather than
/// call-stack recursion, so deep dependency chains cannot overflow.
///
/// Each frame remembers how many neighbors it has already explored; a node
/// is emitted only once all of them are done. Returns false on a back-edge.
fn visit<'g>(
    root: &'g str,
    graph: &'g DepGraph,
    visited: &mut HashSet<&'g str>,
    on_stack: &mut HashSet<&'g str>,
    order: &mut Vec<String>,
) -> bool {
    let mut stack: Vec<(&'g str, usize)> = vec![(root, 0)];
    visited.insert(root);
    on_stack.insert(root);

    while let Some((node, next)) = stack.pop() {
        let deps = graph.get(node).map(Vec::as_slice).unwrap_or(NO_DEPS);
        if next < deps.len() {
            stack.push((node, next + 1));

            let neighbor = deps[next].as_str();
            if on_stack.contains(neighbor) {
                return false;
            }
            if visited.insert(neighbor) {
                on_stack.insert(neighbor);
                stack.push((neighbor, 0));
            }
        } else {
            on_stack.remove(node);
            order.push(node.to_string());
        }
    }
    true
}
