use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use super::{ProjectId, Solution};
use crate::error::{ProjectBumpError, Result};

/// The update engine's only view of project topology
pub trait DependencyLookup {
    /// All projects that depend on the given project, directly or
    /// indirectly, excluding the project itself.
    fn transitive_dependents(&self, id: &ProjectId) -> HashSet<ProjectId>;
}

/// Dependency graph over the nodes of a [Solution].
///
/// Edges run dependency -> dependent, so the transitive dependents of a node
/// are exactly the nodes reachable from it. Built once per solution load.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<ProjectId, ()>,
    nodes: HashMap<ProjectId, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph from a solution's nodes.
    ///
    /// A dependency on a multi-targeted project connects to every node of
    /// that project. Fails if a dependency names no project in the solution.
    pub fn from_solution(solution: &Solution) -> Result<Self> {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        let mut by_name: HashMap<&str, Vec<ProjectId>> = HashMap::new();

        for project in solution.projects() {
            let idx = graph.add_node(project.id.clone());
            nodes.insert(project.id.clone(), idx);
            by_name
                .entry(project.name.as_str())
                .or_default()
                .push(project.id.clone());
        }

        for project in solution.projects() {
            for dependency in &project.dependencies {
                let dependency_ids = by_name.get(dependency.as_str()).ok_or_else(|| {
                    ProjectBumpError::solution(format!(
                        "Project '{}' depends on unknown project '{}'",
                        project.name, dependency
                    ))
                })?;

                for dependency_id in dependency_ids {
                    graph.add_edge(nodes[dependency_id], nodes[&project.id], ());
                }
            }
        }

        Ok(DependencyGraph { graph, nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.nodes.contains_key(id)
    }
}

impl DependencyLookup for DependencyGraph {
    fn transitive_dependents(&self, id: &ProjectId) -> HashSet<ProjectId> {
        let start = match self.nodes.get(id) {
            Some(idx) => *idx,
            None => return HashSet::new(),
        };

        let mut dependents = HashSet::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                dependents.insert(self.graph[idx].clone());
            }
        }

        dependents
    }
}
