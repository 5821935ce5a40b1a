//! Undirected zone adjacency graph.
//!
//! Built by symmetrizing each zone's declared neighbor list. Self-loops
//! are dropped; declared neighbors with no backing zone become stub nodes.
//! Node insertion order is preserved so traversals are deterministic.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Zone, ZoneKind};

/// Symmetrized adjacency over zone kinds.
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    order: Vec<ZoneKind>,
    adj: HashMap<ZoneKind, Vec<ZoneKind>>,
}

impl ZoneGraph {
    /// Build the graph from a layout's zones.
    pub fn from_zones(zones: &[Zone]) -> Self {
        let mut graph = ZoneGraph {
            order: Vec::new(),
            adj: HashMap::new(),
        };
        for zone in zones {
            graph.ensure_node(zone.name);
            for &nbr in &zone.connections {
                if nbr == zone.name {
                    continue;
                }
                graph.ensure_node(nbr);
                graph.add_edge(zone.name, nbr);
            }
        }
        graph
    }

    fn ensure_node(&mut self, kind: ZoneKind) {
        if !self.adj.contains_key(&kind) {
            self.order.push(kind);
            self.adj.insert(kind, Vec::new());
        }
    }

    fn add_edge(&mut self, a: ZoneKind, b: ZoneKind) {
        let fwd = self.adj.get_mut(&a).expect("node ensured");
        if !fwd.contains(&b) {
            fwd.push(b);
        }
        let rev = self.adj.get_mut(&b).expect("node ensured");
        if !rev.contains(&a) {
            rev.push(a);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of nodes, stubs included.
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn has_edge(&self, a: ZoneKind, b: ZoneKind) -> bool {
        self.adj.get(&a).is_some_and(|n| n.contains(&b))
    }

    pub fn neighbors(&self, kind: ZoneKind) -> &[ZoneKind] {
        self.adj.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Number of nodes reachable by BFS from the first inserted node.
    ///
    /// Zero for an empty graph. Stub nodes count like any other node.
    pub fn reach_count(&self) -> usize {
        let Some(&start) = self.order.first() else {
            return 0;
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &nbr in &self.adj[&node] {
                if seen.insert(nbr) {
                    queue.push_back(nbr);
                }
            }
        }
        seen.len()
    }

    /// Whether any component contains a cycle.
    ///
    /// Iterative DFS with an explicit stack; an edge back to an already
    /// visited node other than the immediate parent is a cycle.
    pub fn has_cycle(&self) -> bool {
        let mut visited: HashSet<ZoneKind> = HashSet::new();
        for &root in &self.order {
            if visited.contains(&root) {
                continue;
            }
            let mut stack: Vec<(ZoneKind, Option<ZoneKind>)> = vec![(root, None)];
            while let Some((node, parent)) = stack.pop() {
                if !visited.insert(node) {
                    continue;
                }
                for &nbr in &self.adj[&node] {
                    if Some(nbr) == parent {
                        continue;
                    }
                    if visited.contains(&nbr) {
                        return true;
                    }
                    stack.push((nbr, Some(node)));
                }
            }
        }
        false
    }

    /// BFS shortest hop count between two nodes; `None` if unreachable.
    pub fn hop_distance(&self, from: ZoneKind, to: ZoneKind) -> Option<u32> {
        if !self.adj.contains_key(&from) {
            return None;
        }
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0u32)]);
        while let Some((node, dist)) = queue.pop_front() {
            if node == to {
                return Some(dist);
            }
            for &nbr in &self.adj[&node] {
                if seen.insert(nbr) {
                    queue.push_back((nbr, dist + 1));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LightingProfile, PrivacyLevel};

    fn zone(kind: ZoneKind, connections: Vec<ZoneKind>) -> Zone {
        Zone {
            name: kind,
            volume_m3: 20.0,
            usable_ratio: 0.8,
            privacy: PrivacyLevel::Medium,
            connections,
            acoustic_isolation: 0.6,
            lighting: LightingProfile::Neutral4000K,
            is_pressurized: true,
            is_egress: false,
            equipment: vec![],
        }
    }

    #[test]
    fn symmetrizes_one_directional_declarations() {
        use ZoneKind::*;
        // Work declares Airlock; Airlock declares nothing back.
        let zones = vec![zone(Airlock, vec![]), zone(Work, vec![Airlock])];
        let graph = ZoneGraph::from_zones(&zones);
        assert!(graph.has_edge(Airlock, Work));
        assert!(graph.has_edge(Work, Airlock));
        assert_eq!(graph.neighbors(Airlock), &[Work]);
        assert_eq!(graph.neighbors(CrewQuarters), &[] as &[ZoneKind]);
    }

    #[test]
    fn drops_self_loops() {
        use ZoneKind::*;
        let zones = vec![zone(Work, vec![Work])];
        let graph = ZoneGraph::from_zones(&zones);
        assert!(!graph.has_edge(Work, Work));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn stub_nodes_for_undeclared_zones() {
        use ZoneKind::*;
        let zones = vec![zone(Work, vec![StormShelter])];
        let graph = ZoneGraph::from_zones(&zones);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.has_edge(Work, StormShelter));
    }

    #[test]
    fn path_graph_has_no_cycle() {
        use ZoneKind::*;
        let zones = vec![
            zone(Airlock, vec![Work]),
            zone(Work, vec![Airlock, Exercise]),
            zone(Exercise, vec![Work]),
        ];
        let graph = ZoneGraph::from_zones(&zones);
        assert_eq!(graph.reach_count(), 3);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn triangle_has_cycle() {
        use ZoneKind::*;
        let zones = vec![
            zone(Airlock, vec![Work, Exercise]),
            zone(Work, vec![Exercise]),
            zone(Exercise, vec![]),
        ];
        let graph = ZoneGraph::from_zones(&zones);
        assert!(graph.has_cycle());
    }

    #[test]
    fn cycle_found_in_second_component() {
        use ZoneKind::*;
        // Component 1 is a lone pair; component 2 is a triangle.
        let zones = vec![
            zone(Airlock, vec![StormShelter]),
            zone(StormShelter, vec![]),
            zone(Work, vec![Exercise, GalleyDining]),
            zone(Exercise, vec![GalleyDining]),
            zone(GalleyDining, vec![]),
        ];
        let graph = ZoneGraph::from_zones(&zones);
        assert!(graph.has_cycle());
        assert!(graph.reach_count() < graph.node_count());
    }

    #[test]
    fn hop_distances() {
        use ZoneKind::*;
        let zones = vec![
            zone(Airlock, vec![Work]),
            zone(Work, vec![Exercise]),
            zone(Exercise, vec![CrewQuarters]),
            zone(CrewQuarters, vec![]),
        ];
        let graph = ZoneGraph::from_zones(&zones);
        assert_eq!(graph.hop_distance(Airlock, Airlock), Some(0));
        assert_eq!(graph.hop_distance(Airlock, Work), Some(1));
        assert_eq!(graph.hop_distance(Airlock, CrewQuarters), Some(3));
        assert_eq!(graph.hop_distance(Airlock, StormShelter), None);
    }

    #[test]
    fn empty_graph() {
        let graph = ZoneGraph::from_zones(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.reach_count(), 0);
        assert!(!graph.has_cycle());
    }
}
