//! Graph data model for automaton diagrams.
//!
//! This module turns an [`Automaton`] snapshot into the node/link arena the
//! layout engine simulates: one [`Node`] per state, one [`Link`] per
//! transition, plus one initial-marker link for the designated initial
//! state.
//!
//! Nodes and links are stored in flat vectors and addressed through the
//! [`NodeId`] / [`LinkId`] index newtypes. Adjacency questions (finding the
//! reverse of a link, collecting the links around a node) are answered by
//! comparing ids, never references, which keeps the arena free of aliasing
//! concerns.
//!
//! The graph is exclusively owned by one layout run: the engine mutates
//! positions and displacements in place, the geometry pass then reads the
//! final state, and the whole graph is discarded after rendering.

use indexmap::IndexMap;

use quiver_core::{
    automaton::Automaton,
    geometry::{EPSILON, Vec2},
};

use crate::{config::PhysicsConfig, error::QuiverError};

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the underlying arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a link in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

impl LinkId {
    /// Returns the underlying arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A positioned graph vertex.
///
/// `position` and `displacement` are mutated only by the layout engine
/// during simulation; afterwards the node is read-only.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    marked: bool,
    position: Vec2,
    displacement: Vec2,
}

impl Node {
    fn new(id: NodeId, name: String, marked: bool) -> Self {
        Self {
            id,
            name,
            marked,
            position: Vec2::default(),
            displacement: Vec2::default(),
        }
    }

    /// Returns the node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the state is marked (accepting).
    pub fn marked(&self) -> bool {
        self.marked
    }

    /// Returns the current position in simulation space.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns the displacement accumulated in the current iteration.
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Clears the displacement accumulator for the next iteration.
    pub(crate) fn reset_displacement(&mut self) {
        self.displacement = Vec2::default();
    }

    /// Accumulates the Coulomb-like repulsion between two nodes.
    ///
    /// The force is inversely proportional to the distance and is applied
    /// equal-and-opposite into both displacement accumulators. Distances
    /// below [`EPSILON`] are clamped so coincident nodes cannot produce a
    /// singular force.
    pub(crate) fn interact(&mut self, other: &mut Node, physics: &PhysicsConfig) {
        let delta = other.position.sub(self.position);
        let distance = delta.length().max(EPSILON);

        let force = (1.0 - physics.attenuation()) * physics.repulsion() / distance;
        let direction = delta.scale(1.0 / distance);

        self.displacement = self.displacement.sub(direction.scale(force));
        other.displacement = other.displacement.add(direction.scale(force));
    }

    /// Applies the accumulated displacement and returns the distance moved.
    pub(crate) fn displace(&mut self) -> f32 {
        let moved = self.displacement.length();
        self.position = self.position.add(self.displacement);
        moved
    }
}

/// The three visual kinds of link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A transition between two distinct states.
    Standard,
    /// A transition whose origin and destination are the same state.
    SelfLoop,
    /// The decorative marker pointing at the initial state.
    InitialMarker,
}

/// A graph edge between two nodes.
///
/// Links hold node ids, not node references. The meaning of `aux_point`
/// depends on the kind: the curve control point of a standard link, the
/// direction anchor of a self-loop, or the tail anchor of the initial
/// marker.
#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    start: NodeId,
    end: NodeId,
    label: String,
    kind: LinkKind,
    aux_point: Vec2,
}

impl Link {
    fn new(id: LinkId, start: NodeId, end: NodeId, label: String) -> Self {
        let kind = if start == end {
            LinkKind::SelfLoop
        } else {
            LinkKind::Standard
        };

        Self {
            id,
            start,
            end,
            label,
            kind,
            aux_point: Vec2::default(),
        }
    }

    fn initial_marker(id: LinkId, state: NodeId) -> Self {
        Self {
            id,
            start: state,
            end: state,
            label: String::new(),
            kind: LinkKind::InitialMarker,
            aux_point: Vec2::default(),
        }
    }

    /// Returns the link id.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Returns the origin node id.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Returns the destination node id.
    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Returns the transition label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the link kind.
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Returns the auxiliary point computed by link routing.
    pub fn aux_point(&self) -> Vec2 {
        self.aux_point
    }

    pub(crate) fn set_aux_point(&mut self, aux_point: Vec2) {
        self.aux_point = aux_point;
    }

    /// Checks whether the link starts or ends at the given node.
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// Accumulates the Hookean spring attraction between the endpoints.
    ///
    /// Self-loops and initial markers exert no force; they affect
    /// rendering, not layout. The pull is proportional to the endpoint
    /// distance and applied symmetrically.
    pub(crate) fn pull(&self, nodes: &mut [Node], physics: &PhysicsConfig) {
        if self.kind != LinkKind::Standard {
            return;
        }

        let delta = nodes[self.end.0]
            .position()
            .sub(nodes[self.start.0].position());
        let distance = delta.length();
        if distance < EPSILON {
            return;
        }

        let force = (1.0 - physics.attenuation()) * physics.spring() * distance;
        let direction = delta.scale(1.0 / distance);

        let start = &mut nodes[self.start.0];
        start.displacement = start.displacement.add(direction.scale(force));
        let end = &mut nodes[self.end.0];
        end.displacement = end.displacement.sub(direction.scale(force));
    }
}

/// The node/link arena for one layout run.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    initial: NodeId,
}

impl Graph {
    /// Builds the graph for an automaton snapshot.
    ///
    /// Validation happens here, before any simulation starts; the layout
    /// and geometry engines assume a closed, internally consistent graph
    /// once construction succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Graph`] for an empty state list, duplicate
    /// state names, a transition endpoint naming an unknown state, or an
    /// unknown initial state.
    pub fn from_automaton(automaton: &Automaton) -> Result<Self, QuiverError> {
        if automaton.states().is_empty() {
            return Err(QuiverError::Graph("automaton has no states".to_string()));
        }

        let mut ids = IndexMap::new();
        let mut nodes = Vec::with_capacity(automaton.states().len());

        for state in automaton.states() {
            let id = NodeId(nodes.len());
            if ids.insert(state.name().to_string(), id).is_some() {
                return Err(QuiverError::Graph(format!(
                    "duplicate state name `{}`",
                    state.name()
                )));
            }
            nodes.push(Node::new(id, state.name().to_string(), state.marked()));
        }

        let resolve = |name: &str| {
            ids.get(name).copied().ok_or_else(|| {
                QuiverError::Graph(format!("transition references unknown state `{name}`"))
            })
        };

        let mut links = Vec::with_capacity(automaton.transitions().len() + 1);
        for transition in automaton.transitions() {
            let start = resolve(transition.from())?;
            let end = resolve(transition.to())?;
            links.push(Link::new(
                LinkId(links.len()),
                start,
                end,
                transition.label().to_string(),
            ));
        }

        let initial = ids.get(automaton.initial()).copied().ok_or_else(|| {
            QuiverError::Graph(format!(
                "initial state `{}` is not in the state list",
                automaton.initial()
            ))
        })?;
        links.push(Link::initial_marker(LinkId(links.len()), initial));

        Ok(Self {
            nodes,
            links,
            initial,
        })
    }

    /// Returns the nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the links in arena order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the link with the given id.
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// Returns the id of the initial state's node.
    pub fn initial(&self) -> NodeId {
        self.initial
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of links, including the initial marker.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Finds the standard link running opposite to the given one, by
    /// endpoint ids.
    pub fn reverse_of(&self, link: &Link) -> Option<LinkId> {
        self.links
            .iter()
            .find(|candidate| {
                candidate.kind() == LinkKind::Standard
                    && candidate.id() != link.id()
                    && candidate.start() == link.end()
                    && candidate.end() == link.start()
            })
            .map(Link::id)
    }

    /// Returns every link other than `except` that touches the node.
    pub fn links_touching(&self, node: NodeId, except: LinkId) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(move |link| link.id() != except && link.touches(node))
    }

    /// Splits the arena into mutable nodes and shared links, so spring
    /// forces can read link endpoints while writing node accumulators.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Node], &[Link]) {
        (&mut self.nodes, &self.links)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }
}
