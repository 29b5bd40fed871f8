//! The automaton snapshot consumed by the renderer.
//!
//! This module defines the input boundary of Quiver: an ordered list of
//! states, an ordered list of labeled transitions, and the name of the
//! designated initial state. The snapshot carries no geometry; positions
//! and shapes are derived by the layout pipeline in the `quiver` crate.
//!
//! All types implement [`serde::Deserialize`] so snapshots can be loaded
//! from external sources such as the CLI's JSON input.

use serde::Deserialize;

/// A single automaton state.
#[derive(Debug, Clone, Deserialize)]
pub struct State {
    /// Display name; also the key transitions refer to.
    name: String,

    /// Whether the state is marked (accepting). Rendered as a double ring.
    #[serde(default)]
    marked: bool,
}

impl State {
    /// Creates a new state with the given name and marked flag.
    pub fn new(name: impl Into<String>, marked: bool) -> Self {
        Self {
            name: name.into(),
            marked,
        }
    }

    /// Returns the state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the state is marked (accepting).
    pub fn marked(&self) -> bool {
        self.marked
    }
}

/// A labeled transition between two states.
///
/// `from` and `to` name states from the snapshot's state list; they may
/// name the same state (a self-loop). Validation happens at graph
/// construction, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    from: String,
    to: String,

    /// Event label drawn along the transition.
    #[serde(default)]
    label: String,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }

    /// Returns the origin state name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the destination state name.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the transition label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A complete automaton snapshot.
///
/// # Examples
///
/// ```
/// use quiver_core::automaton::{Automaton, State, Transition};
///
/// let automaton = Automaton::new(
///     vec![State::new("s0", true), State::new("s1", false)],
///     vec![Transition::new("s0", "s1", "a")],
///     "s0",
/// );
///
/// assert_eq!(automaton.states().len(), 2);
/// assert_eq!(automaton.initial(), "s0");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<Transition>,

    /// Name of the initial state.
    initial: String,
}

impl Automaton {
    /// Creates a new automaton snapshot.
    pub fn new(
        states: Vec<State>,
        transitions: Vec<Transition>,
        initial: impl Into<String>,
    ) -> Self {
        Self {
            states,
            transitions,
            initial: initial.into(),
        }
    }

    /// Returns the ordered state list.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the ordered transition list.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the name of the initial state.
    pub fn initial(&self) -> &str {
        &self.initial
    }
}
