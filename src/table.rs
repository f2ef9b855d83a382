//! This module provides the `TransitionTable`, the ordered rule set a machine executes.
//!
//! Rules are kept in authoring order. Duplicate `(state, symbol)` keys are legal and
//! resolved by order: the rule written first always wins. A first-seen index gives
//! constant-time lookups without changing that resolution.

use crate::types::{State, Symbol, Transition};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
    index: HashMap<State, HashMap<Symbol, usize>>,
}

impl TransitionTable {
    /// Builds a table from rules in authoring order.
    pub fn new(transitions: Vec<Transition>) -> Self {
        let mut index: HashMap<State, HashMap<Symbol, usize>> = HashMap::new();
        for (i, transition) in transitions.iter().enumerate() {
            index
                .entry(transition.state.clone())
                .or_default()
                .entry(transition.symbol)
                .or_insert(i);
        }

        Self { transitions, index }
    }

    /// Finds the first rule matching `(state, symbol)`.
    ///
    /// # Returns
    ///
    /// * `Some(&Transition)` for the earliest rule with that key.
    /// * `None` if no rule matches.
    pub fn lookup(&self, state: &str, symbol: Symbol) -> Option<&Transition> {
        self.position(state, symbol).map(|i| &self.transitions[i])
    }

    /// Returns the rules that can never fire because an earlier rule shares their key.
    pub fn shadowed(&self) -> Vec<(usize, &Transition)> {
        self.transitions
            .iter()
            .enumerate()
            .filter(|(i, t)| self.position(&t.state, t.symbol) != Some(*i))
            .collect()
    }

    fn position(&self, state: &str, symbol: Symbol) -> Option<usize> {
        self.index.get(state)?.get(&symbol).copied()
    }

    /// Returns every state label referenced by the table, as a source or a target.
    pub fn states(&self) -> BTreeSet<&str> {
        self.transitions
            .iter()
            .flat_map(|t| [t.state.as_str(), t.new_state.as_str()])
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
