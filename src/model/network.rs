//! Loaded reaction-network models
//!
//! [`ReactionNetwork`] is the in-memory, stateful representation of a parsed
//! model: it owns the current species concentrations and parameter values,
//! can be reset to its initial state, and derives the ODE right-hand side
//! from reaction stoichiometry and bound rate laws.
//!
//! The handle is exclusively owned by one caller for the duration of a run;
//! nothing in this crate shares it across threads.

use std::collections::HashMap;

use nalgebra::DVector;

use crate::error::KinetError;
use crate::model::expr::CompiledExpr;
use crate::model::OdeSystem;

/// One species tracked by the network.
#[derive(Debug, Clone)]
pub struct Species {
    /// Identifier as written in the model text.
    pub id: String,
    /// Initial concentration (defaults to 0.0 when unassigned).
    pub initial: f64,
}

/// One reaction: stoichiometry plus a bound kinetic rate law.
///
/// Either side may be empty (pure synthesis or pure degradation). The rate
/// law is an arbitrary expression and may reference species that do not
/// appear in the stoichiometry (modifiers).
#[derive(Debug, Clone)]
pub struct Reaction {
    /// Optional label (`J0:` prefix in the model text).
    pub id: Option<String>,
    /// (species index, stoichiometric coefficient) consumed by the reaction.
    pub reactants: Vec<(usize, f64)>,
    /// (species index, stoichiometric coefficient) produced by the reaction.
    pub products: Vec<(usize, f64)>,
    pub(crate) rate: CompiledExpr,
}

/// A derived output (`id := expr`), re-evaluated from state per output row.
#[derive(Debug, Clone)]
pub struct Observable {
    pub id: String,
    pub(crate) expr: CompiledExpr,
}

/// A loaded model: species, parameters, reactions, observables and the
/// current (mutable) concentration state.
#[derive(Debug, Clone)]
pub struct ReactionNetwork {
    pub(crate) name: Option<String>,
    pub(crate) species: Vec<Species>,
    pub(crate) parameter_names: Vec<String>,
    pub(crate) parameter_values: Vec<f64>,
    pub(crate) reactions: Vec<Reaction>,
    pub(crate) observables: Vec<Observable>,
    pub(crate) species_index: HashMap<String, usize>,
    pub(crate) parameter_index: HashMap<String, usize>,
    /// Current concentrations; starts at the initials and is overwritten
    /// with the final integration state after each run.
    pub(crate) state: DVector<f64>,
}

impl ReactionNetwork {
    /// Model name from the `model NAME` wrapper, if the text carried one.
    pub fn model_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Species identifiers in declaration (first-appearance) order.
    pub fn species_ids(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.id.as_str()).collect()
    }

    /// Global parameter identifiers in declaration order.
    pub fn parameter_ids(&self) -> Vec<&str> {
        self.parameter_names.iter().map(|p| p.as_str()).collect()
    }

    /// Observable (derived output) identifiers in declaration order.
    pub fn observable_ids(&self) -> Vec<&str> {
        self.observables.iter().map(|o| o.id.as_str()).collect()
    }

    /// Number of species (the ODE dimension).
    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    /// Number of reactions.
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Reset all concentrations to their initial values.
    ///
    /// Resetting and re-simulating with unchanged parameters reproduces the
    /// previous result table exactly.
    pub fn reset(&mut self) {
        for (slot, species) in self.state.iter_mut().zip(self.species.iter()) {
            *slot = species.initial;
        }
    }

    /// Current concentration of one species.
    pub fn concentration(&self, id: &str) -> Result<f64, KinetError> {
        self.species_index
            .get(id)
            .map(|&index| self.state[index])
            .ok_or_else(|| KinetError::UnknownSpecies(id.to_string()))
    }

    /// Current concentration vector, ordered like [`Self::species_ids`].
    pub fn concentrations(&self) -> &DVector<f64> {
        &self.state
    }

    /// Current value of one global parameter.
    pub fn parameter(&self, id: &str) -> Result<f64, KinetError> {
        self.parameter_index
            .get(id)
            .map(|&index| self.parameter_values[index])
            .ok_or_else(|| KinetError::UnknownParameter(id.to_string()))
    }

    /// Overwrite one global parameter value.
    pub fn set_parameter(&mut self, id: &str, value: f64) -> Result<(), KinetError> {
        match self.parameter_index.get(id) {
            Some(&index) => {
                self.parameter_values[index] = value;
                Ok(())
            }
            None => Err(KinetError::UnknownParameter(id.to_string())),
        }
    }

    /// Index of a species id, if the model defines it.
    pub(crate) fn species_slot(&self, id: &str) -> Option<usize> {
        self.species_index.get(id).copied()
    }

    /// Index of an observable id, if the model defines it.
    pub(crate) fn observable_slot(&self, id: &str) -> Option<usize> {
        self.observables.iter().position(|o| o.id == id)
    }

    /// Evaluate one observable at a given time point and state.
    pub(crate) fn eval_observable(&self, slot: usize, t: f64, y: &DVector<f64>) -> f64 {
        self.observables[slot]
            .expr
            .eval(t, y, &self.parameter_values)
    }

    /// Overwrite the current state (runner-internal: final state after a run).
    pub(crate) fn set_state(&mut self, state: DVector<f64>) {
        self.state = state;
    }
}

impl OdeSystem for ReactionNetwork {
    fn dim(&self) -> usize {
        self.species.len()
    }

    fn initial_state(&self) -> DVector<f64> {
        DVector::from_iterator(self.species.len(), self.species.iter().map(|s| s.initial))
    }

    fn rhs(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        // dy/dt = sum over reactions of rate * (products - reactants)
        let mut dy = DVector::zeros(self.species.len());
        for reaction in &self.reactions {
            let rate = reaction.rate.eval(t, y, &self.parameter_values);
            for &(index, coefficient) in &reaction.reactants {
                dy[index] -= coefficient * rate;
            }
            for &(index, coefficient) in &reaction.products {
                dy[index] += coefficient * rate;
            }
        }
        dy
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("reaction network")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
