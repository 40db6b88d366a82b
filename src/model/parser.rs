//! Model loader for an Antimony-subset reaction syntax
//!
//! Parses a model definition (inline text or file contents) into a
//! [`ReactionNetwork`] handle. A parse failure is always fatal to the run;
//! there are no retries.
//!
//! # Supported syntax
//!
//! Statements are separated by `;` and newlines. `//` and `#` start
//! line comments. An optional `model NAME` / `end` pair may wrap the body.
//!
//! ```text
//! // reaction followed by its kinetic rate law
//! J0: S1 -> S2; k1*S1
//!
//! // synthesis and degradation (either side of '->' may be empty)
//! production:  -> A_beta; k_prod
//! elimination: C -> ; ke * C
//!
//! // assignments: species initial when the id participates in a
//! // reaction, global parameter otherwise
//! k1 = 0.1
//! S1 = 10
//!
//! // observable rule, re-evaluated from state at every output row
//! BGTS := bgts_max * VWD / (vwd50 + VWD)
//! ```
//!
//! Every reaction must be immediately followed by its rate-law clause,
//! matching the Antimony convention `reaction; rate`.

use std::collections::HashMap;
use std::path::Path;

use nalgebra::DVector;
use tracing::{debug, info};

use crate::error::KinetError;
use crate::model::expr::{parse_expression, SymbolTable};
use crate::model::network::{Observable, Reaction, ReactionNetwork, Species};

// =================================================================================================
// Public API
// =================================================================================================

/// Load a reaction network from model text.
///
/// # Errors
///
/// Returns [`KinetError::ModelLoad`] when the text cannot be parsed:
/// malformed statements, a reaction without a rate law, or an identifier in
/// a rate law that is neither a species nor a parameter.
///
/// # Example
///
/// ```
/// use kinet_rs::model::load_network;
///
/// let network = load_network("S1 -> S2; k1*S1; k1 = 0.1; S1 = 10").unwrap();
/// assert_eq!(network.species_ids(), vec!["S1", "S2"]);
/// assert_eq!(network.parameter_ids(), vec!["k1"]);
/// ```
pub fn load_network(source: &str) -> Result<ReactionNetwork, KinetError> {
    let statements = split_statements(source);
    let items = classify_statements(&statements)?;
    build_network(items)
}

/// Load a reaction network from a UTF-8 model file.
///
/// # Errors
///
/// Returns [`KinetError::Io`] when the file cannot be read and
/// [`KinetError::ModelLoad`] when its contents cannot be parsed.
pub fn load_network_file(path: impl AsRef<Path>) -> Result<ReactionNetwork, KinetError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading model file");
    let source = std::fs::read_to_string(path)?;
    load_network(&source)
}

// =================================================================================================
// Statement splitting and classification
// =================================================================================================

/// Strip comments and split the source into trimmed, non-empty statements.
fn split_statements(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    for line in source.lines() {
        // Comments run to end of line and are removed before splitting,
        // so ';' inside a comment never separates statements.
        let mut code = line;
        if let Some(pos) = code.find("//") {
            code = &code[..pos];
        }
        if let Some(pos) = code.find('#') {
            code = &code[..pos];
        }
        for piece in code.split(';') {
            let piece = piece.trim();
            if !piece.is_empty() {
                statements.push(piece.to_string());
            }
        }
    }
    statements
}

/// One classified model statement.
#[derive(Debug)]
enum Item {
    ModelName(String),
    Reaction {
        label: Option<String>,
        reactants: Vec<(String, f64)>,
        products: Vec<(String, f64)>,
        rate_src: String,
    },
    Assignment {
        id: String,
        expr_src: String,
    },
    Rule {
        id: String,
        expr_src: String,
    },
}

fn classify_statements(statements: &[String]) -> Result<Vec<Item>, KinetError> {
    let mut items = Vec::new();
    let mut i = 0;

    while i < statements.len() {
        let stmt = &statements[i];

        if let Some(rest) = stmt.strip_prefix("model ") {
            let name = rest.trim();
            if !is_identifier(name) {
                return Err(KinetError::ModelLoad(format!(
                    "invalid model name '{}'",
                    name
                )));
            }
            items.push(Item::ModelName(name.to_string()));
            i += 1;
        } else if stmt == "end" {
            i += 1;
        } else if stmt.contains("->") {
            // The statement after a reaction is its rate law
            let rate_src = match statements.get(i + 1) {
                Some(next) if !next.contains("->") && !next.contains('=') => next.clone(),
                _ => {
                    return Err(KinetError::ModelLoad(format!(
                        "reaction '{}' is not followed by a rate law",
                        stmt
                    )));
                }
            };
            let (label, reactants, products) = parse_reaction_header(stmt)?;
            items.push(Item::Reaction {
                label,
                reactants,
                products,
                rate_src,
            });
            i += 2;
        } else if let Some((id, expr_src)) = split_once_trimmed(stmt, ":=") {
            require_identifier(&id, stmt)?;
            items.push(Item::Rule { id, expr_src });
            i += 1;
        } else if let Some((id, expr_src)) = split_once_trimmed(stmt, "=") {
            require_identifier(&id, stmt)?;
            items.push(Item::Assignment { id, expr_src });
            i += 1;
        } else {
            return Err(KinetError::ModelLoad(format!(
                "unrecognized statement '{}'",
                stmt
            )));
        }
    }

    Ok(items)
}

fn split_once_trimmed(stmt: &str, separator: &str) -> Option<(String, String)> {
    stmt.split_once(separator)
        .map(|(lhs, rhs)| (lhs.trim().to_string(), rhs.trim().to_string()))
}

fn require_identifier(id: &str, stmt: &str) -> Result<(), KinetError> {
    if is_identifier(id) {
        Ok(())
    } else {
        Err(KinetError::ModelLoad(format!(
            "invalid identifier '{}' in statement '{}'",
            id, stmt
        )))
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =================================================================================================
// Reaction header parsing
// =================================================================================================

type ReactionHeader = (Option<String>, Vec<(String, f64)>, Vec<(String, f64)>);

/// Parse `[label:] reactants -> products`.
fn parse_reaction_header(stmt: &str) -> Result<ReactionHeader, KinetError> {
    let arrow = stmt.find("->").expect("caller checked for '->'");

    // Optional "label:" prefix, only when the colon precedes the arrow
    let (label, body) = match stmt.find(':') {
        Some(colon) if colon < arrow => {
            let label = stmt[..colon].trim();
            if !is_identifier(label) {
                return Err(KinetError::ModelLoad(format!(
                    "invalid reaction label '{}' in '{}'",
                    label, stmt
                )));
            }
            (Some(label.to_string()), stmt[colon + 1..].trim())
        }
        _ => (None, stmt),
    };

    let mut sides = body.split("->");
    let lhs = sides.next().unwrap_or("");
    let rhs = sides.next().unwrap_or("");
    if sides.next().is_some() {
        return Err(KinetError::ModelLoad(format!(
            "reaction '{}' has more than one '->'",
            stmt
        )));
    }

    let reactants = parse_side(lhs, stmt)?;
    let products = parse_side(rhs, stmt)?;
    if reactants.is_empty() && products.is_empty() {
        return Err(KinetError::ModelLoad(format!(
            "reaction '{}' has no participants",
            stmt
        )));
    }

    Ok((label, reactants, products))
}

/// Parse one side of a reaction: `2 A + B` -> [("A", 2.0), ("B", 1.0)].
///
/// An empty side is valid and denotes synthesis (` -> S`) or
/// degradation (`S -> `).
fn parse_side(side: &str, stmt: &str) -> Result<Vec<(String, f64)>, KinetError> {
    let side = side.trim();
    if side.is_empty() {
        return Ok(Vec::new());
    }

    let mut terms = Vec::new();
    for term in side.split('+') {
        let term = term.trim();
        if term.is_empty() {
            return Err(KinetError::ModelLoad(format!(
                "empty species term in reaction '{}'",
                stmt
            )));
        }

        // Coefficient forms: "2 A", "2*A" or bare "A"
        let normalized = term.replace('*', " ");
        let mut parts = normalized.split_whitespace();
        let first = parts.next().expect("term is non-empty");

        let (coefficient, id) = match first.parse::<f64>() {
            Ok(value) => {
                let id = parts.next().ok_or_else(|| {
                    KinetError::ModelLoad(format!(
                        "coefficient without species in reaction '{}'",
                        stmt
                    ))
                })?;
                (value, id)
            }
            Err(_) => (1.0, first),
        };

        if parts.next().is_some() {
            return Err(KinetError::ModelLoad(format!(
                "malformed species term '{}' in reaction '{}'",
                term, stmt
            )));
        }
        if !is_identifier(id) {
            return Err(KinetError::ModelLoad(format!(
                "invalid species id '{}' in reaction '{}'",
                id, stmt
            )));
        }
        if !(coefficient.is_finite() && coefficient > 0.0) {
            return Err(KinetError::ModelLoad(format!(
                "invalid stoichiometric coefficient in term '{}' of reaction '{}'",
                term, stmt
            )));
        }

        terms.push((id.to_string(), coefficient));
    }

    Ok(terms)
}

// =================================================================================================
// Network assembly
// =================================================================================================

fn build_network(items: Vec<Item>) -> Result<ReactionNetwork, KinetError> {
    // Pass 1: the species set is defined by reaction participation,
    // in first-appearance order.
    let mut species: Vec<Species> = Vec::new();
    let mut species_index: HashMap<String, usize> = HashMap::new();
    for item in &items {
        if let Item::Reaction {
            reactants,
            products,
            ..
        } = item
        {
            for (id, _) in reactants.iter().chain(products.iter()) {
                if !species_index.contains_key(id) {
                    species_index.insert(id.clone(), species.len());
                    species.push(Species {
                        id: id.clone(),
                        initial: 0.0,
                    });
                }
            }
        }
    }

    if species.is_empty() {
        return Err(KinetError::ModelLoad(
            "model defines no reactions".to_string(),
        ));
    }

    // Pass 2: assignments, in textual order. An id that participates in a
    // reaction is a species initial; anything else is a global parameter.
    // Right-hand sides are constant-folded against parameters defined so far.
    let mut name = None;
    let mut parameter_names: Vec<String> = Vec::new();
    let mut parameter_values: Vec<f64> = Vec::new();
    let mut parameter_index: HashMap<String, usize> = HashMap::new();
    let mut env: HashMap<String, f64> = HashMap::new();

    for item in &items {
        match item {
            Item::ModelName(model_name) => {
                name = Some(model_name.clone());
            }
            Item::Assignment { id, expr_src } => {
                let value = parse_expression(expr_src)?.eval_const(&env).map_err(|e| {
                    KinetError::ModelLoad(format!("in assignment '{} = {}': {}", id, expr_src, e))
                })?;
                if let Some(&slot) = species_index.get(id) {
                    species[slot].initial = value;
                } else {
                    match parameter_index.get(id) {
                        Some(&slot) => parameter_values[slot] = value,
                        None => {
                            parameter_index.insert(id.clone(), parameter_names.len());
                            parameter_names.push(id.clone());
                            parameter_values.push(value);
                        }
                    }
                    env.insert(id.clone(), value);
                }
            }
            _ => {}
        }
    }

    // Pass 3: bind rate laws and observable rules now that every symbol
    // is known. An unresolved identifier fails the load here.
    let symbols = SymbolTable {
        species: &species_index,
        parameters: &parameter_index,
    };

    let mut reactions: Vec<Reaction> = Vec::new();
    let mut observables: Vec<Observable> = Vec::new();

    for item in &items {
        match item {
            Item::Reaction {
                label,
                reactants,
                products,
                rate_src,
            } => {
                let rate = parse_expression(rate_src)?.bind(&symbols).map_err(|e| {
                    KinetError::ModelLoad(format!("in rate law '{}': {}", rate_src, e))
                })?;
                reactions.push(Reaction {
                    id: label.clone(),
                    reactants: resolve_side(reactants, &species_index),
                    products: resolve_side(products, &species_index),
                    rate,
                });
            }
            Item::Rule { id, expr_src } => {
                if species_index.contains_key(id) || parameter_index.contains_key(id) {
                    return Err(KinetError::ModelLoad(format!(
                        "rule id '{}' collides with a species or parameter",
                        id
                    )));
                }
                if observables.iter().any(|o| o.id == *id) {
                    return Err(KinetError::ModelLoad(format!(
                        "duplicate rule for '{}'",
                        id
                    )));
                }
                let expr = parse_expression(expr_src)?.bind(&symbols).map_err(|e| {
                    KinetError::ModelLoad(format!("in rule '{} := {}': {}", id, expr_src, e))
                })?;
                observables.push(Observable {
                    id: id.clone(),
                    expr,
                });
            }
            _ => {}
        }
    }

    let state = DVector::from_iterator(species.len(), species.iter().map(|s| s.initial));

    let network = ReactionNetwork {
        name,
        species,
        parameter_names,
        parameter_values,
        reactions,
        observables,
        species_index,
        parameter_index,
        state,
    };

    info!(
        model = network.name.as_deref().unwrap_or("unnamed"),
        species = ?network.species_ids(),
        parameters = ?network.parameter_ids(),
        "model loaded"
    );
    debug!(
        reactions = network.n_reactions(),
        observables = network.observables.len(),
        "network assembled"
    );

    Ok(network)
}

fn resolve_side(side: &[(String, f64)], index: &HashMap<String, usize>) -> Vec<(usize, f64)> {
    side.iter()
        .map(|(id, coefficient)| (index[id], *coefficient))
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================
