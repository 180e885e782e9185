//! Formula parsing for R-style model specifications.
//!
//! Parses formulas like `"y ~ C(a) + C(b) + C(a):C(b)"` or `"y ~ C(a)*x"`
//! into a response and an ordered list of terms. Terms are ordered by
//! degree (main effects before interactions), keeping formula order within
//! a degree.

use std::collections::HashSet;
use std::fmt;

use crate::{Error, Result};

/// A single variable inside a term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Factor {
    /// Column name in the dataset
    pub name: String,
    /// Whether the variable is treated as categorical (`C(name)`)
    pub categorical: bool,
}

impl Factor {
    fn label(&self) -> String {
        if self.categorical {
            format!("C({})", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A model term: one factor for a main effect, several for an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub factors: Vec<Factor>,
}

impl Term {
    /// Canonical label, e.g. `C(a):C(b)`
    pub fn label(&self) -> String {
        self.factors
            .iter()
            .map(Factor::label)
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Number of factors in the term
    pub fn degree(&self) -> usize {
        self.factors.len()
    }

    /// Whether this term is a strict superset of `other`
    ///
    /// `C(a):C(b)` contains `C(a)`; a term does not contain itself.
    pub fn contains(&self, other: &Term) -> bool {
        self.degree() > other.degree() && self.contains_all(other)
    }

    fn same_variables(&self, other: &Term) -> bool {
        self.degree() == other.degree() && self.contains_all(other)
    }

    fn contains_all(&self, other: &Term) -> bool {
        other
            .factors
            .iter()
            .all(|f| self.factors.iter().any(|g| g.name == f.name))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Result of parsing a formula
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    /// The formula as written
    pub source: String,
    /// Response variable name
    pub response: String,
    /// Model terms, excluding the intercept
    pub terms: Vec<Term>,
    /// Whether the model includes an intercept
    pub has_intercept: bool,
}

impl Formula {
    /// Parse a formula string into structured components.
    ///
    /// Handles:
    /// - Main effects: `x`, `C(cat)`
    /// - Interactions: `a:b`, and `a*b` (expands to `a + b + a:b`)
    /// - Intercept removal: `0 + ...` or `... - 1`
    pub fn parse(formula: &str) -> Result<Self> {
        let parts: Vec<&str> = formula.split('~').collect();
        if parts.len() != 2 {
            return Err(Error::formula(formula, "must contain exactly one '~'"));
        }

        let response = parts[0].trim();
        if response.is_empty() {
            return Err(Error::formula(formula, "missing response variable"));
        }
        if !is_identifier(response) {
            return Err(Error::formula(
                formula,
                format!("response '{response}' is not a plain column name"),
            ));
        }

        let mut rhs = parts[1].trim().to_string();
        let mut has_intercept = true;

        if let Some(rest) = rhs.strip_prefix('0') {
            let rest = rest.trim_start();
            if rest.is_empty() || rest.starts_with('+') {
                has_intercept = false;
                rhs = rest.trim_start_matches('+').trim().to_string();
            }
        }
        let compact: String = rhs.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(rest) = compact.strip_suffix("-1") {
            has_intercept = false;
            rhs = rest.trim_end_matches('+').to_string();
        }

        if rhs.trim().is_empty() && has_intercept {
            return Err(Error::formula(formula, "empty right-hand side"));
        }

        let categorical_vars = find_categorical(formula, &rhs)?;

        let mut terms: Vec<Term> = Vec::new();
        for raw in split_top_level(formula, &rhs, '+')? {
            if raw == "1" {
                continue;
            }
            for term in expand_term(formula, &raw, &categorical_vars)? {
                if !terms.iter().any(|t| t.same_variables(&term)) {
                    terms.push(term);
                }
            }
        }

        // Stable: keeps formula order within a degree
        terms.sort_by_key(Term::degree);

        Ok(Self {
            source: formula.to_string(),
            response: response.to_string(),
            terms,
            has_intercept,
        })
    }

    /// Every distinct variable referenced on the right-hand side
    pub fn predictors(&self) -> Vec<&Factor> {
        let mut seen = HashSet::new();
        self.terms
            .iter()
            .flat_map(|t| t.factors.iter())
            .filter(|f| seen.insert(f.name.as_str()))
            .collect()
    }

    /// Whether `name` appears as its own main-effect term
    pub fn has_main_effect(&self, name: &str) -> bool {
        self.terms
            .iter()
            .any(|t| t.degree() == 1 && t.factors[0].name == name)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// Collect every `C(...)` marker on the right-hand side
fn find_categorical(formula: &str, rhs: &str) -> Result<HashSet<String>> {
    let mut categorical_vars = HashSet::new();
    let mut pos = 0;
    while let Some(start) = rhs[pos..].find("C(") {
        let abs_start = pos + start + 2;
        match rhs[abs_start..].find(')') {
            Some(end) => {
                categorical_vars.insert(rhs[abs_start..abs_start + end].trim().to_string());
                pos = abs_start + end + 1;
            }
            None => return Err(Error::formula(formula, "unbalanced parentheses")),
        }
    }
    Ok(categorical_vars)
}

/// Split on `sep`, respecting parentheses
fn split_top_level(formula: &str, text: &str, sep: char) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::formula(formula, "unbalanced parentheses"));
                }
                current.push(c);
            }
            c if c == sep && depth == 0 => {
                parts.push(std::mem::take(&mut current).trim().to_string());
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(Error::formula(formula, "unbalanced parentheses"));
    }
    parts.push(current.trim().to_string());

    if parts.iter().any(String::is_empty) {
        return Err(Error::formula(formula, format!("empty term around '{sep}'")));
    }
    Ok(parts)
}

fn parse_factor(formula: &str, raw: &str, categorical_vars: &HashSet<String>) -> Result<Factor> {
    let raw = raw.trim();
    let (name, marked) = match raw.strip_prefix("C(").and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (inner.trim(), true),
        None => (raw, false),
    };
    if !is_identifier(name) {
        return Err(Error::formula(formula, format!("unsupported term '{raw}'")));
    }
    Ok(Factor {
        name: name.to_string(),
        categorical: marked || categorical_vars.contains(name),
    })
}

/// Expand `a*b` into all of its sub-interactions; `a:b` stays a single term
fn expand_term(formula: &str, raw: &str, categorical_vars: &HashSet<String>) -> Result<Vec<Term>> {
    if raw.contains('*') {
        let factors = split_top_level(formula, raw, '*')?
            .iter()
            .map(|f| parse_factor(formula, f, categorical_vars))
            .collect::<Result<Vec<_>>>()?;
        if factors.len() > 16 {
            return Err(Error::formula(formula, "too many factors in one product"));
        }

        let mut terms: Vec<Term> = (1u32..(1 << factors.len()))
            .map(|mask| Term {
                factors: factors
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, f)| f.clone())
                    .collect(),
            })
            .collect();
        terms.sort_by_key(Term::degree);
        return Ok(terms);
    }

    let factors = split_top_level(formula, raw, ':')?
        .iter()
        .map(|f| parse_factor(formula, f, categorical_vars))
        .collect::<Result<Vec<_>>>()?;
    Ok(vec![Term { factors }])
}
