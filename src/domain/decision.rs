//! Decision record produced by one evaluation.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

/// Either one instrument or an equal-weight allocation across several.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Symbol(String),
    Allocation(BTreeMap<String, f64>),
}

impl Target {
    /// Equal-weight allocation; duplicate symbols collapse to one entry.
    /// Returns `None` for an empty symbol list.
    pub fn equal_weight<S: AsRef<str>>(symbols: &[S]) -> Option<Target> {
        let unique: std::collections::BTreeSet<&str> =
            symbols.iter().map(|s| s.as_ref()).collect();
        if unique.is_empty() {
            return None;
        }
        let weight = 1.0 / unique.len() as f64;
        Some(Target::Allocation(
            unique.into_iter().map(|s| (s.to_string(), weight)).collect(),
        ))
    }

    /// Symbols held by this target, in sorted order for allocations.
    pub fn symbols(&self) -> Vec<&str> {
        match self {
            Target::Symbol(s) => vec![s.as_str()],
            Target::Allocation(weights) => weights.keys().map(String::as_str).collect(),
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Target::Symbol(s) => Some(s),
            Target::Allocation(_) => None,
        }
    }

    pub fn as_allocation(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            Target::Symbol(_) => None,
            Target::Allocation(weights) => Some(weights),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Symbol(s) => write!(f, "{}", s),
            Target::Allocation(weights) => {
                let parts: Vec<String> = weights
                    .iter()
                    .map(|(s, w)| format!("{}={:.4}", s, w))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub target: Target,
    pub action: Action,
    pub reasoning: String,
}

impl Decision {
    pub fn buy(symbol: &str, reasoning: impl Into<String>) -> Self {
        Decision {
            target: Target::Symbol(symbol.to_string()),
            action: Action::Buy,
            reasoning: reasoning.into(),
        }
    }

    pub fn buy_target(target: Target, reasoning: impl Into<String>) -> Self {
        Decision {
            target,
            action: Action::Buy,
            reasoning: reasoning.into(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.target)
    }
}
