use std::fmt;

/// A live value supplied by the host. Sensors report numbers, but direction
/// sensors may already report compass letters.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Number(f64),
    Text(String),
}

impl StateValue {
    /// Numeric view of the value; numeric strings count as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_nan() => Some(*n),
            Self::Number(_) => None,
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Snapshot of one entity for a single update cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub state: StateValue,
    pub active: bool,
}

impl EntityState {
    pub fn active(state: impl Into<StateValue>) -> Self {
        Self {
            state: state.into(),
            active: true,
        }
    }

    pub fn inactive() -> Self {
        Self {
            state: StateValue::Text(String::new()),
            active: false,
        }
    }
}
