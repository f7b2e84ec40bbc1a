//! Hyperparameter variants owned by a configuration space.
//!
//! Three kinds exist: continuous parameters over a bounded numeric range
//! (integer or real valued, optionally on a log scale and optionally
//! quantized), categorical parameters over an ordered set of choices, and
//! constants. Constructors validate the local invariants; anything touching
//! more than one parameter is checked by the space itself.

use smol_str::SmolStr;

use super::error::SpaceError;

/// A named, typed tunable parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Hyperparameter {
    Continuous(Continuous),
    Categorical(Categorical),
    Constant(Constant),
}

impl Hyperparameter {
    /// The parameter's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Continuous(p) => &p.name,
            Self::Categorical(p) => &p.name,
            Self::Constant(p) => &p.name,
        }
    }
}

impl From<Continuous> for Hyperparameter {
    fn from(p: Continuous) -> Self {
        Self::Continuous(p)
    }
}

impl From<Categorical> for Hyperparameter {
    fn from(p: Categorical) -> Self {
        Self::Categorical(p)
    }
}

impl From<Constant> for Hyperparameter {
    fn from(p: Constant) -> Self {
        Self::Constant(p)
    }
}

/// A numeric parameter over the closed range `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Continuous {
    name: SmolStr,
    lower: f64,
    upper: f64,
    default: f64,
    integer: bool,
    log: bool,
    quantization: Option<f64>,
}

impl Continuous {
    /// Create a real-valued parameter. Fails unless
    /// `lower < upper` and `lower <= default <= upper`.
    pub fn new(
        name: impl Into<SmolStr>,
        lower: f64,
        upper: f64,
        default: f64,
    ) -> Result<Self, SpaceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpaceError::validation("hyperparameter name must not be empty"));
        }
        if !(lower < upper) {
            return Err(SpaceError::validation(format!(
                "illegal range for '{name}': lower bound {lower} must be below upper bound {upper}"
            )));
        }
        if !(lower <= default && default <= upper) {
            return Err(SpaceError::validation(format!(
                "default {default} of '{name}' lies outside [{lower}, {upper}]"
            )));
        }
        Ok(Self {
            name,
            lower,
            upper,
            default,
            integer: false,
            log: false,
            quantization: None,
        })
    }

    /// Mark the parameter as integer valued.
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Mark the parameter as log-scaled.
    pub fn logscale(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set a quantization step.
    pub fn quantized(mut self, q: f64) -> Self {
        self.quantization = Some(q);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn default(&self) -> f64 {
        self.default
    }

    pub fn is_integer(&self) -> bool {
        self.integer
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    pub fn quantization(&self) -> Option<f64> {
        self.quantization
    }
}

/// A parameter taking one of an ordered set of distinct choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorical {
    name: SmolStr,
    choices: Vec<SmolStr>,
    default: SmolStr,
}

impl Categorical {
    /// Create a categorical parameter. The choice list must be non-empty and
    /// free of duplicates, and the default must be one of the choices.
    pub fn new<I, S>(
        name: impl Into<SmolStr>,
        choices: I,
        default: impl Into<SmolStr>,
    ) -> Result<Self, SpaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(SpaceError::validation("hyperparameter name must not be empty"));
        }
        let choices: Vec<SmolStr> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(SpaceError::validation(format!(
                "categorical '{name}' needs at least one choice"
            )));
        }
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].contains(choice) {
                return Err(SpaceError::validation(format!(
                    "categorical '{name}' lists choice '{choice}' twice"
                )));
            }
        }
        let default = default.into();
        if !choices.contains(&default) {
            return Err(SpaceError::validation(format!(
                "default '{default}' of '{name}' is not one of its choices"
            )));
        }
        Ok(Self {
            name,
            choices,
            default,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choices(&self) -> &[SmolStr] {
        &self.choices
    }

    pub fn default(&self) -> &str {
        &self.default
    }
}

/// A parameter fixed to a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: SmolStr,
    value: SmolStr,
}

impl Constant {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Result<Self, SpaceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SpaceError::validation("hyperparameter name must not be empty"));
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
