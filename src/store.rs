//! Named demo parameters with declared ranges and synchronous change notification.
//!
//! Every tweakable value of a demo (shader uniforms, rule speeds, debug toggles)
//! lives here. Consumers never hold the values themselves; they register a
//! [`Binding`] and get told about every write.

use std::fmt;

use glam::Vec3;
use thiserror::Error;

/// Kind of value a parameter holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Bool,
    Vec3,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Vec3 => "vec3",
        };
        f.write_str(name)
    }
}

/// A parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Bool(bool),
    Vec3(Vec3),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Vec3(_) => ParamKind::Vec3,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            ParamValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            ParamValue::Float(v) => v.is_finite(),
            ParamValue::Bool(_) => true,
            ParamValue::Vec3(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v:.3}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Vec3(v) => write!(f, "({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
        }
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Vec3> for ParamValue {
    fn from(value: Vec3) -> Self {
        ParamValue::Vec3(value)
    }
}

/// Inclusive range a parameter is clamped to. Vector ranges clamp per component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamRange {
    Float { min: f32, max: f32 },
    Vec3 { min: Vec3, max: Vec3 },
}

impl ParamRange {
    pub fn new(min: f32, max: f32) -> Self {
        ParamRange::Float { min, max }
    }

    pub fn vec3(min: Vec3, max: Vec3) -> Self {
        ParamRange::Vec3 { min, max }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            ParamRange::Float { .. } => ParamKind::Float,
            ParamRange::Vec3 { .. } => ParamKind::Vec3,
        }
    }

    /// Widest extent of the range (largest component span for vectors)
    pub fn span(&self) -> f32 {
        match self {
            ParamRange::Float { min, max } => max - min,
            ParamRange::Vec3 { min, max } => (*max - *min).max_element(),
        }
    }

    fn validate(&self, name: &str) -> Result<(), ParamError> {
        let invalid = |min: f32, max: f32| ParamError::InvalidRange {
            name: name.to_string(),
            min,
            max,
        };
        match *self {
            ParamRange::Float { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(invalid(min, max));
                }
            }
            ParamRange::Vec3 { min, max } => {
                for axis in 0..3 {
                    let (lo, hi) = (min[axis], max[axis]);
                    if !lo.is_finite() || !hi.is_finite() || lo > hi {
                        return Err(invalid(lo, hi));
                    }
                }
            }
        }
        Ok(())
    }

    /// Clamp a value of matching kind; other kinds pass through untouched.
    fn clamp(&self, value: ParamValue) -> ParamValue {
        match (self, value) {
            (ParamRange::Float { min, max }, ParamValue::Float(v)) => {
                ParamValue::Float(v.clamp(*min, *max))
            }
            (ParamRange::Vec3 { min, max }, ParamValue::Vec3(v)) => {
                ParamValue::Vec3(v.clamp(*min, *max))
            }
            (_, other) => other,
        }
    }
}

/// Errors raised while defining or writing parameters
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("parameter `{name}` declares an invalid range [{min}, {max}]")]
    InvalidRange { name: String, min: f32, max: f32 },

    #[error("parameter `{0}` is already defined")]
    Duplicate(String),

    #[error("unknown parameter `{0}`")]
    Unknown(String),

    #[error("parameter `{name}` holds {expected} values, got {found}")]
    TypeMismatch {
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },

    #[error("parameter `{0}` rejects non-finite values")]
    NonFinite(String),
}

/// Consumer of parameter changes (shader uniforms, debug displays, ...)
pub trait Binding {
    fn changed(&mut self, name: &str, value: &ParamValue);
}

impl<F> Binding for F
where
    F: FnMut(&str, &ParamValue),
{
    fn changed(&mut self, name: &str, value: &ParamValue) {
        self(name, value)
    }
}

#[derive(Debug, Clone)]
struct Parameter {
    name: String,
    value: ParamValue,
    range: Option<ParamRange>,
}

struct Subscription {
    /// `None` subscribes to every parameter
    filter: Option<String>,
    binding: Box<dyn Binding>,
}

impl Subscription {
    fn wants(&self, name: &str) -> bool {
        self.filter.as_deref().map_or(true, |filter| filter == name)
    }
}

/// Store of named parameters, in definition order
#[derive(Default)]
pub struct ParameterStore {
    params: Vec<Parameter>,
    subscriptions: Vec<Subscription>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new parameter.
    ///
    /// Fails on duplicate names and malformed ranges. An initial value outside
    /// the range is clamped.
    pub fn define(
        &mut self,
        name: &str,
        initial: impl Into<ParamValue>,
        range: Option<ParamRange>,
    ) -> Result<ParamValue, ParamError> {
        let initial = initial.into();
        if self.find(name).is_some() {
            return Err(ParamError::Duplicate(name.to_string()));
        }
        if !initial.is_finite() {
            return Err(ParamError::NonFinite(name.to_string()));
        }

        if let Some(range) = &range {
            if range.kind() != initial.kind() {
                return Err(ParamError::TypeMismatch {
                    name: name.to_string(),
                    expected: initial.kind(),
                    found: range.kind(),
                });
            }
            range.validate(name)?;
        }

        let value = range.map_or(initial, |r| r.clamp(initial));
        if value != initial {
            log::debug!("parameter `{name}` initial value {initial} clamped to {value}");
        }

        self.params.push(Parameter {
            name: name.to_string(),
            value,
            range,
        });
        Ok(value)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.find(name).map(|p| p.value)
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|v| v.as_f32())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    pub fn get_vec3(&self, name: &str) -> Option<Vec3> {
        self.get(name).and_then(|v| v.as_vec3())
    }

    pub fn range(&self, name: &str) -> Option<ParamRange> {
        self.find(name).and_then(|p| p.range)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Parameter names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Write a parameter, clamping to its range.
    ///
    /// Every matching binding is notified before this returns. Returns the
    /// value actually stored.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<ParamValue, ParamError> {
        let value = value.into();
        let param = self
            .params
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))?;

        if param.value.kind() != value.kind() {
            return Err(ParamError::TypeMismatch {
                name: name.to_string(),
                expected: param.value.kind(),
                found: value.kind(),
            });
        }
        if !value.is_finite() {
            return Err(ParamError::NonFinite(name.to_string()));
        }

        let stored = param.range.map_or(value, |r| r.clamp(value));
        param.value = stored;

        for subscription in self.subscriptions.iter_mut().filter(|s| s.wants(name)) {
            subscription.binding.changed(name, &stored);
        }
        Ok(stored)
    }

    /// Bind a consumer to one parameter. It is replayed with the current value.
    pub fn bind(&mut self, name: &str, binding: impl Binding + 'static) -> Result<(), ParamError> {
        if !self.contains(name) {
            return Err(ParamError::Unknown(name.to_string()));
        }
        self.subscribe(Some(name.to_string()), Box::new(binding));
        Ok(())
    }

    /// Bind a consumer to every parameter, current and future. It is replayed
    /// with all current values.
    pub fn bind_all(&mut self, binding: impl Binding + 'static) {
        self.subscribe(None, Box::new(binding));
    }

    fn subscribe(&mut self, filter: Option<String>, mut binding: Box<dyn Binding>) {
        let subscription_wants = |name: &str| filter.as_deref().map_or(true, |f| f == name);
        for param in self.params.iter().filter(|p| subscription_wants(&p.name)) {
            binding.changed(&param.name, &param.value);
        }
        self.subscriptions.push(Subscription { filter, binding });
    }

    fn find(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }
}
