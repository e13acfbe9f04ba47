use std::collections::BTreeMap;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::schema::{ControlKind, EffectDescriptor, EffectId, ParamValue, Schema};

/// Current values of one effect's controls, keyed by control key.
///
/// A `ParamSet` obtained from an [`EffectStateStore`] always holds exactly the keys its
/// effect declares.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    /// Build the default set for an effect.
    pub fn defaults_for(desc: &EffectDescriptor) -> Self {
        let values = desc
            .controls
            .iter()
            .map(|c| (c.key.to_owned(), c.default.clone()))
            .collect();
        Self { values }
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate `(key, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of controls held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` for effects without controls.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert_unchecked(&mut self, key: &str, value: ParamValue) {
        self.values.insert(key.to_owned(), value);
    }

    fn require(&self, key: &str) -> RasterFxResult<&ParamValue> {
        self.values
            .get(key)
            .ok_or_else(|| RasterFxError::validation(format!("missing parameter '{key}'")))
    }

    /// Numeric value of a range control.
    pub fn number(&self, key: &str) -> RasterFxResult<f64> {
        match self.require(key)? {
            ParamValue::Number(v) => Ok(*v),
            other => Err(wrong_kind(key, "number", other)),
        }
    }

    /// Selected option of a choice control.
    pub fn choice(&self, key: &str) -> RasterFxResult<&str> {
        match self.require(key)? {
            ParamValue::Choice(v) => Ok(v),
            other => Err(wrong_kind(key, "choice", other)),
        }
    }

    /// Value of a boolean control.
    pub fn flag(&self, key: &str) -> RasterFxResult<bool> {
        match self.require(key)? {
            ParamValue::Flag(v) => Ok(*v),
            other => Err(wrong_kind(key, "boolean", other)),
        }
    }

    /// Value of a color control.
    pub fn color(&self, key: &str) -> RasterFxResult<Rgb8> {
        match self.require(key)? {
            ParamValue::Color(v) => Ok(*v),
            other => Err(wrong_kind(key, "color", other)),
        }
    }
}

fn wrong_kind(key: &str, expected: &str, got: &ParamValue) -> RasterFxError {
    RasterFxError::validation(format!(
        "parameter '{key}' must be a {expected}, got {}",
        got.kind_name()
    ))
}

/// Per-effect current values plus their defaults, derived from the schema.
#[derive(Clone, Debug)]
pub struct EffectStateStore {
    schema: &'static Schema,
    defaults: BTreeMap<EffectId, ParamSet>,
    params: BTreeMap<EffectId, ParamSet>,
}

impl EffectStateStore {
    /// Create a store holding the defaults of every effect in `schema`.
    pub fn new(schema: &'static Schema) -> Self {
        let defaults: BTreeMap<EffectId, ParamSet> = schema
            .effects()
            .iter()
            .map(|e| (e.id, ParamSet::defaults_for(e)))
            .collect();
        Self {
            schema,
            params: defaults.clone(),
            defaults,
        }
    }

    /// Schema backing this store.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Current values for `effect`.
    pub fn params(&self, effect: EffectId) -> RasterFxResult<&ParamSet> {
        self.params
            .get(&effect)
            .ok_or_else(|| RasterFxError::validation(format!("no parameters for '{effect}'")))
    }

    /// Default values for `effect`.
    pub fn defaults(&self, effect: EffectId) -> RasterFxResult<&ParamSet> {
        self.defaults
            .get(&effect)
            .ok_or_else(|| RasterFxError::validation(format!("no defaults for '{effect}'")))
    }

    /// Set one control after validating it against its descriptor.
    ///
    /// The store is left unchanged when validation fails.
    pub fn set(&mut self, effect: EffectId, key: &str, value: ParamValue) -> RasterFxResult<()> {
        let desc = self.schema.effect(effect)?;
        let control = desc.control(key).ok_or_else(|| {
            RasterFxError::validation(format!("effect '{effect}' has no control '{key}'"))
        })?;
        control.validate(&value)?;
        let set = self
            .params
            .get_mut(&effect)
            .ok_or_else(|| RasterFxError::validation(format!("no parameters for '{effect}'")))?;
        set.insert_unchecked(control.key, value);
        Ok(())
    }

    /// Parse `raw` according to the control's kind, then [`set`](Self::set) it.
    pub fn set_str(&mut self, effect: EffectId, key: &str, raw: &str) -> RasterFxResult<()> {
        let desc = self.schema.effect(effect)?;
        let control = desc.control(key).ok_or_else(|| {
            RasterFxError::validation(format!("effect '{effect}' has no control '{key}'"))
        })?;
        let value = ParamValue::parse_for(&control.kind, raw)?;
        self.set(effect, key, value)
    }

    /// Apply a JSON object of `{ key: value }` overrides. Stops at the first invalid entry.
    pub fn apply_json(&mut self, effect: EffectId, json: &serde_json::Value) -> RasterFxResult<()> {
        let obj = json.as_object().ok_or_else(|| {
            RasterFxError::validation("parameter overrides must be a JSON object")
        })?;
        for (key, raw) in obj {
            let desc = self.schema.effect(effect)?;
            let control = desc.control(key).ok_or_else(|| {
                RasterFxError::validation(format!("effect '{effect}' has no control '{key}'"))
            })?;
            let value = match (&control.kind, raw) {
                (ControlKind::Range { .. }, serde_json::Value::Number(n)) => {
                    ParamValue::Number(n.as_f64().ok_or_else(|| {
                        RasterFxError::validation(format!("'{key}' is not a finite number"))
                    })?)
                }
                (ControlKind::Flag, serde_json::Value::Bool(b)) => ParamValue::Flag(*b),
                (ControlKind::Color, serde_json::Value::String(s)) => {
                    ParamValue::Color(Rgb8::from_hex(s)?)
                }
                (ControlKind::Choice { .. }, serde_json::Value::String(s)) => {
                    ParamValue::Choice(s.clone())
                }
                (_, other) => {
                    return Err(RasterFxError::validation(format!(
                        "'{key}' has an unexpected JSON value {other}"
                    )));
                }
            };
            self.set(effect, key, value)?;
        }
        Ok(())
    }

    /// Restore every control of `effect` to its default.
    pub fn reset_effect(&mut self, effect: EffectId) -> RasterFxResult<()> {
        let defaults = self.defaults(effect)?.clone();
        self.params.insert(effect, defaults);
        Ok(())
    }

    /// Restore one control to its default.
    pub fn reset_param(&mut self, effect: EffectId, key: &str) -> RasterFxResult<()> {
        let value = self
            .defaults(effect)?
            .get(key)
            .cloned()
            .ok_or_else(|| {
                RasterFxError::validation(format!("effect '{effect}' has no control '{key}'"))
            })?;
        self.set(effect, key, value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/store.rs"]
mod tests;
