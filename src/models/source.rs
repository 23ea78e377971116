// Simulated metric source: active flag, tick-driven counters, user-set parameters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, check_range};
use crate::rng::RandomSource;

/// Which dashboard a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Mining,
    Track,
    Effect,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Mining, Domain::Track, Domain::Effect];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Mining => "mining",
            Domain::Track => "track",
            Domain::Effect => "effect",
        }
    }

    /// Mixer tracks and effects render on the same studio screen.
    pub fn is_studio(self) -> bool {
        matches!(self, Domain::Track | Domain::Effect)
    }
}

impl std::str::FromStr for Domain {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| EngineError::UnknownCommand(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterKind {
    /// `prev + U[0, max_step)`, reduced modulo `wrap` when set. Zeroed on deactivation.
    Volatile { max_step: f64, wrap: Option<f64> },
    /// `+1` with `probability` per tick. Never reset.
    Event { probability: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSpec {
    pub name: &'static str,
    pub kind: CounterKind,
}

impl CounterSpec {
    pub const fn volatile(name: &'static str, max_step: f64) -> Self {
        Self {
            name,
            kind: CounterKind::Volatile {
                max_step,
                wrap: None,
            },
        }
    }

    pub const fn wrapping(name: &'static str, max_step: f64, wrap: f64) -> Self {
        Self {
            name,
            kind: CounterKind::Volatile {
                max_step,
                wrap: Some(wrap),
            },
        }
    }

    pub const fn event(name: &'static str, probability: f64) -> Self {
        Self {
            name,
            kind: CounterKind::Event { probability },
        }
    }

    pub fn is_volatile(&self) -> bool {
        matches!(self.kind, CounterKind::Volatile { .. })
    }
}

/// User-set value with its allowed range. Ticks never touch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// On/off flag stored as 0 or 1 (mute, solo).
    #[serde(default)]
    pub switch: bool,
}

impl Parameter {
    pub const fn new(value: f64, min: f64, max: f64) -> Self {
        Self {
            value,
            min,
            max,
            switch: false,
        }
    }

    pub const fn switch(on: bool) -> Self {
        Self {
            value: if on { 1.0 } else { 0.0 },
            min: 0.0,
            max: 1.0,
            switch: true,
        }
    }
}

/// Result of an activation change. `epoch` identifies the ticker allowed to mutate the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Activated { epoch: u64 },
    Deactivated,
}

#[derive(Debug, Clone)]
pub struct MetricSource {
    id: String,
    name: String,
    domain: Domain,
    unit: Option<&'static str>,
    profit: f64,
    active: bool,
    epoch: u64,
    specs: Vec<CounterSpec>,
    counters: BTreeMap<String, f64>,
    parameters: BTreeMap<String, Parameter>,
}

impl MetricSource {
    /// Inactive source with every counter at 0.
    pub fn new(id: impl Into<String>, name: impl Into<String>, domain: Domain) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain,
            unit: None,
            profit: 0.0,
            active: false,
            epoch: 0,
            specs: Vec::new(),
            counters: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_counter(mut self, spec: CounterSpec) -> Self {
        self.counters.insert(spec.name.to_string(), 0.0);
        self.specs.push(spec);
        self
    }

    pub fn with_parameter(mut self, key: &str, parameter: Parameter) -> Self {
        self.parameters.insert(key.to_string(), parameter);
        self
    }

    pub fn with_profit(mut self, profit: f64) -> Self {
        self.profit = profit;
        self
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Hash-rate unit, `H/s` when the source declares none.
    pub fn unit(&self) -> &'static str {
        self.unit.unwrap_or("H/s")
    }

    /// Static daily profit figure. Not derived from counters.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Counter value, 0 for counters the source does not carry.
    pub fn counter(&self, name: &str) -> f64 {
        self.counters.get(name).copied().unwrap_or(0.0)
    }

    pub fn counters(&self) -> &BTreeMap<String, f64> {
        &self.counters
    }

    pub fn parameter(&self, key: &str) -> Option<Parameter> {
        self.parameters.get(key).copied()
    }

    pub fn parameters(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }

    pub fn toggle(&mut self) -> Transition {
        if self.active {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    /// `None` when the source is already in the requested state.
    pub fn set_active(&mut self, active: bool) -> Option<Transition> {
        if self.active == active {
            return None;
        }
        Some(self.toggle())
    }

    fn activate(&mut self) -> Transition {
        self.active = true;
        self.epoch += 1;
        Transition::Activated { epoch: self.epoch }
    }

    fn deactivate(&mut self) -> Transition {
        self.active = false;
        self.epoch += 1;
        for spec in self.specs.iter().filter(|s| s.is_volatile()) {
            self.counters.insert(spec.name.to_string(), 0.0);
        }
        Transition::Deactivated
    }

    /// Applies one scheduled tick. Returns false, leaving counters untouched,
    /// when the source is inactive or `epoch` belongs to an earlier activation.
    pub fn tick(&mut self, epoch: u64, rng: &mut dyn RandomSource) -> bool {
        if !self.active || epoch != self.epoch {
            return false;
        }
        for spec in &self.specs {
            let slot = self.counters.entry(spec.name.to_string()).or_insert(0.0);
            match spec.kind {
                CounterKind::Volatile { max_step, wrap } => {
                    let next = *slot + rng.next_unit() * max_step;
                    *slot = match wrap {
                        Some(w) => next % w,
                        None => next,
                    };
                }
                CounterKind::Event { probability } => {
                    if rng.next_unit() < probability {
                        *slot += 1.0;
                    }
                }
            }
        }
        true
    }

    /// Overwrites a user-set parameter after checking its range.
    pub fn update_parameter(&mut self, key: &str, value: f64) -> Result<(), EngineError> {
        let Some(param) = self.parameters.get_mut(key) else {
            return Err(EngineError::UnknownParameter {
                id: self.id.clone(),
                key: key.to_string(),
            });
        };
        check_range(key, value, param.min, param.max)?;
        if param.switch && value != 0.0 && value != 1.0 {
            return Err(EngineError::NotASwitch {
                key: key.to_string(),
                value,
            });
        }
        param.value = value;
        Ok(())
    }

    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            domain: self.domain,
            active: self.active,
            unit: self.unit().to_string(),
            profit: if self.active { self.profit } else { 0.0 },
            counters: self.counters.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|(k, p)| (k.clone(), p.value))
                .collect(),
        }
    }
}

/// Read-only view of one source for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSnapshot {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub active: bool,
    pub unit: String,
    /// Daily profit shown on the card; 0 while idle.
    pub profit: f64,
    pub counters: BTreeMap<String, f64>,
    pub parameters: BTreeMap<String, f64>,
}
