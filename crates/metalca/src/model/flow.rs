use serde::{Deserialize, Serialize};

/// Inventory flow tracked for every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Energy,
    Water,
    Waste,
    Co2,
}

impl Flow {
    pub fn all() -> &'static [Flow] {
        &[Flow::Energy, Flow::Water, Flow::Waste, Flow::Co2]
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Flow::Energy => "GJ",
            Flow::Water => "m3",
            Flow::Waste => "t",
            Flow::Co2 => "t CO2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Flow::Energy => "Energy",
            Flow::Water => "Water",
            Flow::Waste => "Waste",
            Flow::Co2 => "CO2",
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per inventory flow.
///
/// Used for flow quantities, per-flow weights, benchmarks and fractional
/// reductions alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSet {
    pub energy: f64,
    pub water: f64,
    pub waste: f64,
    pub co2: f64,
}

impl FlowSet {
    pub const fn new(energy: f64, water: f64, waste: f64, co2: f64) -> Self {
        Self {
            energy,
            water,
            waste,
            co2,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, flow: Flow) -> f64 {
        match flow {
            Flow::Energy => self.energy,
            Flow::Water => self.water,
            Flow::Waste => self.waste,
            Flow::Co2 => self.co2,
        }
    }

    pub fn set(&mut self, flow: Flow, value: f64) {
        match flow {
            Flow::Energy => self.energy = value,
            Flow::Water => self.water = value,
            Flow::Waste => self.waste = value,
            Flow::Co2 => self.co2 = value,
        }
    }

    /// Applies `f` to every flow value.
    pub fn map(&self, f: impl Fn(Flow, f64) -> f64) -> Self {
        let mut out = *self;
        for &flow in Flow::all() {
            out.set(flow, f(flow, self.get(flow)));
        }
        out
    }

    pub fn add(&self, other: &FlowSet) -> Self {
        self.map(|flow, value| value + other.get(flow))
    }

    pub fn sum(&self) -> f64 {
        self.energy + self.water + self.waste + self.co2
    }

    pub fn iter(&self) -> impl Iterator<Item = (Flow, f64)> + '_ {
        Flow::all().iter().map(move |&flow| (flow, self.get(flow)))
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }
}

/// `(baseline - improved) / baseline`, or 0 when the baseline is 0.
pub fn fractional_reduction(baseline: f64, improved: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    let reduction = (baseline - improved) / baseline;
    if reduction.is_finite() {
        reduction
    } else {
        0.0
    }
}
