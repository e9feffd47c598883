/// S-shaped curve rescaled onto `[floor, ceil]`.
///
/// `value = floor + (ceil - floor) / (1 + exp(-steepness * (x - midpoint)))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    pub midpoint: f64,
    pub steepness: f64,
    pub floor: f64,
    pub ceil: f64,
}

impl Logistic {
    /// Build a curve centred halfway between two reference points.
    pub fn between(lower_midpoint: f64, upper_midpoint: f64, steepness: f64, floor: f64, ceil: f64) -> Self {
        Logistic {
            midpoint: (lower_midpoint + upper_midpoint) / 2.0,
            steepness,
            floor,
            ceil,
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        let sigmoid = 1.0 / (1.0 + (-self.steepness * (x - self.midpoint)).exp());
        self.floor + (self.ceil - self.floor) * sigmoid
    }
}

/// Power law that is clamped to zero at and below its baseline.
///
/// `a * margin^c` for `margin > 0`, otherwise `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub a: f64,
    pub c: f64,
}

impl PowerLaw {
    pub fn apply(&self, margin: f64) -> f64 {
        if margin <= 0.0 {
            return 0.0;
        }
        self.a * margin.powf(self.c)
    }
}

/// Round to `places` decimals, exact ties going to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
