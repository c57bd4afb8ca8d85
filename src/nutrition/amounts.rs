use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// The fixed set of tracked nutrients, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    VitaminC,
}

impl Nutrient {
    /// Every nutrient in iteration order
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::VitaminC,
    ];

    /// Field name used in food tables, JSON output and flags
    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
            Nutrient::Fiber => "fiber",
            Nutrient::VitaminC => "vitamin_c",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Amounts for every tracked nutrient.
///
/// Used both for per-100g reference values and for absolute amounts of an
/// item or a whole meal. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientAmounts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub vitamin_c: f64,
}

impl NutrientAmounts {
    /// All-zero amounts
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::VitaminC => self.vitamin_c,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::VitaminC => &mut self.vitamin_c,
        };
        *slot = value;
    }

    /// Iterate `(nutrient, amount)` pairs in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |&n| (n, self.get(n)))
    }

    /// Scale every amount by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Copy rounded to `decimals` places, for display only
    pub fn rounded(&self, decimals: u32) -> Self {
        self.map(|v| round_to(v, decimals))
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = Self::zero();
        for (n, v) in self.iter() {
            out.set(n, f(v));
        }
        out
    }
}

impl Add for NutrientAmounts {
    type Output = NutrientAmounts;

    fn add(mut self, other: NutrientAmounts) -> NutrientAmounts {
        self += other;
        self
    }
}

impl AddAssign for NutrientAmounts {
    fn add_assign(&mut self, other: NutrientAmounts) {
        for n in Nutrient::ALL {
            self.set(n, self.get(n) + other.get(n));
        }
    }
}

impl Mul<f64> for NutrientAmounts {
    type Output = NutrientAmounts;

    fn mul(self, factor: f64) -> NutrientAmounts {
        self.scale(factor)
    }
}

impl std::iter::Sum for NutrientAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientAmounts::zero(), |acc, n| acc + n)
    }
}

impl<'a> std::iter::Sum<&'a NutrientAmounts> for NutrientAmounts {
    fn sum<I: Iterator<Item = &'a NutrientAmounts>>(iter: I) -> Self {
        iter.fold(NutrientAmounts::zero(), |acc, n| acc + *n)
    }
}

/// Round half away from zero to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
