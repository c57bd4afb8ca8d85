mod amounts;
mod calculator;


pub use amounts::{round_to, Nutrient, NutrientAmounts};
pub use calculator::{aggregate, nutrients_for};
