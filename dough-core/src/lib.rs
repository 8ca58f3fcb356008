//! Baker's-percentage dough calculator.
//!
//! Resolves a dough formula, given either a dough weight or a flour weight,
//! into the weight of every ingredient, including pre-ferments and other
//! inclusion doughs that carry their own hydration and ingredients.
//!
//! Everything here is a pure function of its input. Nothing is validated:
//! callers are expected to pass finite numbers, and non-finite ones simply
//! propagate into the result.

pub mod batch;
pub mod formula;
pub mod math;

pub use batch::{
    calculate_dough_batch, BatchResult, BatchSpec, BatchTarget, Id, InclusionDough,
    InclusionDoughPart, InclusionDoughWeight, Ingredient, IngredientWeight,
};
pub use formula::{
    calculate_dough_weight, calculate_flour_weight, calculate_ingredient_part,
    calculate_ingredient_weight, percent_basis, DoughWeightOptions, FlourWeightOptions,
    IngredientPartOptions, IngredientWeightOptions, FLOUR_PERCENT,
};
pub use math::{round, round_weight, sum};
