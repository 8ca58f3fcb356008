//! Dough batch resolution.
//!
//! A batch is a main dough plus any number of inclusion doughs (starter,
//! poolish, biga, scald...). An inclusion dough's `percent` is relative to the
//! flour of the whole batch, while its hydration and inner ingredients are
//! relative to its own flour. [`calculate_dough_batch`] first rewrites those
//! inner percentages against the batch flour, then resolves every weight from
//! the total flour weight.
//!
//! Inclusion doughs are one level deep; an inclusion dough cannot contain
//! another one.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::formula::{
    calculate_dough_weight, calculate_flour_weight, calculate_ingredient_part,
    calculate_ingredient_weight, percent_basis, DoughWeightOptions, FlourWeightOptions,
    IngredientPartOptions, IngredientWeightOptions, FLOUR_PERCENT,
};
use crate::math::sum;

pub type Id = String;

/// Ingredient as a baker's percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Id,
    pub name: String,
    pub percent: f64,
}

/// Resolved ingredient weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientWeight {
    pub id: Id,
    pub name: String,
    pub weight: f64,
}

/// A sub-dough mixed into the main dough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionDough {
    pub id: Id,
    pub name: String,
    /// Whole inclusion dough as a percentage of the batch flour.
    pub percent: f64,
    /// Liquid relative to the inclusion dough's own flour.
    pub hydration_percent: f64,
    /// Percentages of the inclusion dough's own flour.
    pub ingredients: Vec<Ingredient>,
}

/// Inclusion dough with every part expressed against the batch flour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionDoughPart {
    pub id: Id,
    pub name: String,
    pub percent: f64,
    pub hydration_percent: f64,
    pub flour_percent: f64,
    pub liquid_percent: f64,
    pub ingredients: Vec<Ingredient>,
}

impl InclusionDoughPart {
    /// Normalizes the dough to parts of its own mass, then rescales those
    /// parts by the dough's share of the batch flour.
    pub fn from_dough(dough: &InclusionDough) -> Self {
        let parts = percent_basis(
            dough.hydration_percent,
            dough.ingredients.iter().map(|i| i.percent),
        );
        let part_of =
            |part: f64| calculate_ingredient_part(IngredientPartOptions { part, parts: &parts });
        let to_system = |part: f64| dough.percent * part / 100.0;

        InclusionDoughPart {
            id: dough.id.clone(),
            name: dough.name.clone(),
            percent: dough.percent,
            hydration_percent: dough.hydration_percent,
            flour_percent: to_system(part_of(FLOUR_PERCENT)),
            liquid_percent: to_system(part_of(dough.hydration_percent)),
            ingredients: dough
                .ingredients
                .iter()
                .map(|i| Ingredient {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    percent: to_system(part_of(i.percent)),
                })
                .collect(),
        }
    }
}

/// Resolved inclusion dough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionDoughWeight {
    pub id: Id,
    pub name: String,
    pub weight: f64,
    pub hydration_percent: f64,
    pub flour_weight: f64,
    pub liquid_weight: f64,
    pub ingredients: Vec<IngredientWeight>,
}

/// Quantity held fixed while the rest of the batch is solved.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchTarget {
    /// Weight of one portion of dough.
    DoughWeight(f64),
    /// Flour weight of one portion of dough.
    FlourWeight(f64),
}

/// A complete dough formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSpec {
    pub name: String,
    #[serde(flatten)]
    pub target: BatchTarget,
    /// Batch multiplier applied to the target.
    pub scale: f64,
    /// Overall hydration, counting the liquid inside inclusion doughs.
    pub total_hydration_percent: f64,
    pub inclusion_doughs: Vec<InclusionDough>,
    pub ingredients: Vec<Ingredient>,
}

/// Resolved batch. `flour_weight` and `liquid_weight` belong to the main dough
/// only; flour and liquid held in inclusion doughs are listed with them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub name: String,
    /// Dough weight of a single, unscaled portion.
    pub portion: f64,
    pub scale: f64,
    pub total_hydration_percent: f64,
    pub flour_weight: f64,
    pub liquid_weight: f64,
    pub inclusion_doughs: Vec<InclusionDoughWeight>,
    pub ingredients: Vec<IngredientWeight>,
}

/// Resolves every weight of a batch.
///
/// Inputs are not validated: non-finite numbers propagate into the result.
pub fn calculate_dough_batch(spec: &BatchSpec) -> BatchResult {
    let parts: Vec<InclusionDoughPart> =
        spec.inclusion_doughs.iter().map(InclusionDoughPart::from_dough).collect();

    // Inclusion flour and liquid are already counted in 100% and the total
    // hydration; only their extra ingredients widen the basis.
    let percents = percent_basis(
        spec.total_hydration_percent,
        spec.ingredients
            .iter()
            .map(|i| i.percent)
            .chain(parts.iter().flat_map(|d| d.ingredients.iter().map(|i| i.percent))),
    );

    let (portion, total_flour_weight) = match spec.target {
        BatchTarget::DoughWeight(dough_weight) => {
            let total_flour_weight = calculate_flour_weight(FlourWeightOptions {
                dough_weight: dough_weight * spec.scale,
                ingredient_percents: &percents,
            });
            (dough_weight, total_flour_weight)
        }
        BatchTarget::FlourWeight(flour_weight) => {
            let portion = calculate_dough_weight(DoughWeightOptions {
                flour_weight,
                ingredient_percents: &percents,
            });
            (portion, flour_weight * spec.scale)
        }
    };

    trace!(
        name = %spec.name,
        target = ?spec.target,
        inclusion_doughs = parts.len(),
        total_flour_weight,
        "resolving dough batch"
    );

    let weigh = |percent: f64| {
        calculate_ingredient_weight(IngredientWeightOptions {
            flour_weight: total_flour_weight,
            percent,
        })
    };
    let weigh_all = |ingredients: &[Ingredient]| -> Vec<IngredientWeight> {
        ingredients
            .iter()
            .map(|i| IngredientWeight {
                id: i.id.clone(),
                name: i.name.clone(),
                weight: weigh(i.percent),
            })
            .collect()
    };

    let total_liquid_weight = weigh(spec.total_hydration_percent);

    let inclusion_doughs: Vec<InclusionDoughWeight> = parts
        .iter()
        .map(|d| InclusionDoughWeight {
            id: d.id.clone(),
            name: d.name.clone(),
            weight: weigh(d.percent),
            hydration_percent: d.hydration_percent,
            flour_weight: weigh(d.flour_percent),
            liquid_weight: weigh(d.liquid_percent),
            ingredients: weigh_all(&d.ingredients[..]),
        })
        .collect();

    let inclusion_flour: Vec<f64> = inclusion_doughs.iter().map(|d| d.flour_weight).collect();
    let inclusion_liquid: Vec<f64> = inclusion_doughs.iter().map(|d| d.liquid_weight).collect();

    BatchResult {
        name: spec.name.clone(),
        portion,
        scale: spec.scale,
        total_hydration_percent: spec.total_hydration_percent,
        flour_weight: total_flour_weight - sum(&inclusion_flour),
        liquid_weight: total_liquid_weight - sum(&inclusion_liquid),
        inclusion_doughs,
        ingredients: weigh_all(&spec.ingredients[..]),
    }
}

/* ===========================
Unit tests
=========================== */
