//! Baker's math for a single list of percentages.
//!
//! Every ingredient is a percentage of the flour weight, flour itself being
//! 100%. With 500 g flour, 400 g water and 10 g salt:
//!
//! ```text
//! Dough Weight = sum(Flour Weight * Ingredient Percent[i])
//!        910 g = 500 g * (100% + 80% + 2%)
//!
//! Flour Weight = Dough Weight / sum(Ingredient Percent[i])
//!        500 g = 910 g / 182%
//! ```
//!
//! Percent lists passed to [`calculate_flour_weight`] and
//! [`calculate_dough_weight`] must contain the flour entry; build them with
//! [`percent_basis`].

use crate::math::{round_weight, sum};

/// Baker's percentage of the flour itself.
pub const FLOUR_PERCENT: f64 = 100.0;

/// Builds a percent list: flour first, then hydration, then the rest.
pub fn percent_basis(hydration_percent: f64, others: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut percents = vec![FLOUR_PERCENT, hydration_percent];
    percents.extend(others);
    percents
}

/// Input for [`calculate_flour_weight`].
#[derive(Copy, Clone, Debug)]
pub struct FlourWeightOptions<'a> {
    pub dough_weight: f64,
    /// Includes the flour's own 100%.
    pub ingredient_percents: &'a [f64],
}

/// Input for [`calculate_dough_weight`].
#[derive(Copy, Clone, Debug)]
pub struct DoughWeightOptions<'a> {
    pub flour_weight: f64,
    /// Includes the flour's own 100%.
    pub ingredient_percents: &'a [f64],
}

/// Input for [`calculate_ingredient_weight`].
#[derive(Copy, Clone, Debug)]
pub struct IngredientWeightOptions {
    pub flour_weight: f64,
    pub percent: f64,
}

/// Input for [`calculate_ingredient_part`].
#[derive(Copy, Clone, Debug)]
pub struct IngredientPartOptions<'a> {
    pub part: f64,
    pub parts: &'a [f64],
}

/// Flour weight that yields `dough_weight` for the given percentages, rounded.
pub fn calculate_flour_weight(options: FlourWeightOptions<'_>) -> f64 {
    round_weight(options.dough_weight / (sum(options.ingredient_percents) / 100.0))
}

/// Dough weight for the given flour weight and percentages. Not rounded.
pub fn calculate_dough_weight(options: DoughWeightOptions<'_>) -> f64 {
    let weights: Vec<f64> = options
        .ingredient_percents
        .iter()
        .map(|percent| options.flour_weight * percent / 100.0)
        .collect();
    sum(&weights)
}

/// Weight of one ingredient from the flour weight and its percentage, rounded.
pub fn calculate_ingredient_weight(options: IngredientWeightOptions) -> f64 {
    round_weight(options.flour_weight * options.percent / 100.0)
}

/// Share of `part` in the whole of `parts`, on a 0-100 scale.
/// This is a plain percentage of the mass, not a baker's percentage.
pub fn calculate_ingredient_part(options: IngredientPartOptions<'_>) -> f64 {
    options.part / sum(options.parts) * 100.0
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_basis_prepends_flour() {
        assert_eq!(percent_basis(80.0, [2.0, 1.0]), vec![100.0, 80.0, 2.0, 1.0]);
        assert_eq!(percent_basis(65.0, std::iter::empty()), vec![100.0, 65.0]);
    }

    #[test]
    fn test_flour_weight() {
        let w = calculate_flour_weight(FlourWeightOptions {
            dough_weight: 1000.0,
            ingredient_percents: &[100.0, 80.0, 2.0],
        });
        assert_eq!(w, 549.0);
    }

    #[test]
    fn test_dough_weight() {
        let w = calculate_dough_weight(DoughWeightOptions {
            flour_weight: 500.0,
            ingredient_percents: &[100.0, 80.0, 2.0],
        });
        assert_relative_eq!(w, 910.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dough_weight_is_not_rounded() {
        let w = calculate_dough_weight(DoughWeightOptions {
            flour_weight: 333.0,
            ingredient_percents: &[100.0, 70.0, 2.2],
        });
        assert_relative_eq!(w, 573.426, epsilon = 1e-9);
    }

    #[test]
    fn test_ingredient_weight() {
        let w = calculate_ingredient_weight(IngredientWeightOptions {
            flour_weight: 500.0,
            percent: 80.0,
        });
        assert_eq!(w, 400.0);

        // Sub-unit weights keep one decimal.
        let yeast = calculate_ingredient_weight(IngredientWeightOptions {
            flour_weight: 120.0,
            percent: 0.25,
        });
        assert_relative_eq!(yeast, 0.3);
    }

    #[test]
    fn test_ingredient_part() {
        let p = calculate_ingredient_part(IngredientPartOptions {
            part: 20.0,
            parts: &[100.0, 80.0, 20.0],
        });
        assert_relative_eq!(p, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flour_then_dough_weight_round_trips() {
        let percent_lists: [&[f64]; 4] = [
            &[100.0, 80.0, 2.0],
            &[100.0, 65.0, 2.0, 0.4],
            &[100.0, 100.0],
            &[100.0, 72.5, 2.2, 1.5, 10.0],
        ];
        for percents in percent_lists {
            for dough_weight in [250.0, 800.0, 1234.0, 5000.0] {
                let flour = calculate_flour_weight(FlourWeightOptions {
                    dough_weight,
                    ingredient_percents: percents,
                });
                let dough = calculate_dough_weight(DoughWeightOptions {
                    flour_weight: flour,
                    ingredient_percents: percents,
                });
                assert!(
                    (dough - dough_weight).abs() <= 1.0,
                    "{dough_weight} g round-tripped to {dough} g with {percents:?}"
                );
            }
        }
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let w = calculate_flour_weight(FlourWeightOptions {
            dough_weight: f64::NAN,
            ingredient_percents: &[100.0, 80.0],
        });
        assert!(w.is_nan());

        let p = calculate_ingredient_part(IngredientPartOptions {
            part: 10.0,
            parts: &[],
        });
        assert_eq!(p, f64::INFINITY);
    }

    #[test]
    fn test_empty_percent_list_is_positive_zero() {
        let w = calculate_dough_weight(DoughWeightOptions {
            flour_weight: 500.0,
            ingredient_percents: &[],
        });
        assert_eq!(w, 0.0);
        assert!(!w.is_sign_negative());
    }
}
