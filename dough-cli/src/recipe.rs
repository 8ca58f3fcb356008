use dough_core::{BatchSpec, BatchTarget, InclusionDough, Ingredient};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which quantity the user fixes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    DoughWeight,
    FlourWeight,
}

/// Pre-ferments the calculator knows presets for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PreFermentKind {
    SourdoughStarter,
    Poolish,
    Biga,
}

impl PreFermentKind {
    pub fn label(self) -> &'static str {
        match self {
            PreFermentKind::SourdoughStarter => "Sourdough Starter",
            PreFermentKind::Poolish => "Poolish",
            PreFermentKind::Biga => "Biga",
        }
    }

    /// Preset `(percent, hydration %, yeast %)`; a starter carries no yeast.
    pub fn defaults(self) -> (f64, f64, Option<f64>) {
        match self {
            PreFermentKind::SourdoughStarter => (20.0, 100.0, None),
            PreFermentKind::Poolish => (40.0, 100.0, Some(0.25)),
            PreFermentKind::Biga => (50.0, 50.0, Some(0.25)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreFerment {
    pub kind: PreFermentKind,
    pub percent: f64,
    pub hydration_percent: f64,
    /// Ignored for a sourdough starter.
    pub yeast_percent: f64,
}

impl PreFerment {
    /// Preset values with any of them replaced.
    pub fn new(
        kind: PreFermentKind,
        percent: Option<f64>,
        hydration_percent: Option<f64>,
        yeast_percent: Option<f64>,
    ) -> Self {
        let (p, h, y) = kind.defaults();
        PreFerment {
            kind,
            percent: percent.unwrap_or(p),
            hydration_percent: hydration_percent.unwrap_or(h),
            yeast_percent: yeast_percent.or(y).unwrap_or(0.0),
        }
    }

    fn has_yeast(&self) -> bool {
        self.kind.defaults().2.is_some()
    }
}

/// Scald (tangzhong): flour cooked in a lot of liquid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scald {
    pub percent: f64,
    pub hydration_percent: f64,
}

impl Scald {
    pub const DEFAULT_PERCENT: f64 = 30.0;
    pub const DEFAULT_HYDRATION_PERCENT: f64 = 400.0;

    pub fn new(percent: Option<f64>, hydration_percent: Option<f64>) -> Self {
        Scald {
            percent: percent.unwrap_or(Self::DEFAULT_PERCENT),
            hydration_percent: hydration_percent.unwrap_or(Self::DEFAULT_HYDRATION_PERCENT),
        }
    }
}

/// Any other ingredient, as a baker's percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawIngredient {
    pub name: String,
    pub percent: f64,
}

/// Calculator input, before it is checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub mode: Mode,
    pub dough_weight: f64,
    pub flour_weight: f64,
    pub scale: f64,
    pub target_hydration_percent: f64,
    pub salt_percent: f64,
    pub preferment: Option<PreFerment>,
    pub scald: Option<Scald>,
    pub raw_ingredients: Vec<RawIngredient>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    #[error("target hydration must be a finite number")]
    TargetHydrationPercentInvalid,
    #[error("salt percent must be a finite number")]
    SaltPercentInvalid,
    #[error("dough weight must be a finite number")]
    DoughWeightInvalid,
    #[error("flour weight must be a finite number")]
    FlourWeightInvalid,
    #[error("scale must be a finite number")]
    ScaleInvalid,
    #[error("{ingredient}: percent must be a finite number")]
    PercentInvalid { ingredient: String },
    #[error("{ingredient}: hydration percent must be a finite number")]
    HydrationPercentInvalid { ingredient: String },
    #[error("{ingredient}: yeast percent must be a finite number")]
    YeastPercentInvalid { ingredient: String },
    #[error("ingredient #{position} needs a name")]
    NameInvalid { position: usize },
}

/// Every problem found in a recipe.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid recipe: {}", join(.0))]
pub struct RecipeErrors(pub Vec<RecipeError>);

fn join(errors: &[RecipeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn ingredient(id: impl Into<String>, name: impl Into<String>, percent: f64) -> Ingredient {
    Ingredient {
        id: id.into(),
        name: name.into(),
        percent,
    }
}

impl Recipe {
    pub fn errors(&self) -> Vec<RecipeError> {
        let mut errors = Vec::new();

        if !self.target_hydration_percent.is_finite() {
            errors.push(RecipeError::TargetHydrationPercentInvalid);
        }
        if !self.salt_percent.is_finite() {
            errors.push(RecipeError::SaltPercentInvalid);
        }

        if let Some(p) = &self.preferment {
            let name = p.kind.label().to_string();
            if !p.percent.is_finite() {
                errors.push(RecipeError::PercentInvalid { ingredient: name.clone() });
            }
            if !p.hydration_percent.is_finite() {
                errors.push(RecipeError::HydrationPercentInvalid { ingredient: name.clone() });
            }
            if p.has_yeast() && !p.yeast_percent.is_finite() {
                errors.push(RecipeError::YeastPercentInvalid { ingredient: name });
            }
        }

        if let Some(s) = &self.scald {
            if !s.percent.is_finite() {
                errors.push(RecipeError::PercentInvalid { ingredient: "Scald".to_string() });
            }
            if !s.hydration_percent.is_finite() {
                errors.push(RecipeError::HydrationPercentInvalid {
                    ingredient: "Scald".to_string(),
                });
            }
        }

        for (i, raw) in self.raw_ingredients.iter().enumerate() {
            if raw.name.trim().is_empty() {
                errors.push(RecipeError::NameInvalid { position: i + 1 });
            }
            if !raw.percent.is_finite() {
                errors.push(RecipeError::PercentInvalid { ingredient: raw.name.clone() });
            }
        }

        match self.mode {
            Mode::DoughWeight if !self.dough_weight.is_finite() => {
                errors.push(RecipeError::DoughWeightInvalid)
            }
            Mode::FlourWeight if !self.flour_weight.is_finite() => {
                errors.push(RecipeError::FlourWeightInvalid)
            }
            _ => {}
        }

        if !self.scale.is_finite() {
            errors.push(RecipeError::ScaleInvalid);
        }

        errors
    }

    /// Builds the engine input. Pre-ferment comes before the scald; salt is
    /// the first flat ingredient.
    pub fn to_batch_spec(&self) -> Result<BatchSpec, RecipeErrors> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(RecipeErrors(errors));
        }

        let mut inclusion_doughs = Vec::new();
        if let Some(p) = &self.preferment {
            let ingredients = if p.has_yeast() {
                vec![ingredient("preferment.yeast", "Yeast", p.yeast_percent)]
            } else {
                vec![]
            };
            inclusion_doughs.push(InclusionDough {
                id: "preferment".to_string(),
                name: p.kind.label().to_string(),
                percent: p.percent,
                hydration_percent: p.hydration_percent,
                ingredients,
            });
        }
        if let Some(s) = &self.scald {
            inclusion_doughs.push(InclusionDough {
                id: "scald".to_string(),
                name: "Scald (Tangzhong)".to_string(),
                percent: s.percent,
                hydration_percent: s.hydration_percent,
                ingredients: vec![],
            });
        }

        let ingredients = std::iter::once(ingredient("salt", "Salt", self.salt_percent))
            .chain(self.raw_ingredients.iter().enumerate().map(|(i, raw)| {
                ingredient(format!("ingredient.{}", i + 1), raw.name.trim(), raw.percent)
            }))
            .collect();

        let target = match self.mode {
            Mode::DoughWeight => BatchTarget::DoughWeight(self.dough_weight),
            Mode::FlourWeight => BatchTarget::FlourWeight(self.flour_weight),
        };

        Ok(BatchSpec {
            name: self.name.clone(),
            target,
            scale: self.scale,
            total_hydration_percent: self.target_hydration_percent,
            inclusion_doughs,
            ingredients,
        })
    }
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Recipe {
        Recipe {
            name: "Country Bread".to_string(),
            mode: Mode::DoughWeight,
            dough_weight: 800.0,
            flour_weight: 500.0,
            scale: 1.0,
            target_hydration_percent: 80.0,
            salt_percent: 2.0,
            preferment: None,
            scald: None,
            raw_ingredients: vec![],
        }
    }

    #[test]
    fn test_preferment_presets() {
        let starter = PreFerment::new(PreFermentKind::SourdoughStarter, None, None, None);
        assert_eq!((starter.percent, starter.hydration_percent), (20.0, 100.0));

        let poolish = PreFerment::new(PreFermentKind::Poolish, None, None, None);
        assert_eq!(
            (poolish.percent, poolish.hydration_percent, poolish.yeast_percent),
            (40.0, 100.0, 0.25)
        );

        let biga = PreFerment::new(PreFermentKind::Biga, Some(45.0), None, Some(0.1));
        assert_eq!(
            (biga.percent, biga.hydration_percent, biga.yeast_percent),
            (45.0, 50.0, 0.1)
        );

        let scald = Scald::new(None, Some(300.0));
        assert_eq!((scald.percent, scald.hydration_percent), (30.0, 300.0));
    }

    #[test]
    fn test_valid_recipe_has_no_errors() {
        assert!(base().errors().is_empty());
    }

    #[test]
    fn test_errors_follow_mode() {
        let mut r = base();
        r.flour_weight = f64::NAN;
        assert!(r.errors().is_empty(), "flour weight is unused in dough mode");

        r.mode = Mode::FlourWeight;
        assert_eq!(r.errors(), vec![RecipeError::FlourWeightInvalid]);

        r.flour_weight = 500.0;
        r.dough_weight = f64::INFINITY;
        assert!(r.errors().is_empty());
        r.mode = Mode::DoughWeight;
        assert_eq!(r.errors(), vec![RecipeError::DoughWeightInvalid]);
    }

    #[test]
    fn test_collects_every_error() {
        let mut r = base();
        r.target_hydration_percent = f64::NAN;
        r.salt_percent = f64::NAN;
        r.scale = f64::NAN;
        r.preferment = Some(PreFerment::new(
            PreFermentKind::Poolish,
            None,
            Some(f64::NAN),
            Some(f64::NAN),
        ));
        r.raw_ingredients = vec![RawIngredient {
            name: " ".to_string(),
            percent: 3.0,
        }];

        assert_eq!(
            r.errors(),
            vec![
                RecipeError::TargetHydrationPercentInvalid,
                RecipeError::SaltPercentInvalid,
                RecipeError::HydrationPercentInvalid {
                    ingredient: "Poolish".to_string()
                },
                RecipeError::YeastPercentInvalid {
                    ingredient: "Poolish".to_string()
                },
                RecipeError::NameInvalid { position: 1 },
                RecipeError::ScaleInvalid,
            ]
        );
    }

    #[test]
    fn test_starter_ignores_yeast() {
        let mut r = base();
        r.preferment = Some(PreFerment::new(
            PreFermentKind::SourdoughStarter,
            None,
            None,
            Some(f64::NAN),
        ));
        assert!(r.errors().is_empty());

        let spec = r.to_batch_spec().unwrap();
        assert!(spec.inclusion_doughs[0].ingredients.is_empty());
    }

    #[test]
    fn test_invalid_recipe_is_refused() {
        let mut r = base();
        r.scale = f64::NAN;
        let err = r.to_batch_spec().unwrap_err();
        assert_eq!(err.0, vec![RecipeError::ScaleInvalid]);
        assert_eq!(err.to_string(), "invalid recipe: scale must be a finite number");
    }

    #[test]
    fn test_batch_spec_layout() {
        let mut r = base();
        r.mode = Mode::FlourWeight;
        r.scald = Some(Scald::new(None, None));
        r.preferment = Some(PreFerment::new(PreFermentKind::Biga, None, None, None));
        r.raw_ingredients = vec![
            RawIngredient {
                name: " Olive Oil ".to_string(),
                percent: 3.0,
            },
            RawIngredient {
                name: "Honey".to_string(),
                percent: 1.5,
            },
        ];

        let spec = r.to_batch_spec().unwrap();
        assert_eq!(spec.target, BatchTarget::FlourWeight(500.0));
        assert_eq!(spec.total_hydration_percent, 80.0);

        let doughs: Vec<&str> = spec.inclusion_doughs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(doughs, ["Biga", "Scald (Tangzhong)"]);
        assert_eq!(spec.inclusion_doughs[0].ingredients[0].name, "Yeast");
        assert_eq!(spec.inclusion_doughs[0].ingredients[0].percent, 0.25);

        let flat: Vec<(&str, &str)> = spec
            .ingredients
            .iter()
            .map(|i| (i.id.as_str(), i.name.as_str()))
            .collect();
        assert_eq!(
            flat,
            [("salt", "Salt"), ("ingredient.1", "Olive Oil"), ("ingredient.2", "Honey")]
        );
    }
}
