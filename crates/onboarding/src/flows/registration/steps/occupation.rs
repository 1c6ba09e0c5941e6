use crate::catalog::{IncomeRange, LiquidityLevel, Occupation};
use wizard::validators;
use wizard::{FieldSpec, StepDefinition};

pub const ID: &str = "Occupation";

/// Perfil economico: tres selectores cerrados. Un valor vacio o fuera del
/// catalogo produce el mismo mensaje de "requerido" que la pantalla.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::tag("occupation").with_validator(validators::one_of(Occupation::codes(),
                                                                                               "Occupation is required")))
                         .field(FieldSpec::tag("incomeRange").into_key("income_range")
                                                             .with_validator(validators::one_of(IncomeRange::codes(),
                                                                                                "Annual income is required")))
                         .field(FieldSpec::tag("liquidityLevel").into_key("liquidity_level")
                                                                .with_validator(validators::one_of(LiquidityLevel::codes(),
                                                                                                   "Liquidity level is \
                                                                                                    required")))
                         .then(super::risk_tolerance::ID)
}
