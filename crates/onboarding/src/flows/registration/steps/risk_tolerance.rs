use crate::catalog::RiskTolerance;
use wizard::validators;
use wizard::{FieldSpec, StepDefinition};

pub const ID: &str = "RiskTolerance";

/// Tolerancia al riesgo. El selector arranca en `MEDIUM`, asi que una
/// entrega vacia toma ese valor.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::tag("riskTolerance").into_key("risk_tolerance")
                                                               .default_value(RiskTolerance::default().code())
                                                               .with_validator(validators::one_of(RiskTolerance::codes(),
                                                                                                  "Risk tolerance is \
                                                                                                   invalid")))
                         .then(super::password::ID)
}
