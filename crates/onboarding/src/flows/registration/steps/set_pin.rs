use wizard::validators;
use wizard::{FieldSpec, StepDefinition};

pub const ID: &str = "SetPin";

/// PIN de seis digitos; ultimo paso de la cadena.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::secret("pin").sanitize(validators::sanitize_pin)
                                                        .with_validator(validators::pin("PIN must be exactly 6 digits")))
                         .terminal()
}
