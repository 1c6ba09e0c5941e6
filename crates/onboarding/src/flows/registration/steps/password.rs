use wizard::validators;
use wizard::{FieldSpec, StepDefinition};

pub const ID: &str = "Password";

/// Contraseña definitiva: debe cumplir las cuatro reglas de
/// `wizard::validators::PasswordRules`. Sobrescribe la clave `password`
/// escrita en el paso de datos personales.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::secret("password").with_validator(validators::password_strength("Please enter a \
                                                                                                           valid password.")))
                         .then(super::set_pin::ID)
}
