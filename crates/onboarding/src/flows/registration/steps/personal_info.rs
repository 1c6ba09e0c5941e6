use wizard::validators;
use wizard::{FieldSpec, JoinRule, StepDefinition};

/// Identificador del paso de datos personales (entrada del flujo).
pub const ID: &str = "PersonalInfo";

/// Datos personales. `firstName` y `lastName` se guardan unidos en `name`;
/// las claves del registro usan snake_case.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::text("firstName").joined().required("First name is required"))
                         .field(FieldSpec::text("lastName").joined().required("Last name is required"))
                         .field(FieldSpec::text("email").with_validator(validators::email_shape("Invalid email address")))
                         .field(FieldSpec::text("phone").optional())
                         .field(FieldSpec::text("altEmail").into_key("alt_email")
                                                           .with_validator(validators::contains_at("Alt email is invalid")))
                         .field(FieldSpec::text("nationalId").into_key("national_id")
                                                             .required("National ID is required"))
                         .field(FieldSpec::text("dayOfBirth").into_key("day_of_birth")
                                                             .with_validator(validators::date_shape("Date must be in \
                                                                                                     YYYY-MM-DD format")))
                         .field(FieldSpec::secret("password").with_validator(validators::min_length(6,
                                                                                                    "Password must be at \
                                                                                                     least 6 characters")))
                         .join(JoinRule::new("name", &["firstName", "lastName"], " "))
                         .then(super::address::ID)
}
