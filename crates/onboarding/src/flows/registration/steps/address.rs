use wizard::{FieldSpec, StepDefinition};

pub const ID: &str = "Address";

/// Direccion postal. El codigo postal es opcional.
pub fn definition() -> StepDefinition {
  StepDefinition::new(ID).field(FieldSpec::text("country").required("Country is required"))
                         .field(FieldSpec::text("state").required("State or province is required"))
                         .field(FieldSpec::text("city").required("City is required"))
                         .field(FieldSpec::text("addressLine").into_key("address_line").required("Address is required"))
                         .field(FieldSpec::text("zipCode").into_key("zip_code").optional())
                         .then(super::occupation::ID)
}
