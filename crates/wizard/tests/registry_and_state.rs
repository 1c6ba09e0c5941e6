use std::collections::HashMap;
use wizard::validators;
use wizard::{
  FieldSpec, FieldValue, JoinRule, NormalizedFields, RawInput, RegistrationState, StepDefinition, StepId, StepRegistry,
  ValidationResult, WizardError,
};

fn raw(pairs: &[(&str, &str)]) -> RawInput {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn registry() -> StepRegistry {
  let profile = StepDefinition::new("Profile").field(FieldSpec::text("firstName").joined().required("First name is required"))
                                              .field(FieldSpec::text("lastName").joined().required("Last name is required"))
                                              .field(FieldSpec::text("email").with_validator(validators::email_shape("Invalid email address")))
                                              .field(FieldSpec::text("phone").optional())
                                              .join(JoinRule::new("name", &["firstName", "lastName"], " "))
                                              .then("Pin");
  let pin = StepDefinition::new("Pin").field(FieldSpec::secret("pin").sanitize(validators::sanitize_pin)
                                                                     .with_validator(validators::pin("PIN must be exactly 6 digits")))
                                      .terminal();
  StepRegistry::new("Profile", vec![profile, pin]).expect("registry")
}

#[test]
fn missing_required_field_yields_exactly_that_error() {
  let reg = registry();
  let res = reg.validate(&StepId::from("Profile"), &raw(&[("firstName", "Ana"), ("email", "a@b.com")]))
               .expect("validate");
  let errors = res.errors().expect("invalid");
  assert_eq!(errors.len(), 1);
  assert_eq!(errors.get("lastName").map(String::as_str), Some("Last name is required"));
}

#[test]
fn required_field_without_validators_rejects_missing_input() {
  let city = FieldSpec::text("city");
  assert!(city.is_required());
  let reg = StepRegistry::new("Where", vec![StepDefinition::new("Where").field(city)]).expect("registry");

  for input in [raw(&[]), raw(&[("city", "   ")])] {
    let res = reg.validate(&StepId::from("Where"), &input).expect("validate");
    let errors = res.errors().expect("invalid");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("city").map(String::as_str), Some("city is required"));
  }

  let ok = reg.validate(&StepId::from("Where"), &raw(&[("city", "NYC")])).expect("validate");
  assert!(ok.is_valid());
}

#[test]
fn blank_required_field_keeps_the_message_of_its_own_validator() {
  let email = FieldSpec::text("email").with_validator(validators::email_shape("Invalid email address"));
  let reg = StepRegistry::new("Contact", vec![StepDefinition::new("Contact").field(email)]).expect("registry");
  let res = reg.validate(&StepId::from("Contact"), &raw(&[])).expect("validate");
  assert_eq!(res.errors().and_then(|e| e.get("email")).map(String::as_str), Some("Invalid email address"));
}

#[test]
fn validation_collects_all_failing_fields_in_declared_order() {
  let reg = registry();
  let res = reg.validate(&StepId::from("Profile"), &raw(&[("email", "nope")])).expect("validate");
  let errors = res.errors().expect("invalid");
  let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
  assert_eq!(keys, vec!["firstName", "lastName", "email"]);
}

#[test]
fn valid_input_yields_one_entry_per_declared_key() {
  let reg = registry();
  let res = reg.validate(&StepId::from("Profile"),
                         &raw(&[("firstName", "Ana"), ("lastName", "Lee"), ("email", "a@b.com")]))
               .expect("validate");
  match res {
    ValidationResult::Valid(fields) => {
      let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
      assert_eq!(keys, vec!["email", "name", "phone"]);
      assert_eq!(fields["name"], FieldValue::text("Ana Lee"));
      assert_eq!(fields["phone"], FieldValue::text(""));
    }
    ValidationResult::Invalid(e) => panic!("unexpected errors: {:?}", e),
  }
}

#[test]
fn sanitizer_runs_before_validation_and_secret_is_redacted() {
  let reg = registry();
  let bad = reg.validate(&StepId::from("Pin"), &raw(&[("pin", "12a45")])).expect("validate");
  assert!(!bad.is_valid());
  let good = reg.validate(&StepId::from("Pin"), &raw(&[("pin", "123456")])).expect("validate");
  match good {
    ValidationResult::Valid(fields) => {
      assert!(fields["pin"].is_secret());
      assert_eq!(fields["pin"].as_str(), "123456");
      assert!(!format!("{:?}", fields["pin"]).contains("123456"));
      assert_eq!(fields["pin"].to_string(), "***");
    }
    ValidationResult::Invalid(e) => panic!("unexpected errors: {:?}", e),
  }
}

#[test]
fn unknown_step_is_an_error() {
  let reg = registry();
  let err = reg.validate(&StepId::from("Nope"), &HashMap::new()).unwrap_err();
  assert_eq!(err, WizardError::UnknownStep("Nope".into()));
}

#[test]
fn declared_keys_and_order() {
  let reg = registry();
  let keys: Vec<String> = reg.declared_keys().into_iter().collect();
  assert_eq!(keys, vec!["email", "name", "phone", "pin"]);
  let order: Vec<&str> = reg.order().into_iter().map(StepId::as_str).collect();
  assert_eq!(order, vec!["Profile", "Pin"]);
}

#[test]
fn malformed_chains_are_rejected() {
  let cycle = StepRegistry::new("A",
                                vec![StepDefinition::new("A").then("B"), StepDefinition::new("B").then("A")]);
  assert!(matches!(cycle, Err(WizardError::MalformedChain(_))));

  let dangling = StepRegistry::new("A", vec![StepDefinition::new("A").then("Z")]);
  assert!(matches!(dangling, Err(WizardError::MalformedChain(_))));

  let orphan = StepRegistry::new("A", vec![StepDefinition::new("A").terminal(), StepDefinition::new("B").terminal()]);
  assert!(matches!(orphan, Err(WizardError::MalformedChain(_))));

  let duplicate = StepRegistry::new("A", vec![StepDefinition::new("A").terminal(), StepDefinition::new("A").terminal()]);
  assert!(matches!(duplicate, Err(WizardError::MalformedChain(_))));

  let bad_join = StepRegistry::new("A",
                                   vec![StepDefinition::new("A").field(FieldSpec::text("x"))
                                                                .join(JoinRule::new("xy", &["x", "y"], " "))]);
  assert!(matches!(bad_join, Err(WizardError::MalformedChain(_))));

  let no_entry = StepRegistry::new("Q", vec![StepDefinition::new("A")]);
  assert!(matches!(no_entry, Err(WizardError::MalformedChain(_))));
}

fn fields(pairs: &[(&str, &str)]) -> NormalizedFields {
  pairs.iter().map(|(k, v)| (k.to_string(), FieldValue::text(*v))).collect()
}

#[test]
fn merge_is_idempotent() {
  let mut once = RegistrationState::new();
  once.merge(fields(&[("country", "US"), ("city", "NYC")]));
  let mut twice = RegistrationState::new();
  twice.merge(fields(&[("country", "US"), ("city", "NYC")]));
  twice.merge(fields(&[("country", "US"), ("city", "NYC")]));
  assert_eq!(once.record(), twice.record());
}

#[test]
fn disjoint_merges_union_and_overwrites_keep_other_keys() {
  let mut state = RegistrationState::new();
  state.merge(fields(&[("country", "US")]));
  state.merge(fields(&[("city", "NYC")]));
  assert_eq!(state.len(), 2);
  assert_eq!(state.record().get_str("country"), Some("US"));
  assert_eq!(state.record().get_str("city"), Some("NYC"));

  state.merge(fields(&[("city", "Boston")]));
  assert_eq!(state.record().get_str("country"), Some("US"));
  assert_eq!(state.record().get_str("city"), Some("Boston"));

  let json = state.record().to_json().expect("json");
  assert_eq!(json, serde_json::json!({"city": "Boston", "country": "US"}));
}
