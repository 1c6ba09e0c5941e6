use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wizard::{
  FieldSpec, InMemorySubmissionRepository, NavigationEvent, RawInput, RecordingNavigator, StepDefinition, StepId,
  StepRegistry, SubmissionEnvelope, SubmissionReceipt, SubmissionRepository, Transition, WizardError, WizardService,
};

/// Repositorio que rechaza los primeros `failures` envios y luego delega en
/// el de memoria.
struct FlakyRepository {
  failures: Mutex<usize>,
  inner: InMemorySubmissionRepository,
}

impl FlakyRepository {
  fn failing(times: usize) -> Self {
    FlakyRepository { failures: Mutex::new(times),
                      inner:    InMemorySubmissionRepository::new() }
  }
}

impl SubmissionRepository for FlakyRepository {
  fn submit(&self, envelope: &SubmissionEnvelope) -> wizard::Result<SubmissionReceipt> {
    let mut left = self.failures.lock().unwrap();
    if *left > 0 {
      *left -= 1;
      return Err(WizardError::Submission("backend no disponible".into()));
    }
    self.inner.submit(envelope)
  }

  fn find_receipt(&self, session_id: &Uuid) -> wizard::Result<Option<SubmissionReceipt>> {
    self.inner.find_receipt(session_id)
  }
}

fn raw(pairs: &[(&str, &str)]) -> RawInput {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn registry() -> Arc<StepRegistry> {
  let a = StepDefinition::new("A").field(FieldSpec::text("country").required("Country is required"))
                                  .then("B");
  let b = StepDefinition::new("B").field(FieldSpec::tag("risk_tolerance").default_value("MEDIUM"))
                                  .terminal();
  Arc::new(StepRegistry::new("A", vec![a, b]).expect("registry"))
}

#[test]
fn completed_session_is_handed_to_the_repository() {
  let repo = Arc::new(InMemorySubmissionRepository::new());
  let nav = Arc::new(RecordingNavigator::new());
  let service = WizardService::new(repo.clone(), registry()).with_navigator(nav.clone());

  let mut session = service.start_session();
  assert_eq!(session.current_step(), Some(&StepId::from("A")));

  let rejected = service.submit_step(&mut session, &"A".into(), &raw(&[])).expect("submit");
  assert!(matches!(rejected, Transition::Rejected(_)));

  service.submit_step(&mut session, &"A".into(), &raw(&[("country", "US")])).expect("submit A");
  let done = service.submit_step(&mut session, &"B".into(), &raw(&[])).expect("submit B");
  assert_eq!(done, Transition::Completed { last: "B".into() });

  let receipt = session.receipt().cloned().expect("receipt");
  assert_eq!(receipt.session_id, session.id);
  let stored = repo.record_for(&session.id).unwrap().expect("stored");
  assert_eq!(stored.get_str("country"), Some("US"));
  assert_eq!(stored.get_str("risk_tolerance"), Some("MEDIUM"));

  // finish es idempotente
  let again = service.finish(&mut session).expect("finish");
  assert_eq!(again, receipt);
  assert_eq!(repo.count().unwrap(), 1);
  assert_eq!(repo.find_receipt(&session.id).unwrap(), Some(receipt.clone()));

  assert_eq!(nav.events(),
             vec![NavigationEvent::Navigate(session.id, "A".into()),
                  NavigationEvent::Navigate(session.id, "B".into()),
                  NavigationEvent::Completed(session.id, receipt.submission_id)]);
}

#[test]
fn go_back_notifies_the_navigator() {
  let repo = Arc::new(InMemorySubmissionRepository::new());
  let nav = Arc::new(RecordingNavigator::new());
  let service = WizardService::new(repo, registry()).with_navigator(nav.clone());
  let mut session = service.start_session();
  service.submit_step(&mut session, &"A".into(), &raw(&[("country", "US")])).unwrap();
  service.go_back(&mut session, &"A".into()).expect("back");
  assert_eq!(session.current_step(), Some(&StepId::from("A")));
  assert_eq!(nav.events().last(), Some(&NavigationEvent::Navigate(session.id, "A".into())));
}

#[test]
fn finish_requires_a_completed_session() {
  let service = WizardService::new(Arc::new(InMemorySubmissionRepository::new()), registry());
  let mut session = service.start_session();
  assert!(matches!(service.finish(&mut session), Err(WizardError::Submission(_))));
}

#[test]
fn sessions_do_not_share_state() {
  let service = WizardService::new(Arc::new(InMemorySubmissionRepository::new()), registry());
  let mut one = service.start_session();
  let two = service.start_session();
  service.submit_step(&mut one, &"A".into(), &raw(&[("country", "US")])).unwrap();
  assert_eq!(one.controller().record().len(), 1);
  assert!(two.controller().record().is_empty());
  assert_ne!(one.id, two.id);
}

#[test]
fn rejected_submission_keeps_the_session_finished_and_retryable() {
  let repo = Arc::new(FlakyRepository::failing(1));
  let nav = Arc::new(RecordingNavigator::new());
  let service = WizardService::new(repo.clone(), registry()).with_navigator(nav.clone());
  let mut session = service.start_session();

  service.submit_step(&mut session, &"A".into(), &raw(&[("country", "US")])).unwrap();
  let err = service.submit_step(&mut session, &"B".into(), &raw(&[])).unwrap_err();
  assert!(matches!(err, WizardError::Submission(_)));

  assert!(session.is_complete());
  assert!(session.receipt().is_none());
  assert!(session.awaiting_submission());
  assert!(!nav.events().iter().any(|e| matches!(e, NavigationEvent::Completed(..))));
  assert_eq!(repo.inner.count().unwrap(), 0);

  let receipt = service.finish(&mut session).expect("retry");
  assert_eq!(receipt.session_id, session.id);
  assert!(!session.awaiting_submission());
  assert_eq!(repo.inner.record_for(&session.id).unwrap().and_then(|r| r.get_str("country").map(String::from)),
             Some("US".to_string()));
  assert_eq!(nav.events().last(), Some(&NavigationEvent::Completed(session.id, receipt.submission_id)));
}
