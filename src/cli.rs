// Archivo: cli.rs
// Propósito: presentar el asistente de alta en la terminal. Pide cada campo
// del paso actual, muestra los errores por campo y deja volver al paso
// anterior con `:b` o abandonar con `:q`.

use crate::errors::Result;
use onboarding::{registration, RegistrationSummary};
use std::io::{BufRead, Write};
use wizard::{RawInput, SubmissionReceipt, SubmissionRepository, Transition, WizardService, WizardSession};

pub const BACK: &str = ":b";
pub const QUIT: &str = ":q";

/// Lee una linea; `None` en fin de entrada.
pub fn prompt<I: BufRead, O: Write>(input: &mut I, output: &mut O, label: &str) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

enum StepInput {
    Filled(RawInput),
    Back,
    Quit,
}

fn read_step<I: BufRead, O: Write>(input: &mut I,
                                   output: &mut O,
                                   fields: &[wizard::FieldSpec])
                                   -> Result<StepInput> {
    let mut raw = RawInput::new();
    for field in fields {
        if let Some(options) = registration::choices(field.name()) {
            for (code, label) in options {
                writeln!(output, "    {:<10} {}", code, label)?;
            }
        }
        let hint = if field.is_required() { "" } else { " (opcional)" };
        let line = match prompt(input, output, &format!("  {}{}: ", field.name(), hint))? {
            Some(line) => line,
            None => return Ok(StepInput::Quit),
        };
        match line.trim() {
            BACK => return Ok(StepInput::Back),
            QUIT => return Ok(StepInput::Quit),
            _ => {
                raw.insert(field.name().to_string(), line);
            }
        }
    }
    Ok(StepInput::Filled(raw))
}

/// Recorre el alta completa. Devuelve el recibo del envio, o `None` si el
/// usuario abandona antes de terminar.
pub fn run_wizard<R, I, O>(service: &WizardService<R>, input: &mut I, output: &mut O) -> Result<Option<SubmissionReceipt>>
    where R: SubmissionRepository + 'static,
          I: BufRead,
          O: Write
{
    let mut session = service.start_session();
    writeln!(output, "Alta de usuario (sesion {}). {} vuelve, {} sale.", session.id, BACK, QUIT)?;

    while let Some(step_id) = session.current_step().cloned() {
        let step = service.registry().get(&step_id)?;
        writeln!(output, "\n== {} ==", step_id)?;

        let raw = match read_step(input, output, step.fields())? {
            StepInput::Filled(raw) => raw,
            StepInput::Quit => {
                writeln!(output, "Alta cancelada.")?;
                tracing::info!(session = %session.id, step = %step_id, "alta abandonada");
                return Ok(None);
            }
            StepInput::Back => {
                match session.controller().history().last().cloned() {
                    Some(previous) => service.go_back(&mut session, &previous)?,
                    None => writeln!(output, "Ya estas en el primer paso.")?,
                }
                continue;
            }
        };

        match service.submit_step(&mut session, &step_id, &raw) {
            Ok(Transition::Rejected(errors)) => {
                for (field, message) in &errors {
                    writeln!(output, "  ✗ {}: {}", field, message)?;
                }
            }
            Ok(_) => {}
            // el paso final se acepto pero el envio fallo; se reintenta abajo
            Err(e) if session.awaiting_submission() => writeln!(output, "No se pudo enviar el registro: {}", e)?,
            Err(e) => return Err(e.into()),
        }
    }

    let receipt = match submit_with_retry(service, &mut session, input, output)? {
        Some(receipt) => receipt,
        None => return Ok(None),
    };
    let summary = RegistrationSummary::from_record(service.registry(), session.controller().record())?;
    writeln!(output, "\nRegistro enviado ({}):", receipt.submission_id)?;
    writeln!(output,
             "{}",
             serde_json::to_string_pretty(&summary).map_err(onboarding::OnboardingError::from)?)?;
    Ok(Some(receipt))
}

/// Reintenta `finish` mientras el usuario lo pida. `None` si desiste.
fn submit_with_retry<R, I, O>(service: &WizardService<R>,
                              session: &mut WizardSession,
                              input: &mut I,
                              output: &mut O)
                              -> Result<Option<SubmissionReceipt>>
    where R: SubmissionRepository + 'static,
          I: BufRead,
          O: Write
{
    while session.awaiting_submission() {
        let answer = prompt(input, output, "¿Reintentar el envio? (s/n): ")?;
        if !matches!(answer.as_deref().map(str::trim), Some("s") | Some("S")) {
            writeln!(output, "Registro no enviado.")?;
            tracing::warn!(session = %session.id, "registro completo sin enviar");
            return Ok(None);
        }
        if let Err(e) = service.finish(session) {
            writeln!(output, "No se pudo enviar el registro: {}", e)?;
        }
    }
    Ok(session.receipt().cloned())
}
