// Archivo: validators.rs
// Propósito: validadores puros de un campo. Cada constructor recibe el
// mensaje que se muestra al usuario y devuelve un `Validator`; la ausencia
// de error (`Ok(())`) significa que el valor es válido.
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Mensaje de error legible por humanos.
pub type ValidationError = String;

/// Predicado con mensaje sobre el texto crudo de un campo.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Longitud exacta del PIN.
pub const PIN_LENGTH: usize = 6;

/// Longitud mínima de una contraseña fuerte.
pub const STRONG_PASSWORD_MIN: usize = 8;

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex is valid"));

/// Ejecuta `validators` en orden y devuelve el primer error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

fn check(ok: bool, message: &str) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Falla si el valor está vacío o sólo contiene espacios.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(!value.trim().is_empty(), &message))
}

/// Forma de email laxa: contiene `@`.
pub fn contains_at(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(value.contains('@'), &message))
}

/// Forma de email algo más estricta: contiene `@` y `.`.
pub fn email_shape(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(value.contains('@') && value.contains('.'), &message))
}

/// Fecha con forma `YYYY-MM-DD` (sólo la forma, no el calendario).
pub fn date_shape(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(DATE_SHAPE.is_match(value), &message))
}

/// Longitud mínima en caracteres.
pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(value.chars().count() >= min_len, &message))
}

/// Contraseña fuerte: ver [`PasswordRules`].
pub fn password_strength(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| check(PasswordRules::check(value).all(), &message))
}

/// PIN de exactamente seis dígitos ASCII.
pub fn pin(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &str| {
        check(value.len() == PIN_LENGTH && value.bytes().all(|b| b.is_ascii_digit()), &message)
    })
}

/// El valor debe ser uno de los códigos permitidos (comparación exacta).
pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Validator
    where I: IntoIterator<Item = S>,
          S: Into<String>
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    let message = message.into();
    Arc::new(move |value: &str| check(allowed.iter().any(|a| a == value), &message))
}

/// Elimina todo lo que no sea dígito y trunca a `PIN_LENGTH`.
pub fn sanitize_pin(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(PIN_LENGTH).collect()
}

/// Resultado individual de cada regla de contraseña fuerte, útil para
/// pintar la lista de requisitos en la pantalla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordRules {
    pub min_length: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordRules {
    /// Evalúa las cuatro reglas sobre `password`.
    pub fn check(password: &str) -> Self {
        Self { min_length: password.chars().count() >= STRONG_PASSWORD_MIN,
               uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
               digit: password.chars().any(|c| c.is_ascii_digit()),
               special: password.chars().any(|c| !c.is_ascii_alphanumeric()) }
    }

    pub fn all(&self) -> bool {
        self.min_length && self.uppercase && self.digit && self.special
    }

    /// Nombres de las reglas que fallan, en orden fijo.
    pub fn failing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.min_length {
            out.push("length");
        }
        if !self.uppercase {
            out.push("uppercase");
        }
        if !self.digit {
            out.push("number");
        }
        if !self.special {
            out.push("special");
        }
        out
    }
}
