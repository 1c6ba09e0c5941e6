// Archivo: schema.rs
// Propósito: descripción declarativa de cada paso (`StepDefinition`) y el
// registro que los indexa (`StepRegistry`). Añadir un paso es añadir una
// entrada a la tabla, no escribir otro bloque de validación.
use crate::domain::{FieldErrors, FieldValue, NextStep, NormalizedFields, RawInput, StepId, ValidationResult};
use crate::errors::{Result, WizardError};
use crate::validators::{self, Validator};
use indexmap::IndexMap;
use log::debug;
use std::collections::{BTreeSet, HashSet};

/// Transformación aplicada al texto crudo antes de validar.
pub type Sanitizer = fn(&str) -> String;

/// Tipo de valor normalizado que produce un campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Tag,
    Secret,
}

/// Especificación de un campo dentro de un paso.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    /// Clave destino en el registro. `None` si el campo sólo alimenta una
    /// regla de unión (`JoinRule`).
    record_key: Option<String>,
    required: bool,
    validators: Vec<Validator>,
    sanitizer: Option<Sanitizer>,
    default: Option<String>,
    kind: ValueKind,
}

impl FieldSpec {
    fn new(name: &str, kind: ValueKind) -> Self {
        Self { name: name.to_string(),
               record_key: Some(name.to_string()),
               required: true,
               validators: Vec::new(),
               sanitizer: None,
               default: None,
               kind }
    }

    /// Campo de texto libre; la clave en el registro es el propio nombre.
    pub fn text(name: &str) -> Self {
        Self::new(name, ValueKind::Text)
    }

    /// Campo de selector (código de una lista cerrada).
    pub fn tag(name: &str) -> Self {
        Self::new(name, ValueKind::Tag)
    }

    /// Campo secreto (contraseña, PIN).
    pub fn secret(name: &str) -> Self {
        Self::new(name, ValueKind::Secret)
    }

    /// Guarda el valor bajo otra clave del registro.
    pub fn into_key(mut self, key: &str) -> Self {
        self.record_key = Some(key.to_string());
        self
    }

    /// El campo no se guarda por sí mismo; sólo lo consume un `JoinRule`.
    pub fn joined(mut self) -> Self {
        self.record_key = None;
        self
    }

    /// Exige un valor no vacío con el mensaje dado (se evalúa primero).
    pub fn required(mut self, message: &str) -> Self {
        self.required = true;
        self.validators.insert(0, validators::required(message));
        self
    }

    /// Un valor vacío es aceptado y no se ejecutan los validadores.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Añade un validador; se ejecutan en el orden en que se añaden.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Valor usado cuando la entrada llega vacía.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_key(&self) -> Option<&str> {
        self.record_key.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Texto efectivo: sanitizado y con el valor por defecto aplicado.
    pub fn prepare(&self, raw: Option<&str>) -> String {
        let raw = raw.unwrap_or("");
        let value = match self.sanitizer {
            Some(f) => f(raw),
            None => raw.to_string(),
        };
        match &self.default {
            Some(d) if value.trim().is_empty() => d.clone(),
            _ => value,
        }
    }

    /// Valida el texto ya preparado. `Err` lleva el mensaje del primer
    /// validador que falla. Un campo obligatorio vacío siempre falla: si
    /// ningún validador lo rechaza se usa el mensaje genérico
    /// `"<nombre> is required"`.
    pub fn check(&self, value: &str) -> std::result::Result<(), String> {
        if value.trim().is_empty() {
            if !self.required {
                return Ok(());
            }
            validators::run_validators(&self.validators, value)?;
            return Err(format!("{} is required", self.name));
        }
        validators::run_validators(&self.validators, value)
    }

    fn normalize(&self, value: String) -> FieldValue {
        match self.kind {
            ValueKind::Text => FieldValue::Text(value),
            ValueKind::Tag => FieldValue::Tag(value),
            ValueKind::Secret => FieldValue::secret(value),
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
         .field("name", &self.name)
         .field("record_key", &self.record_key)
         .field("required", &self.required)
         .field("validators", &self.validators.len())
         .field("kind", &self.kind)
         .finish()
    }
}

/// Combina varios campos en una sola clave (p.ej. nombre + apellido).
#[derive(Debug, Clone)]
pub struct JoinRule {
    pub key: String,
    pub sources: Vec<String>,
    pub separator: String,
}

impl JoinRule {
    pub fn new(key: &str, sources: &[&str], separator: &str) -> Self {
        Self { key: key.to_string(),
               sources: sources.iter().map(|s| s.to_string()).collect(),
               separator: separator.to_string() }
    }
}

/// Definición estática e inmutable de un paso.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    id: StepId,
    fields: Vec<FieldSpec>,
    joins: Vec<JoinRule>,
    next: NextStep,
}

impl StepDefinition {
    /// Crea un paso terminal sin campos; se completa con los builders.
    pub fn new(id: impl Into<StepId>) -> Self {
        Self { id: id.into(),
               fields: Vec::new(),
               joins: Vec::new(),
               next: NextStep::Terminal }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn join(mut self, rule: JoinRule) -> Self {
        self.joins.push(rule);
        self
    }

    /// Paso siguiente en la cadena.
    pub fn then(mut self, next: impl Into<StepId>) -> Self {
        self.next = NextStep::Step(next.into());
        self
    }

    /// Marca este paso como el último de la cadena.
    pub fn terminal(mut self) -> Self {
        self.next = NextStep::Terminal;
        self
    }

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn next(&self) -> &NextStep {
        &self.next
    }

    /// Claves del registro que produce este paso.
    pub fn output_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter_map(|f| f.record_key())
            .chain(self.joins.iter().map(|j| j.key.as_str()))
            .collect()
    }

    /// Validación exhaustiva: se evalúan todos los campos y se juntan todos
    /// los errores. Sólo sin errores se devuelven los valores normalizados.
    pub fn validate(&self, raw: &RawInput) -> ValidationResult {
        let mut errors = FieldErrors::new();
        let mut prepared: IndexMap<&str, String> = IndexMap::new();

        for spec in &self.fields {
            let value = spec.prepare(raw.get(spec.name()).map(String::as_str));
            if let Err(message) = spec.check(&value) {
                errors.insert(spec.name().to_string(), message);
            }
            prepared.insert(spec.name(), value);
        }

        if !errors.is_empty() {
            debug!("paso {}: {} campo(s) inválido(s)", self.id, errors.len());
            return ValidationResult::Invalid(errors);
        }

        let mut normalized = NormalizedFields::new();
        for spec in &self.fields {
            if let (Some(key), Some(value)) = (spec.record_key(), prepared.get(spec.name())) {
                normalized.insert(key.to_string(), spec.normalize(value.clone()));
            }
        }
        for rule in &self.joins {
            let parts: Vec<&str> = rule.sources
                                       .iter()
                                       .filter_map(|s| prepared.get(s.as_str()).map(String::as_str))
                                       .collect();
            let joined = parts.join(&rule.separator).trim().to_string();
            normalized.insert(rule.key.clone(), FieldValue::Text(joined));
        }
        debug!("paso {}: válido ({} clave(s))", self.id, normalized.len());
        ValidationResult::Valid(normalized)
    }
}

/// Registro de pasos: mapea `StepId` a su `StepDefinition` y garantiza que
/// la tabla forma una cadena simple desde la entrada hasta el terminal.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    entry: StepId,
    steps: IndexMap<StepId, StepDefinition>,
}

impl StepRegistry {
    /// Construye el registro y comprueba la cadena. Errores posibles
    /// (`MalformedChain`): tabla vacía, ids duplicados, entrada o siguiente
    /// paso desconocido, ciclos, pasos inalcanzables, claves repetidas
    /// dentro de un paso o reglas de unión con fuentes no declaradas.
    pub fn new(entry: impl Into<StepId>, definitions: Vec<StepDefinition>) -> Result<Self> {
        let entry = entry.into();
        if definitions.is_empty() {
            return Err(WizardError::MalformedChain("no hay pasos definidos".into()));
        }

        let mut steps = IndexMap::new();
        for def in definitions {
            check_step_shape(&def)?;
            let id = def.id.clone();
            if steps.insert(id.clone(), def).is_some() {
                return Err(WizardError::MalformedChain(format!("paso duplicado: {}", id)));
            }
        }
        if !steps.contains_key(&entry) {
            return Err(WizardError::MalformedChain(format!("paso de entrada desconocido: {}", entry)));
        }

        // Recorrer la cadena desde la entrada: debe terminar sin repetir pasos
        // y visitar todos los definidos.
        let mut visited: HashSet<&StepId> = HashSet::new();
        let mut current = &entry;
        loop {
            if !visited.insert(current) {
                return Err(WizardError::MalformedChain(format!("ciclo en el paso {}", current)));
            }
            let def = steps.get(current)
                           .ok_or_else(|| WizardError::MalformedChain(format!("paso siguiente desconocido: {}", current)))?;
            match &def.next {
                NextStep::Step(next) => current = next,
                NextStep::Terminal => break,
            }
        }
        if visited.len() != steps.len() {
            let orphan = steps.keys()
                              .find(|id| !visited.contains(id))
                              .map(|id| id.to_string())
                              .unwrap_or_default();
            return Err(WizardError::MalformedChain(format!("paso inalcanzable: {}", orphan)));
        }

        Ok(Self { entry, steps })
    }

    pub fn entry(&self) -> &StepId {
        &self.entry
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.steps.contains_key(id)
    }

    /// Busca la definición de un paso. `UnknownStep` si no existe.
    pub fn get(&self, id: &StepId) -> Result<&StepDefinition> {
        self.steps.get(id).ok_or_else(|| WizardError::UnknownStep(id.to_string()))
    }

    /// Valida la entrega `raw` para el paso `id`.
    pub fn validate(&self, id: &StepId, raw: &RawInput) -> Result<ValidationResult> {
        Ok(self.get(id)?.validate(raw))
    }

    /// Orden de la cadena, de la entrada al último paso.
    pub fn order(&self) -> Vec<&StepId> {
        let mut out = Vec::with_capacity(self.steps.len());
        let mut current = Some(&self.entry);
        while let Some(id) = current {
            out.push(id);
            current = match self.steps.get(id).map(|d| &d.next) {
                Some(NextStep::Step(next)) => Some(next),
                _ => None,
            };
        }
        out
    }

    /// Todas las claves que algún paso puede escribir en el registro.
    pub fn declared_keys(&self) -> BTreeSet<String> {
        self.steps
            .values()
            .flat_map(|d| d.output_keys())
            .map(str::to_string)
            .collect()
    }
}

fn check_step_shape(def: &StepDefinition) -> Result<()> {
    let mut keys = HashSet::new();
    for key in def.output_keys() {
        if !keys.insert(key) {
            return Err(WizardError::MalformedChain(format!("clave repetida '{}' en el paso {}", key, def.id)));
        }
    }
    let names: HashSet<&str> = def.fields.iter().map(FieldSpec::name).collect();
    for rule in &def.joins {
        if let Some(missing) = rule.sources.iter().find(|s| !names.contains(s.as_str())) {
            return Err(WizardError::MalformedChain(format!("la unión '{}' usa un campo no declarado: {}",
                                                           rule.key, missing)));
        }
    }
    Ok(())
}
