use thiserror::Error;

/// Errores de la capa de aplicacion (binario, servidor HTTP y terminal).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuracion invalida: {0}")]
    Config(String),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wizard(#[from] wizard::WizardError),

    #[error(transparent)]
    Onboarding(#[from] onboarding::OnboardingError),

    #[error(transparent)]
    Connectivity(#[from] bonsai_persistence::ConnectivityError),
}

pub type Result<T> = std::result::Result<T, AppError>;
