#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Campo obrigatório não preenchido: {0}")]
    MissingRequiredFields(&'static str),
    #[error("Pelo menos um medicamento é necessário")]
    NoMedication,
    #[error("CPF inválido")]
    InvalidCpf,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to write document: {0}")]
    Template(#[from] std::fmt::Error),
}

impl CoreError {
    /// Whether the error was caused by the caller's input rather than by the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MissingRequiredFields(_) | CoreError::NoMedication | CoreError::InvalidCpf
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
