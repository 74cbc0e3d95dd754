/// Errors raised while interpreting persisted or user-supplied values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}
