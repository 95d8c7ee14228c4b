use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Contract is paused")]
    Paused {},

    #[error("Invalid points operation: {reason}")]
    InvalidPoints { reason: String },

    #[error("Record not found")]
    NotFound {},
}

impl ContractError {
    /// Stable numeric code surfaced to indexers and clients.
    pub fn code(&self) -> u64 {
        match self {
            ContractError::Std(_) => 500,
            ContractError::Unauthorized {} => 100,
            ContractError::Paused {} => 101,
            ContractError::InvalidPoints { .. } => 103,
            ContractError::NotFound {} => 404,
        }
    }
}
