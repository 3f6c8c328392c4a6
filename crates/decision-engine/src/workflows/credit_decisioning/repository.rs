use super::domain::{ApplicationId, ApplicationRecord, DecisionId, DecisionRecord};

/// Storage abstraction for submitted applications.
pub trait ApplicationRepository: Send + Sync {
    fn create(&self, record: ApplicationRecord) -> Result<ApplicationId, RepositoryError>;
    fn get(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}

/// Storage abstraction for computed decisions.
pub trait DecisionRepository: Send + Sync {
    fn create(&self, record: DecisionRecord) -> Result<DecisionId, RepositoryError>;
    fn get(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
