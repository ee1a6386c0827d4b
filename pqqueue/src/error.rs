//! Types d'erreurs pour pqqueue

/// Erreurs de gestion des files partagées
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entrée invalide côté client (réf vide, nom trop long, champs manquants)
    #[error("{0}")]
    InvalidInput(String),

    /// Aucune file ne correspond à la référence fournie
    #[error("Queue not found: {0}")]
    QueueNotFound(String),

    /// L'espace des codes de partage est épuisé (après plusieurs tirages)
    #[error("Could not allocate a unique queue code")]
    CodeSpaceExhausted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour pqqueue
pub type Result<T> = std::result::Result<T, Error>;
