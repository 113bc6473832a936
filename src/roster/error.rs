use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// A button value that names none of the three rooms.
    #[error("there is no room called {0:?}")]
    InvalidRoom(String),

    /// The poll was never created here, or has since been evicted.
    #[error("room poll {0} not found")]
    RosterNotFound(Uuid),
}
