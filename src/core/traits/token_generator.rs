/// Port for producing fresh API key material.
pub trait TokenGenerator: Send + Sync {
    /// A new bearer secret, prefixed with the scheme tag.
    fn secret(&self) -> String;

    /// A new record identifier.
    fn key_id(&self) -> String;
}
