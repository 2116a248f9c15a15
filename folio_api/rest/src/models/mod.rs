use serde::Serialize;

pub mod contact;

/// Body of every response of the contact endpoint, successful or not.
#[derive(Debug, Serialize)]
pub struct ApiStatus<M> {
    pub success: bool,
    pub message: M,
}
