//! Route handlers organized by resource

pub mod health;
pub mod alunos;
pub mod disciplinas;
pub mod notas;

use serde::{Deserialize, Serialize};

/// Confirmation body for updates and deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}
