//! Domain models and request payloads
//!
//! Required-field checks happen when converting a request into its
//! validated form. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod aluno;
pub mod disciplina;
pub mod nota;
pub mod media;

pub use validation::{Required, ValidationError};
pub use aluno::{Aluno, AlunoInput};
pub use disciplina::Disciplina;
pub use nota::{CreateNotaRequest, NewNota, Nota, NotaComDisciplina, NotaUpdate, UpdateNotaRequest};
pub use media::{Media, MEDIA_APROVACAO};
