//! Grade (nota) records and write payloads
//!
//! Write payloads arrive with every field optional so that a missing field
//! becomes a validation error instead of a JSON rejection. A field counts as
//! present when it is non-null; `0` is a valid value everywhere.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{Required, ValidationError};

/// Grade row as stored in `notas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Nota {
    pub id: i64,
    pub aluno_id: i64,
    pub disciplina_id: i64,
    pub trimestre: i32,
    pub nota: f64,
    pub descricao: Option<String>,
}

/// Grade joined with its subject's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NotaComDisciplina {
    pub id: i64,
    pub aluno_id: i64,
    pub disciplina_id: i64,
    pub disciplina: String,
    pub trimestre: i32,
    pub nota: f64,
    pub descricao: Option<String>,
}

/// POST /notas body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNotaRequest {
    pub aluno_id: Option<i64>,
    pub disciplina_id: Option<i64>,
    pub trimestre: Option<i32>,
    pub nota: Option<f64>,
    pub descricao: Option<String>,
}

/// PUT /notas/{id} body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotaRequest {
    pub disciplina_id: Option<i64>,
    pub trimestre: Option<i32>,
    pub nota: Option<f64>,
    pub descricao: Option<String>,
}

/// Validated grade ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewNota {
    pub aluno_id: i64,
    pub disciplina_id: i64,
    pub trimestre: i32,
    pub nota: f64,
    pub descricao: Option<String>,
}

impl NewNota {
    pub fn with_id(self, id: i64) -> Nota {
        Nota {
            id,
            aluno_id: self.aluno_id,
            disciplina_id: self.disciplina_id,
            trimestre: self.trimestre,
            nota: self.nota,
            descricao: self.descricao,
        }
    }
}

/// Validated full overwrite of a grade's mutable fields
#[derive(Debug, Clone, PartialEq)]
pub struct NotaUpdate {
    pub disciplina_id: i64,
    pub trimestre: i32,
    pub nota: f64,
    pub descricao: Option<String>,
}

/// Empty descriptions are stored as NULL.
fn normalize_descricao(descricao: Option<String>) -> Option<String> {
    descricao.filter(|d| !d.is_empty())
}

impl CreateNotaRequest {
    pub fn validate(self) -> Result<NewNota, ValidationError> {
        let mut required = Required::new();
        let aluno_id = required.take("aluno_id", self.aluno_id);
        let disciplina_id = required.take("disciplina_id", self.disciplina_id);
        let trimestre = required.take("trimestre", self.trimestre);
        let nota = required.take("nota", self.nota);
        required.finish()?;

        Ok(NewNota {
            aluno_id,
            disciplina_id,
            trimestre,
            nota,
            descricao: normalize_descricao(self.descricao),
        })
    }
}

impl UpdateNotaRequest {
    pub fn validate(self) -> Result<NotaUpdate, ValidationError> {
        let mut required = Required::new();
        let disciplina_id = required.take("disciplina_id", self.disciplina_id);
        let trimestre = required.take("trimestre", self.trimestre);
        let nota = required.take("nota", self.nota);
        required.finish()?;

        Ok(NotaUpdate {
            disciplina_id,
            trimestre,
            nota,
            descricao: normalize_descricao(self.descricao),
        })
    }
}
