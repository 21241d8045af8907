//! Student (aluno) records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student row as stored in `alunos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Aluno {
    pub id: i64,
    pub nome: Option<String>,
    pub sobrenome: Option<String>,
    #[serde(rename = "dataNascimento")]
    #[sqlx(rename = "dataNascimento")]
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub status: Option<String>,
}

/// Mutable student fields, used for both create and full-row update.
///
/// No field is required: absent values are written as NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlunoInput {
    pub nome: Option<String>,
    pub sobrenome: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub status: Option<String>,
}

impl AlunoInput {
    /// Attach a generated id, producing the stored record.
    pub fn with_id(self, id: i64) -> Aluno {
        Aluno {
            id,
            nome: self.nome,
            sobrenome: self.sobrenome,
            data_nascimento: self.data_nascimento,
            cpf: self.cpf,
            status: self.status,
        }
    }
}
