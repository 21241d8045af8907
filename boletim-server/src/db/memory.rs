//! In-memory store
//!
//! Same contract as [`super::MySqlStore`]. There is no engine underneath to
//! enforce foreign keys, so reference checks that MySQL performs are done
//! here explicitly and reported the same way (`DbError::Conflict`).

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repos::{ConflictKind, DbError};
use super::store::SchoolStore;
use crate::models::{Aluno, AlunoInput, Disciplina, NewNota, Nota, NotaComDisciplina, NotaUpdate};

#[derive(Default)]
struct Tables {
    alunos: BTreeMap<i64, Aluno>,
    disciplinas: BTreeMap<i64, Disciplina>,
    notas: BTreeMap<i64, Nota>,
    last_aluno_id: i64,
    last_nota_id: i64,
}

impl Tables {
    fn check_reference(&self, table: &str, exists: bool, id: i64) -> Result<(), DbError> {
        if exists {
            Ok(())
        } else {
            Err(DbError::Conflict {
                kind: ConflictKind::Reference,
                detail: format!("{} {} does not exist", table, id),
            })
        }
    }
}

/// Store holding all rows in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

/// Subjects an in-memory server starts with when no seed file is given
pub const DEFAULT_DISCIPLINAS: &[(i64, &str)] = &[
    (1, "Matemática"),
    (2, "Português"),
    (3, "Ciências"),
    (4, "História"),
    (5, "Geografia"),
    (6, "Inglês"),
    (7, "Artes"),
    (8, "Educação Física"),
];

/// [`DEFAULT_DISCIPLINAS`] as records
pub fn default_disciplinas() -> Vec<Disciplina> {
    DEFAULT_DISCIPLINAS
        .iter()
        .map(|(id, nome)| Disciplina {
            id: *id,
            nome: (*nome).to_owned(),
        })
        .collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with subjects, so grades can reference them.
    pub fn with_disciplinas(disciplinas: impl IntoIterator<Item = Disciplina>) -> Self {
        let tables = Tables {
            disciplinas: disciplinas.into_iter().map(|d| (d.id, d)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Insert or replace a subject. Subjects have no write endpoint, so this
    /// is how they get into the store.
    pub async fn insert_disciplina(&self, disciplina: Disciplina) {
        self.tables
            .write()
            .await
            .disciplinas
            .insert(disciplina.id, disciplina);
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn create_aluno(&self, input: AlunoInput) -> Result<Aluno, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_aluno_id += 1;
        let aluno = input.with_id(tables.last_aluno_id);
        tables.alunos.insert(aluno.id, aluno.clone());
        Ok(aluno)
    }

    async fn list_alunos(&self) -> Result<Vec<Aluno>, DbError> {
        Ok(self.tables.read().await.alunos.values().cloned().collect())
    }

    async fn get_aluno(&self, id: i64) -> Result<Aluno, DbError> {
        self.tables
            .read()
            .await
            .alunos
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound {
                resource: "aluno",
                id,
            })
    }

    async fn update_aluno(&self, id: i64, input: AlunoInput) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        match tables.alunos.get_mut(&id) {
            Some(aluno) => {
                *aluno = input.with_id(id);
                Ok(())
            }
            None => Err(DbError::NotFound {
                resource: "aluno",
                id,
            }),
        }
    }

    async fn delete_aluno(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.alunos.contains_key(&id) {
            return Err(DbError::NotFound {
                resource: "aluno",
                id,
            });
        }

        // Matches ON DELETE RESTRICT on notas.aluno_id
        if tables.notas.values().any(|n| n.aluno_id == id) {
            return Err(DbError::Conflict {
                kind: ConflictKind::Reference,
                detail: format!("aluno {} is referenced by notas", id),
            });
        }

        tables.alunos.remove(&id);
        Ok(())
    }

    async fn list_disciplinas(&self) -> Result<Vec<Disciplina>, DbError> {
        Ok(self.tables.read().await.disciplinas.values().cloned().collect())
    }

    async fn list_notas_for_aluno(&self, aluno_id: i64) -> Result<Vec<NotaComDisciplina>, DbError> {
        let tables = self.tables.read().await;
        let mut notas: Vec<NotaComDisciplina> = tables
            .notas
            .values()
            .filter(|n| n.aluno_id == aluno_id)
            .filter_map(|n| {
                let disciplina = tables.disciplinas.get(&n.disciplina_id)?;
                Some(NotaComDisciplina {
                    id: n.id,
                    aluno_id: n.aluno_id,
                    disciplina_id: n.disciplina_id,
                    disciplina: disciplina.nome.clone(),
                    trimestre: n.trimestre,
                    nota: n.nota,
                    descricao: n.descricao.clone(),
                })
            })
            .collect();

        notas.sort_by_key(|n| n.trimestre);
        Ok(notas)
    }

    async fn create_nota(&self, nota: NewNota) -> Result<Nota, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_reference("aluno", tables.alunos.contains_key(&nota.aluno_id), nota.aluno_id)?;
        tables.check_reference(
            "disciplina",
            tables.disciplinas.contains_key(&nota.disciplina_id),
            nota.disciplina_id,
        )?;

        tables.last_nota_id += 1;
        let nota = nota.with_id(tables.last_nota_id);
        tables.notas.insert(nota.id, nota.clone());
        Ok(nota)
    }

    async fn update_nota(&self, id: i64, update: NotaUpdate) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.notas.contains_key(&id) {
            return Err(DbError::NotFound {
                resource: "nota",
                id,
            });
        }
        tables.check_reference(
            "disciplina",
            tables.disciplinas.contains_key(&update.disciplina_id),
            update.disciplina_id,
        )?;

        if let Some(nota) = tables.notas.get_mut(&id) {
            nota.disciplina_id = update.disciplina_id;
            nota.trimestre = update.trimestre;
            nota.nota = update.nota;
            nota.descricao = update.descricao;
        }
        Ok(())
    }

    async fn delete_nota(&self, id: i64) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .notas
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound {
                resource: "nota",
                id,
            })
    }

    async fn nota_values_for_aluno(&self, aluno_id: i64) -> Result<Vec<f64>, DbError> {
        Ok(self
            .tables
            .read()
            .await
            .notas
            .values()
            .filter(|n| n.aluno_id == aluno_id)
            .map(|n| n.nota)
            .collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
