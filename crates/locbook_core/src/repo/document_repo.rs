//! Named-collection document storage and its SQLite implementation.
//!
//! # Responsibility
//! - Store serde documents as JSON bodies grouped by collection name.
//! - Assign ids on insert.
//!
//! # Invariants
//! - `query` returns documents in insertion order.
//! - Missing ids on `get`/`put`/`remove` surface as `RepoError::NotFound`.
//! - Stored bodies that fail to decode are rejected, never skipped.
//!
//! # See also
//! - `service::location_service`, which owns the `locs` collection.

use crate::db::DbError;
use crate::util::make_id;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for document persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    NotFound { collection: String, id: String },
    Db(DbError),
    /// Stored or supplied data violates the document contract.
    InvalidData(String),
    Serialization(serde_json::Error),
}

impl RepoError {
    fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "document `{id}` not found in `{collection}`")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid document data: {message}"),
            Self::Serialization(err) => write!(f, "document serialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// A record that can live in a document collection.
pub trait Document: Serialize + DeserializeOwned {
    /// Current id, `None` for unsaved documents.
    fn document_id(&self) -> Option<&str>;
    fn assign_document_id(&mut self, id: String);
}

/// Generic key-value store over named collections.
pub trait DocumentRepository {
    /// Returns every document in `collection`, oldest insert first.
    fn query<T: Document>(&self, collection: &str) -> RepoResult<Vec<T>>;
    fn get<T: Document>(&self, collection: &str, id: &str) -> RepoResult<T>;
    /// Inserts `document` under a freshly generated id and returns it.
    fn post<T: Document>(&self, collection: &str, document: T) -> RepoResult<T>;
    /// Replaces the stored body for `document`'s id.
    fn put<T: Document>(&self, collection: &str, document: T) -> RepoResult<T>;
    fn remove(&self, collection: &str, id: &str) -> RepoResult<()>;
    /// Replaces the whole collection in one transaction.
    fn save_all<T: Document>(&self, collection: &str, documents: &[T]) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn query<T: Document>(&self, collection: &str) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body
             FROM documents
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([collection])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let body: String = row.get("body")?;
            documents.push(decode_body(collection, &id, &body)?);
        }

        Ok(documents)
    }

    fn get<T: Document>(&self, collection: &str, id: &str) -> RepoResult<T> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => decode_body(collection, id, &body),
            None => Err(RepoError::not_found(collection, id)),
        }
    }

    fn post<T: Document>(&self, collection: &str, mut document: T) -> RepoResult<T> {
        let id = make_id();
        document.assign_document_id(id.clone());
        let body = serde_json::to_string(&document)?;

        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![collection, id, body],
        )?;

        Ok(document)
    }

    fn put<T: Document>(&self, collection: &str, document: T) -> RepoResult<T> {
        let id = require_id(collection, &document)?;
        let body = serde_json::to_string(&document)?;

        let changed = self.conn.execute(
            "UPDATE documents SET body = ?3 WHERE collection = ?1 AND id = ?2;",
            params![collection, id, body],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(collection, id));
        }

        Ok(document)
    }

    fn remove(&self, collection: &str, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![collection, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(collection, id));
        }

        Ok(())
    }

    fn save_all<T: Document>(&self, collection: &str, documents: &[T]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM documents WHERE collection = ?1;", [collection])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            )?;
            for document in documents {
                let id = require_id(collection, document)?;
                let body = serde_json::to_string(document)?;
                insert.execute(params![collection, id, body])?;
            }
        }
        tx.commit()?;

        Ok(())
    }
}

fn require_id<'doc, T: Document>(collection: &str, document: &'doc T) -> RepoResult<&'doc str> {
    document
        .document_id()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RepoError::InvalidData(format!("document in `{collection}` has no id")))
}

fn decode_body<T: Document>(collection: &str, id: &str, body: &str) -> RepoResult<T> {
    serde_json::from_str(body).map_err(|err| {
        RepoError::InvalidData(format!(
            "undecodable body for `{id}` in `{collection}`: {err}"
        ))
    })
}
