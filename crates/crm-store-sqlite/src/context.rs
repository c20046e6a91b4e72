//! [`SqliteContext`]: the SQLite implementation of [`CustomerContext`].

use std::path::Path;

use crm_core::{
  context::CustomerContext,
  entity::{Customer, Note},
  timestamp,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    CUSTOMER_COLUMNS, NOTE_COLUMNS, RawCustomer, encode_status, read_customer_row,
    read_note_row, row_id,
  },
  schema::SCHEMA,
};

// ─── Context ─────────────────────────────────────────────────────────────────

/// A CRM store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection handle is reference-counted, so a
/// clone per request is the normal way to hand the store to a repository.
#[derive(Clone)]
pub struct SqliteContext {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteContext {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let context = Self { conn };
    context.init_schema().await?;
    Ok(context)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let context = Self { conn };
    context.init_schema().await?;
    Ok(context)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl std::fmt::Debug for SqliteContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteContext").finish_non_exhaustive()
  }
}

// ─── CustomerContext impl ────────────────────────────────────────────────────

impl CustomerContext for SqliteContext {
  type Error = Error;

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn customers(&self) -> Result<Vec<Customer>> {
    let raws: Vec<RawCustomer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id"))?;
        let rows = stmt
          .query_map([], read_customer_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCustomer::into_entity).collect()
  }

  async fn find_customer(&self, id: i32) -> Result<Option<Customer>> {
    let raw: Option<RawCustomer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"),
              rusqlite::params![id],
              read_customer_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCustomer::into_entity).transpose()
  }

  async fn add_customer(&self, customer: Customer) -> Result<Customer> {
    let first_name  = customer.first_name.clone();
    let last_name   = customer.last_name.clone();
    let address     = customer.address.clone();
    let email       = customer.email.clone();
    let company     = customer.company.clone();
    let status_str  = encode_status(customer.status);
    let created_str = timestamp::format(customer.created);

    let rowid = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO customers (
             first_name, last_name, address, email, company, status, created
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            first_name,
            last_name,
            address,
            email,
            company,
            status_str,
            created_str,
          ],
        )?;
        commit_if_addressable(tx)
      })
      .await?;

    Ok(Customer { id: row_id(rowid)?, row_version: 1, ..customer })
  }

  async fn save_customer(&self, customer: Customer) -> Result<Customer> {
    let id          = customer.id;
    let row_version = customer.row_version;
    let first_name  = customer.first_name.clone();
    let last_name   = customer.last_name.clone();
    let address     = customer.address.clone();
    let email       = customer.email.clone();
    let company     = customer.company.clone();
    let status_str  = encode_status(customer.status);
    let created_str = timestamp::format(customer.created);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE customers SET
             first_name = ?1, last_name = ?2, address = ?3, email = ?4,
             company = ?5, status = ?6, created = ?7,
             row_version = row_version + 1
           WHERE id = ?8 AND row_version = ?9",
          rusqlite::params![
            first_name,
            last_name,
            address,
            email,
            company,
            status_str,
            created_str,
            id,
            row_version,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::Concurrency { entity: "customer", id });
    }

    Ok(Customer { row_version: row_version + 1, ..customer })
  }

  async fn remove_customer(&self, customer: Customer) -> Result<()> {
    let Customer { id, row_version, .. } = customer;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM customers WHERE id = ?1 AND row_version = ?2",
          rusqlite::params![id, row_version],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::Concurrency { entity: "customer", id });
    }

    Ok(())
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn notes_for(&self, customer_id: i32) -> Result<Vec<Note>> {
    let notes = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTE_COLUMNS} FROM notes WHERE customer_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![customer_id], read_note_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(notes)
  }

  async fn find_note(&self, id: i32) -> Result<Option<Note>> {
    let note = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
              rusqlite::params![id],
              read_note_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(note)
  }

  async fn add_note(&self, note: Note) -> Result<Note> {
    let content     = note.content.clone();
    let customer_id = note.customer_id;

    let rowid = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO notes (content, customer_id) VALUES (?1, ?2)",
          rusqlite::params![content, customer_id],
        )?;
        commit_if_addressable(tx)
      })
      .await?;

    Ok(Note { id: row_id(rowid)?, row_version: 1, ..note })
  }

  async fn save_note(&self, note: Note) -> Result<Note> {
    let id          = note.id;
    let row_version = note.row_version;
    let content     = note.content.clone();
    let customer_id = note.customer_id;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notes SET
             content = ?1, customer_id = ?2, row_version = row_version + 1
           WHERE id = ?3 AND row_version = ?4",
          rusqlite::params![content, customer_id, id, row_version],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::Concurrency { entity: "note", id });
    }

    Ok(Note { row_version: row_version + 1, ..note })
  }
}

/// Commit an insert only if its row id fits an `i32`, and return the id.
/// Otherwise the dropped transaction rolls the row back and the caller's
/// `row_id` check reports [`Error::IdOutOfRange`].
fn commit_if_addressable(
  tx: rusqlite::Transaction<'_>,
) -> Result<i64, tokio_rusqlite::Error> {
  let rowid = tx.last_insert_rowid();
  if i32::try_from(rowid).is_ok() {
    tx.commit()?;
  }
  Ok(rowid)
}
