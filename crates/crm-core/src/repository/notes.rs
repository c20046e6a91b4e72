//! [`NotesRepo`]: [`NotesRepository`] over any [`CustomerContext`].

use super::{NotesRepository, settle_write};
use crate::{
  Outcome,
  context::CustomerContext,
  entity::Note,
  model::{NewNote, NoteDetail},
};

/// Notes repository bound to one context handle.
#[derive(Debug, Clone)]
pub struct NotesRepo<C> {
  context: C,
}

impl<C: CustomerContext> NotesRepo<C> {
  pub fn new(context: C) -> Self { Self { context } }

  async fn exists(&self, id: i32) -> Result<bool, C::Error> {
    Ok(self.context.find_note(id).await?.is_some())
  }
}

impl<C: CustomerContext> NotesRepository for NotesRepo<C> {
  type Error = C::Error;

  async fn note_detail(&self, id: i32) -> Result<Outcome<NoteDetail>, C::Error> {
    let note = self.context.find_note(id).await?;
    Ok(note.as_ref().map(NoteDetail::from).into())
  }

  async fn update_note(&self, detail: NoteDetail) -> Result<Outcome, C::Error> {
    let id = detail.id;
    let Some(mut note) = self.context.find_note(id).await? else {
      return Ok(Outcome::NotFound);
    };
    note.content = detail.content;

    let saved = self.context.save_note(note).await;
    let outcome = settle_write(saved, || self.exists(id)).await?;

    if outcome.is_not_found() {
      tracing::warn!(note_id = id, "note removed during update");
    }

    Ok(outcome.map(|_| ()))
  }

  async fn add_note(&self, new_note: NewNote) -> Result<NoteDetail, C::Error> {
    let note = self.context.add_note(Note::from_new(new_note)).await?;
    tracing::debug!(note_id = note.id, customer_id = note.customer_id, "note added");
    Ok(NoteDetail::from(&note))
  }
}
