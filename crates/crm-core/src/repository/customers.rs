//! [`CustomerRepo`]: [`CustomerRepository`] over any [`CustomerContext`].

use chrono::Utc;

use super::{CustomerRepository, settle_write};
use crate::{
  Outcome,
  context::CustomerContext,
  entity::Customer,
  model::{CustomerDetail, CustomerSummary, NoteDetail, Status},
};

/// Customer repository bound to one context handle.
#[derive(Debug, Clone)]
pub struct CustomerRepo<C> {
  context: C,
}

impl<C: CustomerContext> CustomerRepo<C> {
  pub fn new(context: C) -> Self { Self { context } }

  async fn exists(&self, id: i32) -> Result<bool, C::Error> {
    Ok(self.context.find_customer(id).await?.is_some())
  }
}

impl<C: CustomerContext> CustomerRepository for CustomerRepo<C> {
  type Error = C::Error;

  async fn customer_summaries(&self) -> Result<Vec<CustomerSummary>, C::Error> {
    let customers = self.context.customers().await?;
    Ok(customers.iter().map(CustomerSummary::from).collect())
  }

  async fn customer_detail(
    &self,
    id: i32,
  ) -> Result<Outcome<CustomerDetail>, C::Error> {
    let customer = self.context.find_customer(id).await?;
    Ok(customer.as_ref().map(CustomerDetail::from).into())
  }

  async fn customer_notes(
    &self,
    customer_id: i32,
  ) -> Result<Vec<NoteDetail>, C::Error> {
    let notes = self.context.notes_for(customer_id).await?;
    Ok(notes.iter().map(NoteDetail::from).collect())
  }

  async fn add_customer(
    &self,
    detail: CustomerDetail,
  ) -> Result<CustomerDetail, C::Error> {
    let mut customer = Customer::from_detail(detail);
    customer.created = Utc::now();

    let customer = self.context.add_customer(customer).await?;
    tracing::debug!(customer_id = customer.id, "customer added");

    Ok(CustomerDetail::from(&customer))
  }

  async fn update_customer_status(
    &self,
    id: i32,
    status: Status,
  ) -> Result<Outcome, C::Error> {
    let Some(mut customer) = self.context.find_customer(id).await? else {
      return Ok(Outcome::NotFound);
    };
    customer.status = status;

    let saved = self.context.save_customer(customer).await;
    let outcome = settle_write(saved, || self.exists(id)).await?;

    match &outcome {
      Outcome::Completed(_) => {
        tracing::debug!(customer_id = id, %status, "customer status updated");
      }
      Outcome::NotFound => {
        tracing::warn!(customer_id = id, "customer removed during status update");
      }
    }

    Ok(outcome.map(|_| ()))
  }

  async fn delete_customer(
    &self,
    id: i32,
  ) -> Result<Outcome<CustomerDetail>, C::Error> {
    let Some(customer) = self.context.find_customer(id).await? else {
      return Ok(Outcome::NotFound);
    };
    let detail = CustomerDetail::from(&customer);

    let removed = self.context.remove_customer(customer).await;
    let outcome = settle_write(removed, || self.exists(id)).await?;

    if outcome.is_completed() {
      tracing::debug!(customer_id = id, "customer deleted");
    }

    Ok(outcome.map(|()| detail))
  }
}
