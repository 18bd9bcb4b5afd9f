//! Transaction list, detail and checkout handlers.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use super::Navigator;
use super::output::{write_receipt, write_transaction_detail, write_transaction_list};
use crate::api::{BookQuery, ClientError, TransactionId, UserId};
use crate::routes::Route;
use crate::transactions::checkout::ITEMS_PARAM;
use crate::transactions::{Cart, TransactionList};
use crate::view::{History, ListViewSynchronizer, Location, ParamUpdate};

/// Renders the transaction list after applying `updates`.
///
/// # Errors
///
/// Returns the list fetch error, or [`ClientError::Io`].
pub async fn list<W: Write>(
    nav: &Navigator<'_>,
    history: History,
    updates: &[ParamUpdate],
    out: &mut W,
) -> Result<History, ClientError> {
    let transactions = nav.services.transactions;
    let mut sync = ListViewSynchronizer::new(TransactionList, history)
        .with_telemetry(Arc::clone(&nav.telemetry));
    for update in updates {
        sync.set_param(&update.key, &update.value);
    }

    sync.refresh(|scope| async move { transactions.list_transactions(&scope).await })
        .await?;
    write_transaction_list(out, &sync.visible())?;
    Ok(sync.into_history())
}

/// Shows one transaction.
///
/// # Errors
///
/// Returns the fetch error, or [`ClientError::Io`].
pub async fn detail<W: Write>(
    nav: &Navigator<'_>,
    id: &TransactionId,
    history: History,
    out: &mut W,
) -> Result<History, ClientError> {
    let transaction = nav.services.transactions.transaction(id).await?;
    write_transaction_detail(out, &transaction)?;
    Ok(history)
}

/// Places the order described by the `items` parameter and moves to the
/// new transaction.
///
/// An empty cart is rejected before any request is made.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for an empty, unknown or
/// over-stock cart, or the API error of any step.
pub async fn checkout<W: Write>(
    nav: &mut Navigator<'_>,
    mut history: History,
    out: &mut W,
) -> Result<History, ClientError> {
    let cart = Cart::from_query(history.current().query())?;
    if cart.is_empty() {
        return Err(ClientError::validation(
            ITEMS_PARAM,
            "choose at least one book before checking out",
        ));
    }

    let catalog = nav.services.books.list_books(&BookQuery::default()).await?;
    let priced = cart.price(&catalog)?;
    let buyer = buyer_id(nav).await?;
    let id = nav
        .services
        .transactions
        .create_transaction(&priced.to_request(buyer))
        .await?;
    info!(%id, subtotal = priced.subtotal, "order placed");

    write_receipt(out, &priced, &id)?;
    history.push(Location::at(&Route::TransactionDetail(id).to_string())?);
    Ok(history)
}

/// Returns the signed-in user's id, asking the API once and caching the
/// answer in the session.
async fn buyer_id(nav: &mut Navigator<'_>) -> Result<UserId, ClientError> {
    if let Some(id) = nav
        .session
        .as_ref()
        .and_then(|session| session.user_id.clone())
    {
        return Ok(id);
    }

    let user = nav.services.auth.current_user().await?;
    let id = user.id.ok_or_else(|| ClientError::Api {
        message: "GET /auth/me returned no user id".to_owned(),
    })?;
    if let Some(session) = nav.session.as_mut() {
        session.user_id = Some(id.clone());
        nav.store.save(session)?;
        debug!("cached buyer id in session");
    }
    Ok(id)
}
