//! Catalog, book detail and book form handlers.

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use super::Navigator;
use super::output::{write_book_detail, write_book_form, write_book_list, write_line};
use crate::api::{BookGateway, BookId, ClientError, Genre};
use crate::catalog::{BookCatalog, BookForm};
use crate::routes::Route;
use crate::view::{History, ListViewSynchronizer, Location, ParamUpdate};

/// Renders the catalog after applying `updates`.
///
/// # Errors
///
/// Returns the book list fetch error, or [`ClientError::Io`].
pub async fn catalog<W: Write>(
    nav: &Navigator<'_>,
    history: History,
    updates: &[ParamUpdate],
    out: &mut W,
) -> Result<History, ClientError> {
    let books = nav.services.books;
    let mut sync =
        ListViewSynchronizer::new(BookCatalog, history).with_telemetry(Arc::clone(&nav.telemetry));
    for update in updates {
        sync.set_param(&update.key, &update.value);
    }

    sync.refresh(|scope| async move { books.list_books(&scope).await })
        .await?;
    let genres = load_genres(books).await;
    write_book_list(out, &sync.visible(), &genres)?;
    Ok(sync.into_history())
}

async fn load_genres(books: &dyn BookGateway) -> Vec<Genre> {
    books.list_genres().await.unwrap_or_else(|error| {
        warn!(%error, "genre list unavailable; showing catalog without it");
        Vec::new()
    })
}

/// Shows the add form, or submits it when any field is set.
///
/// Nothing is sent until the form validates.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for an invalid form, or the create
/// error.
pub async fn add<W: Write>(
    nav: &Navigator<'_>,
    mut history: History,
    updates: &[ParamUpdate],
    out: &mut W,
) -> Result<History, ClientError> {
    let query = history.current().query().clone();
    let form = BookForm::from_query(&query).apply(updates);
    if !BookForm::is_submission(&query, updates) {
        write_book_form(out, "Add book", &form)?;
        return Ok(history);
    }

    let payload = form.validate()?;
    nav.services.books.create_book(&payload).await?;
    info!(title = %payload.title, "book created");
    write_line(out, &format!("Added '{}'.", payload.title))?;
    history.push(Location::at(&Route::Books.to_string())?);
    Ok(history)
}

/// Shows a book, or deletes it when `delete` confirms it.
///
/// # Errors
///
/// Returns the fetch or delete error, or [`ClientError::Io`].
pub async fn detail<W: Write>(
    nav: &Navigator<'_>,
    id: &BookId,
    mut history: History,
    delete: bool,
    out: &mut W,
) -> Result<History, ClientError> {
    if delete {
        nav.services.books.delete_book(id).await?;
        info!(%id, "book deleted");
        write_line(out, &format!("Deleted book #{id}."))?;
        history.push(Location::at(&Route::Books.to_string())?);
        return Ok(history);
    }

    let book = nav.services.books.book(id).await?;
    write_book_detail(out, &book)?;
    Ok(history)
}

/// Shows the edit form pre-filled from the book, or submits the fields
/// set on the location over the existing values. An empty update clears
/// an optional field.
///
/// # Errors
///
/// Returns the fetch error, [`ClientError::Validation`] for an invalid
/// form, or the update error.
pub async fn edit<W: Write>(
    nav: &Navigator<'_>,
    id: &BookId,
    mut history: History,
    updates: &[ParamUpdate],
    out: &mut W,
) -> Result<History, ClientError> {
    let book = nav.services.books.book(id).await?;
    let query = history.current().query().clone();
    let form = BookForm::from_book(&book).overlay(&query).apply(updates);
    if !BookForm::is_submission(&query, updates) {
        write_book_form(out, &format!("Edit '{}'", book.title), &form)?;
        return Ok(history);
    }

    let payload = form.validate()?;
    nav.services.books.update_book(id, &payload).await?;
    info!(%id, "book updated");
    write_line(out, &format!("Saved '{}'.", payload.title))?;
    history.push(Location::at(&Route::BookDetail(id.clone()).to_string())?);
    Ok(history)
}
