//! Plain-text rendering of views.
//!
//! Every writer takes `&mut W: Write` so views can be captured in tests.

use std::io::{self, Write};

use crate::api::{Book, BookId, ClientError, Genre, Transaction, TransactionId, User};
use crate::catalog::BookForm;
use crate::format::{format_rupiah, format_timestamp};
use crate::transactions::PricedCart;
use crate::view::{Location, PageInfo, PageSlice};

pub(crate) fn io_error(error: &io::Error) -> ClientError {
    ClientError::Io {
        message: error.to_string(),
    }
}

/// Writes one line of text.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_line<W: Write>(writer: &mut W, text: &str) -> Result<(), ClientError> {
    writeln!(writer, "{text}").map_err(|error| io_error(&error))
}

/// Writes the location the user ended up at.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_location<W: Write>(writer: &mut W, location: &Location) -> Result<(), ClientError> {
    write_line(writer, "")?;
    write_line(writer, &format!("Location: {location}"))
}

/// Writes the visible page of the catalog.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_book_list<W: Write>(
    writer: &mut W,
    page: &PageSlice<&Book>,
    genres: &[Genre],
) -> Result<(), ClientError> {
    write_line(writer, "Books")?;
    if !genres.is_empty() {
        let names: Vec<String> = genres
            .iter()
            .map(|genre| format!("{} ({})", genre.name, genre.id))
            .collect();
        write_line(writer, &format!("Genres: {}", names.join(", ")))?;
    }
    write_line(writer, "")?;

    if page.items.is_empty() {
        write_line(writer, "  No books match.")?;
    }
    for book in &page.items {
        let genre = book
            .genre
            .as_ref()
            .map_or_else(String::new, |genre| format!(" [{}]", genre.name));
        let condition = book
            .condition
            .map_or_else(String::new, |condition| format!(" ({})", condition.as_str()));
        write_line(
            writer,
            &format!(
                "  #{} {} by {}{genre}{condition} · {} · {} in stock",
                book.id,
                book.title,
                book.writer,
                format_rupiah(book.price),
                book.stock
            ),
        )?;
    }
    write_page_footer(writer, &page.info, "books")
}

/// Writes the visible page of transactions.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_transaction_list<W: Write>(
    writer: &mut W,
    page: &PageSlice<&Transaction>,
) -> Result<(), ClientError> {
    write_line(writer, "Transactions")?;
    write_line(writer, "")?;
    if page.items.is_empty() {
        write_line(writer, "  No transactions match.")?;
    }
    for transaction in &page.items {
        write_line(
            writer,
            &format!(
                "  #{} {} · {} item(s) · {}",
                transaction.id,
                format_timestamp(transaction.created_at.as_ref()),
                transaction.items.len(),
                format_rupiah(transaction.total_amount)
            ),
        )?;
    }
    write_page_footer(writer, &page.info, "transactions")
}

fn write_page_footer<W: Write>(
    writer: &mut W,
    info: &PageInfo,
    noun: &str,
) -> Result<(), ClientError> {
    write_line(writer, "")?;
    write_line(
        writer,
        &format!(
            "Page {} of {} ({} {noun})",
            info.current_page(),
            info.total_pages(),
            info.total_items()
        ),
    )?;
    if info.is_out_of_range() {
        write_line(writer, "This page is past the last page.")?;
    } else if info.has_next() {
        write_line(writer, "More pages available.")?;
    }
    Ok(())
}

/// Writes every detail of a book.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_book_detail<W: Write>(writer: &mut W, book: &Book) -> Result<(), ClientError> {
    let published = book
        .published_on()
        .map(|date| date.format("%Y-%m-%d").to_string());

    write_line(writer, &format!("{} (#{})", book.title, book.id))?;
    write_line(writer, &format!("  Writer: {}", book.writer))?;
    write_optional(writer, "Publisher", book.publisher.as_deref())?;
    write_line(writer, &format!("  Price: {}", format_rupiah(book.price)))?;
    write_line(writer, &format!("  Stock: {}", book.stock))?;
    write_optional(
        writer,
        "Genre",
        book.genre.as_ref().map(|genre| genre.name.as_str()),
    )?;
    write_optional(writer, "ISBN", book.isbn.as_deref())?;
    write_optional(writer, "Published", published.as_deref())?;
    write_optional(
        writer,
        "Condition",
        book.condition.map(|condition| condition.as_str()),
    )?;
    write_optional(writer, "Description", book.description.as_deref())
}

fn write_optional<W: Write>(
    writer: &mut W,
    label: &str,
    value: Option<&str>,
) -> Result<(), ClientError> {
    value.map_or(Ok(()), |text| write_line(writer, &format!("  {label}: {text}")))
}

/// Writes the book form with the parameter name for each field.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_book_form<W: Write>(
    writer: &mut W,
    heading: &str,
    form: &BookForm,
) -> Result<(), ClientError> {
    write_line(writer, heading)?;
    for (name, value) in form.fields() {
        let shown = if value.is_empty() { "-" } else { value };
        write_line(writer, &format!("  {name:<17} {shown}"))?;
    }
    write_line(writer, "")?;
    write_line(writer, "Submit with --set 'field=value&field=value'.")
}

/// Writes one transaction with its lines.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_transaction_detail<W: Write>(
    writer: &mut W,
    transaction: &Transaction,
) -> Result<(), ClientError> {
    write_line(writer, &format!("Transaction #{}", transaction.id))?;
    write_line(
        writer,
        &format!("  Date: {}", format_timestamp(transaction.created_at.as_ref())),
    )?;
    write_optional(writer, "Buyer", transaction.buyer.as_ref().map(User::label))?;
    for item in &transaction.items {
        let title = item
            .title
            .as_deref()
            .or_else(|| item.book_id.as_ref().map(BookId::as_str))
            .unwrap_or("unknown book");
        write_line(
            writer,
            &format!(
                "  {} × {title} @ {} = {}",
                item.quantity,
                format_rupiah(item.unit_price),
                format_rupiah(item.line_total())
            ),
        )?;
    }
    write_line(
        writer,
        &format!("  Total: {}", format_rupiah(transaction.total_amount)),
    )
}

/// Writes the confirmation for a placed order.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when the writer fails.
pub fn write_receipt<W: Write>(
    writer: &mut W,
    cart: &PricedCart,
    id: &TransactionId,
) -> Result<(), ClientError> {
    write_line(writer, &format!("Order #{id} placed"))?;
    for line in &cart.lines {
        write_line(
            writer,
            &format!(
                "  {} × {} = {}",
                line.quantity,
                line.book.title,
                format_rupiah(line.line_total())
            ),
        )?;
    }
    write_line(writer, &format!("  Subtotal: {}", format_rupiah(cart.subtotal)))
}
