//! Add and edit book form.
//!
//! Field values arrive as raw strings (from the location's query) and are
//! validated into a [`BookPayload`] before anything is sent.

use crate::api::models::wire::WireNumber;
use crate::api::{Book, BookCondition, BookPayload, ClientError, GenreId};
use crate::view::{ParamUpdate, ViewQuery};

const TITLE: &str = "title";
const WRITER: &str = "writer";
const PUBLISHER: &str = "publisher";
const PRICE: &str = "price";
const STOCK: &str = "stock";
const GENRE: &str = "genreId";
const ISBN: &str = "isbn";
const DESCRIPTION: &str = "description";
const PUBLICATION_YEAR: &str = "publication_year";
const CONDITION: &str = "condition";

const FIELD_NAMES: [&str; 10] = [
    TITLE,
    WRITER,
    PUBLISHER,
    PRICE,
    STOCK,
    GENRE,
    ISBN,
    DESCRIPTION,
    PUBLICATION_YEAR,
    CONDITION,
];

/// Raw book form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    /// Title (required).
    pub title: String,
    /// Writer (required).
    pub writer: String,
    /// Publisher.
    pub publisher: String,
    /// Price in rupiah; must be a non-negative number.
    pub price: String,
    /// Stock; must be a non-negative integer.
    pub stock: String,
    /// Genre identifier (required).
    pub genre_id: String,
    /// ISBN.
    pub isbn: String,
    /// Description.
    pub description: String,
    /// Publication year; optional integer.
    pub publication_year: String,
    /// Condition; empty, `new` or `used`.
    pub condition: String,
}

impl BookForm {
    /// Reads the form from query parameters. Missing fields are empty.
    #[must_use]
    pub fn from_query(query: &ViewQuery) -> Self {
        Self::default().overlay(query)
    }

    /// Pre-fills the form from an existing book.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            writer: book.writer.clone(),
            publisher: book.publisher.clone().unwrap_or_default(),
            price: book.price.to_string(),
            stock: book.stock.to_string(),
            genre_id: book
                .genre_id()
                .map(|id| id.as_str().to_owned())
                .unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            publication_year: book
                .publication_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            condition: book
                .condition
                .map(|condition| condition.as_str().to_owned())
                .unwrap_or_default(),
        }
    }

    /// Replaces every field that `query` sets. Other parameters are ignored.
    #[must_use]
    pub fn overlay(mut self, query: &ViewQuery) -> Self {
        for name in FIELD_NAMES {
            if let Some(value) = query.get(name) {
                self.set_field(name, value);
            }
        }
        self
    }

    /// Applies command-line field updates. Unlike [`overlay`](Self::overlay)
    /// an empty value is kept, so an edit can clear an optional field.
    #[must_use]
    pub fn apply(mut self, updates: &[ParamUpdate]) -> Self {
        for update in updates {
            self.set_field(&update.key, &update.value);
        }
        self
    }

    /// Returns true when the location or the updates name a form field.
    /// Without one the form is only shown.
    #[must_use]
    pub fn is_submission(query: &ViewQuery, updates: &[ParamUpdate]) -> bool {
        FIELD_NAMES.iter().any(|name| query.get(name).is_some())
            || updates
                .iter()
                .any(|update| FIELD_NAMES.contains(&update.key.as_str()))
    }

    fn set_field(&mut self, name: &str, value: &str) {
        let field = match name {
            TITLE => &mut self.title,
            WRITER => &mut self.writer,
            PUBLISHER => &mut self.publisher,
            PRICE => &mut self.price,
            STOCK => &mut self.stock,
            GENRE => &mut self.genre_id,
            ISBN => &mut self.isbn,
            DESCRIPTION => &mut self.description,
            PUBLICATION_YEAR => &mut self.publication_year,
            CONDITION => &mut self.condition,
            _ => return,
        };
        value.clone_into(field);
    }

    /// Returns each field with its parameter name, in form order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            (TITLE, self.title.as_str()),
            (WRITER, self.writer.as_str()),
            (PUBLISHER, self.publisher.as_str()),
            (PRICE, self.price.as_str()),
            (STOCK, self.stock.as_str()),
            (GENRE, self.genre_id.as_str()),
            (ISBN, self.isbn.as_str()),
            (DESCRIPTION, self.description.as_str()),
            (PUBLICATION_YEAR, self.publication_year.as_str()),
            (CONDITION, self.condition.as_str()),
        ]
    }

    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<BookPayload, ClientError> {
        let title = required(TITLE, &self.title)?;
        let writer = required(WRITER, &self.writer)?;
        let genre_id = required(GENRE, &self.genre_id).map(GenreId::new)?;
        let price = WireNumber::Text(self.price.clone())
            .to_whole()
            .filter(|_| !self.price.trim().is_empty())
            .ok_or_else(|| ClientError::validation(PRICE, "must be a non-negative number"))?;
        let stock_quantity = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| ClientError::validation(STOCK, "must be a non-negative integer"))?;
        let publication_year = optional(&self.publication_year)
            .map(|year| {
                year.parse::<u32>()
                    .map_err(|_| ClientError::validation(PUBLICATION_YEAR, "must be a year"))
            })
            .transpose()?;
        let condition = optional(&self.condition)
            .map(|raw| {
                BookCondition::parse(raw)
                    .ok_or_else(|| ClientError::validation(CONDITION, "must be 'new' or 'used'"))
            })
            .transpose()?;

        Ok(BookPayload {
            title,
            writer,
            publisher: optional(&self.publisher).map(ToOwned::to_owned),
            price,
            stock_quantity,
            genre_id,
            isbn: optional(&self.isbn).map(ToOwned::to_owned),
            description: optional(&self.description).map(ToOwned::to_owned),
            publication_year,
            condition,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, ClientError> {
    optional(value)
        .map(ToOwned::to_owned)
        .ok_or_else(|| ClientError::validation(field, "is required"))
}

fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::BookForm;
    use crate::api::models::test_support::book;
    use crate::api::{BookCondition, ClientError, GenreId};
    use crate::view::{ParamUpdate, ViewQuery};

    #[fixture]
    fn valid() -> BookForm {
        BookForm::from_query(&ViewQuery::parse(
            "title=Dune&writer=Frank+Herbert&price=180000&stock=4&genreId=g-sf",
        ))
    }

    #[rstest]
    fn valid_form_builds_payload(valid: BookForm) {
        let payload = valid.validate().expect("form should validate");
        assert_eq!(payload.title, "Dune");
        assert_eq!(payload.price, 180_000);
        assert_eq!(payload.stock_quantity, 4);
        assert_eq!(payload.genre_id, GenreId::new("g-sf"));
        assert_eq!(payload.publisher, None);
    }

    #[rstest]
    #[case("title", "   ")]
    #[case("writer", "")]
    #[case("genreId", "")]
    #[case("price", "")]
    #[case("price", "-1")]
    #[case("price", "cheap")]
    #[case("stock", "2.5")]
    #[case("stock", "-3")]
    #[case("publication_year", "nineteen")]
    #[case("condition", "mint")]
    fn invalid_field_is_named(valid: BookForm, #[case] field: &str, #[case] value: &str) {
        let mut form = valid;
        let slot = match field {
            "title" => &mut form.title,
            "writer" => &mut form.writer,
            "genreId" => &mut form.genre_id,
            "price" => &mut form.price,
            "stock" => &mut form.stock,
            "publication_year" => &mut form.publication_year,
            _ => &mut form.condition,
        };
        value.clone_into(slot);
        assert_field_error(&form, field);
    }

    fn assert_field_error(form: &BookForm, field: &str) {
        let result = form.validate();
        assert!(
            matches!(&result, Err(ClientError::Validation { field: actual, .. }) if actual == field),
            "expected {field} error, got {result:?}"
        );
    }

    #[rstest]
    fn fractional_price_rounds(valid: BookForm) {
        let form = BookForm {
            price: "99999.6".to_owned(),
            ..valid
        };
        assert_eq!(form.validate().map(|payload| payload.price), Ok(100_000));
    }

    #[test]
    fn edit_overlays_supplied_fields_on_existing_book() {
        let mut existing = book("7", "Dune", "Frank Herbert");
        existing.condition = Some(BookCondition::Used);
        existing.publication_year = Some(1965);

        let form = BookForm::from_book(&existing)
            .overlay(&ViewQuery::parse("price=150000&description=Classic"));
        let payload = form.validate().expect("form should validate");

        assert_eq!(payload.title, "Dune");
        assert_eq!(payload.price, 150_000);
        assert_eq!(payload.description.as_deref(), Some("Classic"));
        assert_eq!(payload.publication_year, Some(1965));
        assert_eq!(payload.condition, Some(BookCondition::Used));
        assert_eq!(payload.genre_id, GenreId::new("g-tech"));
    }

    fn update(key: &str, value: &str) -> ParamUpdate {
        ParamUpdate {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn edit_can_clear_optional_fields() {
        let mut existing = book("7", "Dune", "Frank Herbert");
        existing.publisher = Some("Chilton".to_owned());
        existing.isbn = Some("978-0441013593".to_owned());
        existing.publication_year = Some(1965);
        existing.condition = Some(BookCondition::Used);

        let form = BookForm::from_book(&existing).apply(&[
            update("publisher", ""),
            update("isbn", ""),
            update("publication_year", ""),
            update("condition", ""),
        ]);
        let payload = form.validate().expect("form should validate");

        assert_eq!(payload.publisher, None);
        assert_eq!(payload.isbn, None);
        assert_eq!(payload.publication_year, None);
        assert_eq!(payload.condition, None);
        assert_eq!(payload.title, "Dune");
    }

    #[test]
    fn unknown_updates_leave_the_form_alone() {
        let form = BookForm::default().apply(&[update("page", "2"), update("title", "Dune")]);
        assert_eq!(form.title, "Dune");
        assert_eq!(
            form,
            BookForm {
                title: "Dune".to_owned(),
                ..BookForm::default()
            }
        );
    }

    #[rstest]
    #[case("", &[], false)]
    #[case("page=1", &[], false)]
    #[case("page=1&q=dune", &[("page", "2")], false)]
    #[case("title=Dune", &[], true)]
    #[case("", &[("publisher", "")], true)]
    fn submission_needs_a_form_field(
        #[case] raw: &str,
        #[case] updates: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let changes: Vec<ParamUpdate> = updates
            .iter()
            .map(|(key, value)| update(key, value))
            .collect();
        assert_eq!(
            BookForm::is_submission(&ViewQuery::parse(raw), &changes),
            expected
        );
    }
}
