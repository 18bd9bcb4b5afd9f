//! Book and genre endpoints.

use async_trait::async_trait;
use http::Method;

use super::client::{Access, HttpGateway};
use super::{BookGateway, BookQuery};
use crate::api::error::ClientError;
use crate::api::models::wire::{ApiBook, ApiGenre, decode_list, decode_one, genres_from_rows};
use crate::api::models::{Book, BookId, BookPatch, BookPayload, Genre};

#[async_trait]
impl BookGateway for HttpGateway {
    async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, ClientError> {
        let mut segments = vec!["books"];
        if let Some(genre) = query.genre.as_ref() {
            segments.extend(["genre", genre.as_str()]);
        }
        self.fetch(&segments, &[], decode_list::<ApiBook, Book>)
            .await
    }

    async fn book(&self, id: &BookId) -> Result<Book, ClientError> {
        self.fetch(&["books", id.as_str()], &[], decode_one::<ApiBook, Book>)
            .await
    }

    async fn create_book(&self, payload: &BookPayload) -> Result<(), ClientError> {
        self.send(Method::POST, &["books"], Access::Bearer, Some(payload))
            .await
            .map(drop)
    }

    async fn update_book(&self, id: &BookId, payload: &BookPayload) -> Result<(), ClientError> {
        self.send(
            Method::PATCH,
            &["books", id.as_str()],
            Access::Bearer,
            Some(&BookPatch::from(payload)),
        )
        .await
        .map(drop)
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), ClientError> {
        self.send(Method::DELETE, &["books", id.as_str()], Access::Bearer, None::<&()>)
            .await
            .map(drop)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, ClientError> {
        let rows = self
            .fetch(&["genres"], &[], decode_list::<ApiGenre, Option<Genre>>)
            .await?;
        Ok(genres_from_rows(rows))
    }
}

