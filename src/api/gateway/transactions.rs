//! Transaction endpoints.

use async_trait::async_trait;
use http::Method;

use super::client::{Access, HttpGateway};
use super::error_mapping::map_decode_error;
use super::{TransactionGateway, TransactionQuery};
use crate::api::error::ClientError;
use crate::api::models::wire::{ApiCreatedTransaction, ApiTransaction, decode_list, decode_one};
use crate::api::models::{CheckoutRequest, Transaction, TransactionId};

#[async_trait]
impl TransactionGateway for HttpGateway {
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ClientError> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());
        let params: Vec<(&str, &str)> = search.into_iter().map(|term| ("search", term)).collect();
        self.fetch(
            &["transactions"],
            &params,
            decode_list::<ApiTransaction, Transaction>,
        )
        .await
    }

    async fn transaction(&self, id: &TransactionId) -> Result<Transaction, ClientError> {
        self.fetch(
            &["transactions", id.as_str()],
            &[],
            decode_one::<ApiTransaction, Transaction>,
        )
        .await
    }

    async fn create_transaction(
        &self,
        order: &CheckoutRequest,
    ) -> Result<TransactionId, ClientError> {
        let body = self
            .send(Method::POST, &["transactions"], Access::Bearer, Some(order))
            .await?;
        decode_one::<ApiCreatedTransaction, TransactionId>(&body)
            .map_err(|error| map_decode_error("POST /transactions", &error))
    }
}
