// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! REST API over a [`Ledger`].
//!
//! ## Endpoints
//!
//! - `POST /clientes/{id}/transacoes` - Post a credit (`"c"`) or debit (`"d"`)
//! - `GET /clientes/{id}/extrato` - Balance plus the ten most recent entries
//! - `GET /health` - Liveness probe
//!
//! ## Example Usage
//!
//! ```bash
//! # Debit
//! curl -X POST http://localhost:8080/clientes/1/transacoes \
//!   -H "Content-Type: application/json" \
//!   -d '{"valor": 500, "tipo": "d", "descricao": "rent"}'
//!
//! # Statement
//! curl http://localhost:8080/clientes/1/extrato
//! ```

use crate::account::Balance;
use crate::base::AccountId;
use crate::ledger::Ledger;
use crate::statement::{Statement, StatementEntry};
use crate::store::LedgerStore;
use crate::transaction::{NewTransaction, TransactionKind};
use crate::LedgerError;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

// === Request/Response DTOs ===

/// Request body for posting a transaction.
///
/// `valor` is an integer amount in minor units, accepted in
/// `1..=4_294_967_295` (`u32`). Anything outside that range, including a
/// value that still fits the `BIGINT` column, is answered with
/// `422 INVALID_AMOUNT`.
///
/// ```json
/// {"valor": 1000, "tipo": "c", "descricao": "salary"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "valor")]
    pub amount: i64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl TransactionRequest {
    /// Converts the request DTO into a posting. Negative amounts and amounts
    /// above `u32::MAX` are rejected here; the rest is left to
    /// [`Ledger::post`].
    fn into_new_transaction(self) -> Result<NewTransaction, LedgerError> {
        let amount = u32::try_from(self.amount).map_err(|_| LedgerError::InvalidAmount)?;
        Ok(NewTransaction::new(amount, self.kind, self.description))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    #[serde(rename = "limite")]
    pub limit: i64,
    #[serde(rename = "saldo")]
    pub balance: i64,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            limit: balance.limit,
            balance: balance.balance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    #[serde(rename = "saldo")]
    pub summary: StatementSummary,
    #[serde(rename = "ultimas_transacoes")]
    pub transactions: Vec<StatementTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSummary {
    pub total: i64,
    #[serde(rename = "limite")]
    pub limit: i64,
    #[serde(rename = "data_extrato")]
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementTransaction {
    #[serde(rename = "valor")]
    pub amount: u32,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "realizada_em")]
    pub created_at: DateTime<Utc>,
}

impl From<StatementEntry> for StatementTransaction {
    fn from(entry: StatementEntry) -> Self {
        Self {
            amount: entry.amount,
            kind: entry.kind,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            summary: StatementSummary {
                total: statement.balance,
                limit: statement.limit,
                as_of: statement.as_of,
            },
            transactions: statement.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Error Handling ===

/// Wrapper for converting request failures into HTTP responses.
pub enum AppError {
    Ledger(LedgerError),
    /// Body was not valid JSON or did not match [`TransactionRequest`].
    MalformedBody(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Ledger(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::MalformedBody(message) => {
                tracing::debug!(%message, "rejected malformed body");
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_BODY", message)
            }
            AppError::Ledger(err) => {
                let (status, code) = match &err {
                    LedgerError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
                    LedgerError::LimitExceeded => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "LIMIT_EXCEEDED")
                    }
                    LedgerError::InvalidAmount => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_AMOUNT")
                    }
                    LedgerError::InvalidDescription { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DESCRIPTION")
                    }
                    LedgerError::Store { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "STORE_FAILURE")
                    }
                };
                if err.is_rejection() {
                    tracing::debug!(error = %err, "request rejected");
                } else {
                    tracing::error!(error = %err, "ledger store failed");
                }
                (status, code, err.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// Parses the `{id}` path segment; anything that is not an account id is
/// reported as an unknown account.
fn parse_account_id(raw: &str) -> Result<AccountId, AppError> {
    raw.parse::<i32>()
        .map(AccountId)
        .map_err(|_| AppError::Ledger(LedgerError::AccountNotFound))
}

/// POST /clientes/{id}/transacoes - Post a transaction.
async fn create_transaction<S: LedgerStore>(
    State(ledger): State<Arc<Ledger<S>>>,
    Path(id): Path<String>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account_id = parse_account_id(&id)?;
    let Json(request) = body?;
    let transaction = request.into_new_transaction()?;
    let balance = ledger.post(account_id, transaction).await?;
    Ok(Json(balance.into()))
}

/// GET /clientes/{id}/extrato - Get an account statement.
async fn get_statement<S: LedgerStore>(
    State(ledger): State<Arc<Ledger<S>>>,
    Path(id): Path<String>,
) -> Result<Json<StatementResponse>, AppError> {
    let account_id = parse_account_id(&id)?;
    let statement = ledger.statement(account_id).await?;
    Ok(Json(statement.into()))
}

/// GET /health
async fn health() -> StatusCode {
    StatusCode::OK
}

// === Router ===

pub fn router<S: LedgerStore + 'static>(ledger: Arc<Ledger<S>>) -> Router {
    Router::new()
        .route("/clientes/{id}/transacoes", post(create_transaction::<S>))
        .route("/clientes/{id}/extrato", get(get_statement::<S>))
        .route("/health", get(health))
        .with_state(ledger)
}

/// Serves the API on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<S, F>(
    listener: TcpListener,
    ledger: Arc<Ledger<S>>,
    shutdown: F,
) -> std::io::Result<()>
where
    S: LedgerStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "ledger API listening");
    }
    axum::serve(listener, router(ledger))
        .with_graceful_shutdown(shutdown)
        .await
}
