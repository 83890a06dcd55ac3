use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use backend::db::txn::SharedTxn;
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Begin a database transaction and wrap it as a SharedTxn.
///
/// The test owns the transaction; `with_txn` never commits or rolls it back.
pub async fn open(conn: &DatabaseConnection) -> Result<SharedTxn, sea_orm::DbErr> {
    let txn = conn.begin().await?;
    Ok(SharedTxn(Arc::new(txn)))
}

/// Make `shared` visible to `with_txn` for this request.
pub fn inject(req: &HttpRequest, shared: &SharedTxn) {
    req.extensions_mut().insert(shared.clone());
}

/// Roll back a shared transaction once every clone has been dropped.
pub async fn rollback(shared: SharedTxn) -> Result<(), sea_orm::DbErr> {
    let txn = Arc::try_unwrap(shared.0).map_err(|_| {
        sea_orm::DbErr::Custom("Cannot rollback: transaction is still shared".to_string())
    })?;
    txn.rollback().await
}
