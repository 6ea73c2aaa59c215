//! `ItemTransfer` service implementation.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::grpc::proto::{item_transfer_server::ItemTransfer, Item};
use crate::observability::metrics;
use crate::store::NameTable;

/// gRPC front end for a shared name table.
#[derive(Debug, Clone)]
pub struct ItemTransferService {
    table: Arc<NameTable>,
}

impl ItemTransferService {
    pub fn new(table: Arc<NameTable>) -> Self {
        Self { table }
    }
}

#[tonic::async_trait]
impl ItemTransfer for ItemTransferService {
    async fn get_item(&self, request: Request<Item>) -> Result<Response<Item>, Status> {
        let id = request.into_inner().id;

        match self.table.get(id) {
            Some(name) => {
                metrics::record_grpc_call("GetItem", "ok");
                Ok(Response::new(Item { id, name }))
            }
            None => {
                tracing::debug!(id, "GetItem miss");
                metrics::record_grpc_call("GetItem", "not_found");
                Err(Status::not_found("Item not found"))
            }
        }
    }

    async fn set_item(&self, request: Request<Item>) -> Result<Response<Item>, Status> {
        let item = request.into_inner();
        self.table.set(item.id, item.name.clone());
        tracing::debug!(id = item.id, "SetItem");
        metrics::record_grpc_call("SetItem", "ok");
        Ok(Response::new(item))
    }
}
