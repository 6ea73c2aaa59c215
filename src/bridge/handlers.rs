use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tonic::Code;

use crate::bridge::error::BridgeError;
use crate::bridge::server::BridgeState;
use crate::grpc::proto;

/// JSON shape of an item on the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeItem {
    pub id: i32,
    pub name: String,
}

impl From<proto::Item> for BridgeItem {
    fn from(item: proto::Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

impl From<BridgeItem> for proto::Item {
    fn from(item: BridgeItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

/// `GET /items/{id}`
pub async fn get_item(
    State(state): State<BridgeState>,
    Path(id): Path<i32>,
) -> Result<Json<BridgeItem>, BridgeError> {
    let mut client = state.client.clone();
    let request = proto::Item {
        id,
        name: String::new(),
    };

    match client.get_item(request).await {
        Ok(response) => Ok(Json(response.into_inner().into())),
        Err(status) if status.code() == Code::NotFound => Err(BridgeError::NotFound),
        Err(status) => Err(BridgeError::Upstream(status)),
    }
}

/// `POST /items/`: create or overwrite.
pub async fn create_item(
    State(state): State<BridgeState>,
    Json(item): Json<BridgeItem>,
) -> Result<Json<BridgeItem>, BridgeError> {
    set_item(state, item).await
}

/// `PUT /items/{id}`: the body id must equal the path id.
pub async fn update_item(
    State(state): State<BridgeState>,
    Path(id): Path<i32>,
    Json(item): Json<BridgeItem>,
) -> Result<Json<BridgeItem>, BridgeError> {
    if id != item.id {
        return Err(BridgeError::IdMismatch);
    }
    set_item(state, item).await
}

async fn set_item(state: BridgeState, item: BridgeItem) -> Result<Json<BridgeItem>, BridgeError> {
    let mut client = state.client;
    let response = client
        .set_item(proto::Item::from(item))
        .await
        .map_err(BridgeError::Upstream)?;
    Ok(Json(response.into_inner().into()))
}
