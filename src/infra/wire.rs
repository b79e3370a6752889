use serde::{Deserialize, Serialize};

use crate::domain::entities::unit::{UnitFields, UnitId};

/// Route paths, relative to the service base URL.
pub const ALL_PATH: &str = "/units/all";
pub const SINGLE_PATH: &str = "/units/single";
pub const CREATE_PATH: &str = "/units/create";
pub const UPDATE_PATH: &str = "/units/update";
pub const DELETE_PATH: &str = "/units/delete";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: UnitId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: UnitId,
    #[serde(default)]
    pub data: UnitFields,
}
