//! Catalog change notices.
//!
//! Restaurant and menu records are edited by the CRUD layer. After a
//! successful write it hands one of these notices over so connected
//! dashboards can refresh the affected view.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MenuItemId, RestaurantId};

/// What happened to the catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A restaurant was created, edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantChange {
    pub restaurant_id: RestaurantId,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A menu item of a restaurant was created, edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuChange {
    pub restaurant_id: RestaurantId,
    pub menu_item_id: MenuItemId,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
