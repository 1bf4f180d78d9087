//! Domain records the engine reads. Only `Customer::store_id` is ever
//! written back, and only through an `AssignmentSink`.

use crate::types::{CompanyId, CustomerId, OrderId, Phone, StoreId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: CompanyId,
    pub name: String,
    pub plan: String, // free | standard | premium
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    Physical,
    ShowRoom,
    ECommerce,
}

impl StoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::ShowRoom => "show_room",
            Self::ECommerce => "e_commerce",
        }
    }

    pub fn is_show_room(&self) -> bool {
        matches!(self, Self::ShowRoom)
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "show_room" => Ok(Self::ShowRoom),
            "e_commerce" => Ok(Self::ECommerce),
            other => Err(format!("unknown store type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: StoreId,
    pub company_id: CompanyId,
    pub store_type: StoreType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub company_id: CompanyId,
    pub phone: Option<Phone>,
    pub store_id: Option<StoreId>,
}

impl Customer {
    /// The grouping key, or None when the phone is absent or empty.
    pub fn grouping_phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Canceled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Refunded => "refunded",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub company_id: Option<CompanyId>,
    pub customer_id: CustomerId,
    pub store_id: Option<StoreId>,
    pub status: OrderStatus,
    pub total: f64,
}

impl Order {
    /// Only completed orders placed at a store take part in aggregation.
    pub fn counts_toward_champion(&self) -> bool {
        self.status == OrderStatus::Completed && self.store_id.is_some()
    }
}

/// One "assign store X to customer Y" instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub customer_id: CustomerId,
    pub store_id: StoreId,
}
