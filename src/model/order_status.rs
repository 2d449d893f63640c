use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of an [`Order`](crate::model::Order).
///
/// Each status carries a stable integer code, used wherever a compact representation is
/// stored or exchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    WaitingPayment,
    Paid,
    Shipped,
    Delivered,
    Canceled,
}

/// Raised by [`OrderStatus::from_code`] for a code outside 1..=5.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid OrderStatus code: {0}")]
pub struct InvalidStatusCode(pub i32);

impl OrderStatus {
    pub const fn code(self) -> i32 {
        match self {
            OrderStatus::WaitingPayment => 1,
            OrderStatus::Paid => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Canceled => 5,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, InvalidStatusCode> {
        match code {
            1 => Ok(OrderStatus::WaitingPayment),
            2 => Ok(OrderStatus::Paid),
            3 => Ok(OrderStatus::Shipped),
            4 => Ok(OrderStatus::Delivered),
            5 => Ok(OrderStatus::Canceled),
            other => Err(InvalidStatusCode(other)),
        }
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        for status in [
            OrderStatus::WaitingPayment,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()), Ok(status));
        }
        assert_eq!(OrderStatus::Paid.code(), 2);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = OrderStatus::try_from(9).unwrap_err();
        assert_eq!(err.to_string(), "Invalid OrderStatus code: 9");
    }

    #[test]
    fn serialises_as_upper_snake_case() {
        let json = serde_json::to_string(&OrderStatus::WaitingPayment).unwrap();
        assert_eq!(json, r#""WAITING_PAYMENT""#);
    }
}
