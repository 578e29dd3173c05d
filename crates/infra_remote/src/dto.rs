//! Wire DTOs for the remote bill service
//!
//! The service speaks camelCase JSON with decimal prices. Conversion
//! into domain types happens here and rejects payloads the domain
//! cannot represent (negative or sub-cent prices, zero quantities)
//! as decode failures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{BillId, FeeId, GatewayError, ItemId, Money};
use domain_bill::{Fee, FeeDraft, Item, ItemDraft};

/// An item as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: Uuid,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl TryFrom<ItemDto> for Item {
    type Error = GatewayError;

    fn try_from(dto: ItemDto) -> Result<Self, GatewayError> {
        let unit_price = Money::from_decimal(dto.price)
            .map_err(|e| GatewayError::decode(format!("item {}: {e}", dto.id)))?;
        if dto.quantity == 0 {
            return Err(GatewayError::decode(format!(
                "item {}: quantity must be at least 1",
                dto.id
            )));
        }
        Ok(Item::new(
            ItemId::from_uuid(dto.id),
            dto.description,
            unit_price,
            dto.quantity,
        ))
    }
}

/// Request body for creating or updating an item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub bill_id: Uuid,
}

impl ItemPayload {
    pub fn new(bill_id: BillId, draft: &ItemDraft) -> Self {
        Self {
            description: draft.description.clone(),
            price: draft.unit_price.to_decimal(),
            quantity: draft.quantity,
            bill_id: *bill_id.as_uuid(),
        }
    }
}

/// A fee as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeDto {
    pub id: Uuid,
    pub description: String,
    pub price: Decimal,
}

impl TryFrom<FeeDto> for Fee {
    type Error = GatewayError;

    fn try_from(dto: FeeDto) -> Result<Self, GatewayError> {
        let price = Money::from_decimal(dto.price)
            .map_err(|e| GatewayError::decode(format!("fee {}: {e}", dto.id)))?;
        Ok(Fee::new(FeeId::from_uuid(dto.id), dto.description, price))
    }
}

/// Request body for creating or updating a fee
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePayload {
    pub description: String,
    pub price: Decimal,
    pub bill_id: Uuid,
}

impl FeePayload {
    pub fn new(bill_id: BillId, draft: &FeeDraft) -> Self {
        Self {
            description: draft.description.clone(),
            price: draft.price.to_decimal(),
            bill_id: *bill_id.as_uuid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_dto_to_domain() {
        let dto = ItemDto {
            id: Uuid::new_v4(),
            description: "Pad Thai".to_string(),
            price: dec!(4.50),
            quantity: 2,
        };

        let item = Item::try_from(dto.clone()).unwrap();
        assert_eq!(item.id, ItemId::from_uuid(dto.id));
        assert_eq!(item.unit_price, Money::from_decimal(dec!(4.50)).unwrap());
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_item_dto_rejects_negative_price() {
        let dto = ItemDto {
            id: Uuid::new_v4(),
            description: "Refund?".to_string(),
            price: dec!(-1.00),
            quantity: 1,
        };

        let result = Item::try_from(dto);
        assert!(matches!(result, Err(GatewayError::Decode { .. })));
    }

    #[test]
    fn test_item_dto_rejects_zero_quantity() {
        let dto = ItemDto {
            id: Uuid::new_v4(),
            description: "Nothing".to_string(),
            price: dec!(1.00),
            quantity: 0,
        };

        let result = Item::try_from(dto);
        assert!(matches!(result, Err(GatewayError::Decode { .. })));
    }

    #[test]
    fn test_fee_dto_rejects_sub_cent_price() {
        let dto = FeeDto {
            id: Uuid::new_v4(),
            description: "Split weirdly".to_string(),
            price: dec!(0.005),
        };

        let result = Fee::try_from(dto);
        assert!(matches!(result, Err(GatewayError::Decode { .. })));
    }

    #[test]
    fn test_item_payload_shape() {
        let bill_id = BillId::new_v7();
        let draft = ItemDraft::new(
            "Pad Thai",
            Money::from_decimal(dec!(4.50)).unwrap(),
            2,
        )
        .unwrap();

        let payload = ItemPayload::new(bill_id, &draft);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["description"], "Pad Thai");
        assert_eq!(json["price"], "4.50");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["billId"], bill_id.as_uuid().to_string());
    }

    #[test]
    fn test_item_dto_parses_numeric_price() {
        let json = r#"{"id":"0191d5d0-8a6e-7b51-b0c4-6e5f3a2b1c0d","description":"Soda","price":1.25,"quantity":3}"#;
        let dto: ItemDto = serde_json::from_str(json).unwrap();
        let item = Item::try_from(dto).unwrap();
        assert_eq!(item.unit_price, Money::from_decimal(dec!(1.25)).unwrap());
    }
}
