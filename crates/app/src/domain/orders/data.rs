//! Order Data

use crate::domain::{
    accounts::records::AddressUuid, orders::errors::OrderValidationError,
    products::records::ProductUuid,
};

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// One requested product and quantity in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub address_uuid: AddressUuid,
    pub payment_method: String,
    pub lines: Vec<CartLine>,
}

impl NewOrder {
    /// Check the request shape before any storage is touched.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty cart, a zero quantity, a
    /// missing address or a blank payment method.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.lines.is_empty() {
            return Err(OrderValidationError::EmptyCart);
        }

        if let Some(line) = self.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderValidationError::ZeroQuantity(line.product_uuid));
        }

        if self.address_uuid.is_nil() {
            return Err(OrderValidationError::MissingAddress);
        }

        if self.payment_method.trim().is_empty() {
            return Err(OrderValidationError::MissingPaymentMethod);
        }

        Ok(())
    }

    /// Lines in the order their rows must be locked: ascending product id.
    ///
    /// The sort is stable, so duplicate products keep their request order.
    #[must_use]
    pub fn lines_in_lock_order(&self) -> Vec<CartLine> {
        let mut lines = self.lines.clone();

        lines.sort_by_key(|line| line.product_uuid);

        lines
    }
}

/// 1-based page request translated to `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
}

impl Pagination {
    /// A missing or non-positive `limit` becomes [`DEFAULT_PAGE_LIMIT`] and
    /// larger ones are capped at [`MAX_PAGE_LIMIT`]; a missing or
    /// non-positive `page` means the first page.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let limit = limit
            .filter(|limit| *limit >= 1)
            .map_or(DEFAULT_PAGE_LIMIT, |limit| {
                u32::try_from(limit).map_or(MAX_PAGE_LIMIT, |limit| limit.min(MAX_PAGE_LIMIT))
            });

        let offset = match page {
            Some(page) if page > 1 => {
                u64::try_from(page - 1).map_or(0, |skipped| skipped.saturating_mul(u64::from(limit)))
            }
            _ => 0,
        };

        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn line(id: u128, quantity: u32) -> CartLine {
        CartLine {
            product_uuid: ProductUuid::from_uuid(Uuid::from_u128(id)),
            quantity,
        }
    }

    fn order(lines: Vec<CartLine>) -> NewOrder {
        NewOrder {
            address_uuid: AddressUuid::new(),
            payment_method: "transfer".to_string(),
            lines,
        }
    }

    #[test]
    fn valid_order_passes() {
        assert!(order(vec![line(1, 2)]).validate().is_ok(), "order should be valid");
    }

    #[test]
    fn empty_cart_is_rejected() {
        let result = order(Vec::new()).validate();

        assert_eq!(result, Err(OrderValidationError::EmptyCart));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let zero = line(7, 0);
        let result = order(vec![line(1, 1), zero]).validate();

        assert_eq!(result, Err(OrderValidationError::ZeroQuantity(zero.product_uuid)));
    }

    #[test]
    fn nil_address_is_rejected() {
        let mut order = order(vec![line(1, 1)]);
        order.address_uuid = AddressUuid::nil();

        assert_eq!(order.validate(), Err(OrderValidationError::MissingAddress));
    }

    #[test]
    fn blank_payment_method_is_rejected() {
        let mut order = order(vec![line(1, 1)]);
        order.payment_method = "   ".to_string();

        assert_eq!(order.validate(), Err(OrderValidationError::MissingPaymentMethod));
    }

    #[test]
    fn lock_order_is_ascending_and_stable() {
        let order = order(vec![line(3, 1), line(1, 5), line(3, 2), line(2, 1)]);

        let sorted: Vec<(u128, u32)> = order
            .lines_in_lock_order()
            .iter()
            .map(|line| (line.product_uuid.into_uuid().as_u128(), line.quantity))
            .collect();

        assert_eq!(sorted, vec![(1, 5), (2, 1), (3, 1), (3, 2)]);
    }

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        assert_eq!(Pagination::new(None, None), Pagination { limit: 10, offset: 0 });
        assert_eq!(Pagination::default(), Pagination { limit: 10, offset: 0 });
    }

    #[test]
    fn pagination_treats_non_positive_values_as_missing() {
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { limit: 10, offset: 0 });
        assert_eq!(Pagination::new(Some(-3), Some(-1)), Pagination { limit: 10, offset: 0 });
    }

    #[test]
    fn pagination_pages_are_one_based() {
        assert_eq!(Pagination::new(Some(1), Some(5)), Pagination { limit: 5, offset: 0 });
        assert_eq!(Pagination::new(Some(3), Some(5)), Pagination { limit: 5, offset: 10 });
        assert_eq!(Pagination::new(Some(2), None), Pagination { limit: 10, offset: 10 });
    }

    #[test]
    fn pagination_offset_saturates() {
        let pagination = Pagination::new(Some(i64::MAX), Some(i64::MAX));

        assert_eq!(pagination.limit, MAX_PAGE_LIMIT);
        assert_eq!(pagination.offset, u64::MAX);
    }

    #[test]
    fn pagination_limit_is_capped() {
        assert_eq!(Pagination::new(None, Some(100)).limit, 100);
        assert_eq!(Pagination::new(None, Some(101)).limit, MAX_PAGE_LIMIT);
        assert_eq!(
            Pagination::new(Some(2), Some(5_000)),
            Pagination { limit: 100, offset: 100 }
        );
    }
}
