//! Test Helpers

use crate::domain::{
    accounts::records::AddressUuid,
    orders::data::{CartLine, NewOrder},
    products::{
        data::NewProduct,
        records::{CategoryUuid, ProductUuid},
    },
};

pub(crate) fn new_product(category: CategoryUuid, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        category_uuid: category,
        name: "Kopi Susu Gula Aren".to_string(),
        reseller_price: price / 10 * 8,
        consumer_price: price,
        stock,
        description: "Es kopi susu".to_string(),
        photo_urls: Vec::new(),
    }
}

pub(crate) fn new_order(address: AddressUuid, lines: &[(ProductUuid, u32)]) -> NewOrder {
    NewOrder {
        address_uuid: address,
        payment_method: "bank_transfer".to_string(),
        lines: lines
            .iter()
            .map(|&(product_uuid, quantity)| CartLine {
                product_uuid,
                quantity,
            })
            .collect(),
    }
}
