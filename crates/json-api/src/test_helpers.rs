//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use smallvec::smallvec;
use uuid::Uuid;

use marketplace_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AddressUuid, StoreUuid, UserUuid},
        },
        orders::{
            MockOrdersService,
            invoice::InvoiceCode,
            records::{AddressSummary, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{CategoryUuid, ProductPhoto, ProductPhotoUuid, ProductRecord, ProductUuid},
        },
        snapshots::records::{
            CategorySummary, SnapshotPhoto, SnapshotPhotoUuid, SnapshotRecord, SnapshotUuid,
            StoreSummary,
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_STORE_UUID: StoreUuid = StoreUuid::from_uuid(Uuid::from_u128(7));

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_create_user().never();
    accounts.expect_create_store().never();
    accounts.expect_get_store().never();
    accounts.expect_create_address().never();

    accounts
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_create_category().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();

    orders
}

fn state(
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        accounts: Arc::new(strict_accounts_mock()),
        products: Arc::new(products),
        orders: Arc::new(orders),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_products_mock(), strict_orders_mock(), auth)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                products,
                strict_orders_mock(),
                strict_auth_mock(),
            )))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_products_mock(),
                orders,
                strict_auth_mock(),
            )))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        store_uuid: TEST_STORE_UUID,
        category_uuid: CategoryUuid::from_uuid(Uuid::from_u128(3)),
        name: "Kopi Susu".to_string(),
        slug: "kopi-susu".to_string(),
        reseller_price: 800,
        consumer_price: 1_000,
        stock: 10,
        description: "Es kopi susu".to_string(),
        photos: smallvec![ProductPhoto {
            uuid: ProductPhotoUuid::from_uuid(Uuid::from_u128(4)),
            url: "https://cdn.example.com/kopi.jpg".to_string(),
            position: 0,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// An order with one line of `quantity` units at 1 000 each.
pub(crate) fn make_order(uuid: OrderUuid, quantity: u64) -> OrderRecord {
    let store = StoreSummary {
        uuid: TEST_STORE_UUID,
        name: "Toko Kopi".to_string(),
        photo_url: None,
    };

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        invoice_code: InvoiceCode::from_stored("INV-1234567890".to_string()),
        payment_method: "bank_transfer".to_string(),
        total: quantity * 1_000,
        address: AddressSummary {
            uuid: AddressUuid::from_uuid(Uuid::from_u128(5)),
            title: "Rumah".to_string(),
            recipient_name: "Budi".to_string(),
            phone: "+62 812 0000 0000".to_string(),
            details: "Jl. Merdeka No. 1".to_string(),
        },
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            quantity,
            total: quantity * 1_000,
            store: store.clone(),
            snapshot: SnapshotRecord {
                uuid: SnapshotUuid::new(),
                product_uuid: ProductUuid::from_uuid(Uuid::from_u128(6)),
                name: "Kopi Susu".to_string(),
                slug: "kopi-susu".to_string(),
                reseller_price: 800,
                consumer_price: 1_000,
                description: "Es kopi susu".to_string(),
                store,
                category: CategorySummary {
                    uuid: CategoryUuid::from_uuid(Uuid::from_u128(3)),
                    name: "Minuman".to_string(),
                },
                photos: smallvec![SnapshotPhoto {
                    uuid: SnapshotPhotoUuid::new(),
                    url: "https://cdn.example.com/kopi.jpg".to_string(),
                    position: 0,
                }],
                created_at: Timestamp::UNIX_EPOCH,
            },
        }],
        created_at: Timestamp::UNIX_EPOCH,
    }
}
