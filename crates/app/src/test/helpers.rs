//! Test Helpers

use sqlx::query_as;

use crate::{
    domain::{
        DEFAULT_CURRENCY,
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        services::{
            ServicesService, ServicesServiceError,
            data::NewService,
            records::{ServiceRecord, ServiceUuid},
        },
        stores::{
            StoresService, StoresServiceError,
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::{IdentityEvent, IdentityProfile},
            records::{UserRecord, UserUuid},
        },
        vendors::{
            VendorsService, VendorsServiceError,
            data::NewVendor,
            records::{VendorRecord, VendorUuid},
        },
    },
    test::TestContext,
};

/// Mirror an identity-provider user named after `subject`.
pub(crate) async fn create_user(
    ctx: &TestContext,
    subject: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .sync_identity_event(IdentityEvent::Created(IdentityProfile {
            subject: subject.to_string(),
            name: "Ada Lovelace".to_string(),
            email: Some(format!("{subject}@example.com")),
            username: Some(subject.to_string()),
            avatar_url: None,
        }))
        .await?;

    ctx.find_user(subject).await
}

pub(crate) async fn create_vendor(
    ctx: &TestContext,
    user: UserUuid,
) -> Result<VendorRecord, VendorsServiceError> {
    ctx.vendors
        .create_vendor(
            user,
            NewVendor {
                uuid: VendorUuid::new(),
                display_name: "Test Vendor".to_string(),
                description: Some("Sells things in tests".to_string()),
                image_url: None,
            },
        )
        .await
}

pub(crate) fn new_store(url: &str) -> NewStore {
    NewStore {
        uuid: StoreUuid::new(),
        name: format!("Store {url}"),
        description: None,
        logo_url: None,
        url: url.to_string(),
        address: "1 Market Street".to_string(),
        whatsapp_contact: "+15551234567".to_string(),
    }
}

pub(crate) async fn create_store(
    ctx: &TestContext,
    vendor: VendorUuid,
    url: &str,
) -> Result<StoreRecord, StoresServiceError> {
    ctx.stores.create_store(vendor, new_store(url)).await
}

pub(crate) fn new_product(price: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: "Test Item".to_string(),
        description: Some("Used in tests".to_string()),
        image_url: None,
        price,
        currency: DEFAULT_CURRENCY.to_string(),
        stock: 10,
        category: None,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    vendor: VendorUuid,
    store: StoreUuid,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(vendor, store, new_product(price))
        .await
}

pub(crate) fn new_service(rate: u64) -> NewService {
    NewService {
        uuid: ServiceUuid::new(),
        name: "Consultation".to_string(),
        description: Some("One hour session".to_string()),
        image_url: None,
        rate,
        currency: DEFAULT_CURRENCY.to_string(),
    }
}

pub(crate) async fn create_service(
    ctx: &TestContext,
    vendor: VendorUuid,
    store: StoreUuid,
    rate: u64,
) -> Result<ServiceRecord, ServicesServiceError> {
    ctx.services
        .create_service(vendor, store, new_service(rate))
        .await
}

/// Count `(orders, order_items)` rows.
pub(crate) async fn order_counts(ctx: &TestContext) -> Result<(i64, i64), sqlx::Error> {
    query_as("SELECT (SELECT COUNT(*) FROM orders), (SELECT COUNT(*) FROM order_items)")
        .fetch_one(ctx.db.pool())
        .await
}
