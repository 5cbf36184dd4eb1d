//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use marketplace_app::{
    auth::{AuthenticatedUser, MockAuthService, WebhookVerifier},
    context::AppContext,
    domain::{
        DEFAULT_CURRENCY,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        services::{
            MockServicesService,
            records::{ServiceRecord, ServiceUuid},
        },
        stats::MockStatsService,
        stores::{
            MockStoresService,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
        vendors::{
            MockVendorsService,
            records::{VendorRecord, VendorUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_VENDOR_UUID: VendorUuid = VendorUuid::from_uuid(Uuid::from_u128(2));
pub(crate) const TEST_STORE_UUID: StoreUuid = StoreUuid::from_uuid(Uuid::from_u128(3));

/// base64("webhook-test-secret")
pub(crate) const TEST_WEBHOOK_SECRET: &str = "whsec_d2ViaG9vay10ZXN0LXNlY3JldA==";

pub(crate) fn buyer() -> AuthenticatedUser {
    AuthenticatedUser {
        user: TEST_USER_UUID,
        vendor: None,
        is_admin: false,
    }
}

pub(crate) fn vendor() -> AuthenticatedUser {
    AuthenticatedUser {
        vendor: Some(TEST_VENDOR_UUID),
        ..buyer()
    }
}

pub(crate) fn admin() -> AuthenticatedUser {
    AuthenticatedUser {
        is_admin: true,
        ..buyer()
    }
}

/// One mock per service. Mocks without expectations panic when called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) users: MockUsersService,
    pub(crate) vendors: MockVendorsService,
    pub(crate) stores: MockStoresService,
    pub(crate) products: MockProductsService,
    pub(crate) services: MockServicesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) stats: MockStatsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            users: Arc::new(self.users),
            vendors: Arc::new(self.vendors),
            stores: Arc::new(self.stores),
            products: Arc::new(self.products),
            services: Arc::new(self.services),
            orders: Arc::new(self.orders),
            stats: Arc::new(self.stats),
            auth: Arc::new(self.auth),
        };

        let webhooks =
            WebhookVerifier::new(TEST_WEBHOOK_SECRET).expect("test secret should decode");

        State::shared(app, webhooks)
    }
}

/// Hoop that stands in for the auth middleware.
struct InjectCaller(AuthenticatedUser);

#[handler]
impl InjectCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_current_user(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Serve `route` with mocked services, optionally as an already authenticated caller.
pub(crate) fn service(mocks: Mocks, caller: Option<AuthenticatedUser>, route: Router) -> Service {
    let router = Router::new().hoop(inject(mocks.into_state()));

    let router = match caller {
        Some(caller) => router.hoop(InjectCaller(caller)),
        None => router,
    };

    Service::new(router.push(route))
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        subject: "user_2abc".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        avatar_url: None,
        address: None,
        phone: None,
        is_admin: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_vendor(uuid: VendorUuid) -> VendorRecord {
    VendorRecord {
        uuid,
        user_uuid: Some(TEST_USER_UUID),
        display_name: "Ada's Atelier".to_string(),
        description: None,
        image_url: None,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_store(uuid: StoreUuid) -> StoreRecord {
    StoreRecord {
        uuid,
        vendor_uuid: TEST_VENDOR_UUID,
        name: "Ada's Store".to_string(),
        description: None,
        logo_url: None,
        url: "ada-store".to_string(),
        address: "1 Market Street".to_string(),
        whatsapp_contact: "+15551234567".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        store_uuid: TEST_STORE_UUID,
        name: "Leather Boots".to_string(),
        description: Some("Waterproof leather boots".to_string()),
        image_url: None,
        price,
        currency: DEFAULT_CURRENCY.to_string(),
        stock: 10,
        category: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_service_record(uuid: ServiceUuid, rate: u64) -> ServiceRecord {
    ServiceRecord {
        uuid,
        store_uuid: TEST_STORE_UUID,
        name: "Boot Repair".to_string(),
        description: None,
        image_url: None,
        rate,
        currency: DEFAULT_CURRENCY.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// An order for `TEST_USER_UUID` with one line per `(product, quantity)`.
pub(crate) fn make_order(uuid: OrderUuid, lines: &[(ProductRecord, u32)]) -> OrderRecord {
    let items: Vec<OrderItemRecord> = lines
        .iter()
        .map(|(product, quantity)| OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: product.uuid,
            quantity: *quantity,
            price: product.price,
            product: product.clone(),
        })
        .collect();

    OrderRecord {
        uuid,
        user_uuid: Some(TEST_USER_UUID),
        store_uuid: Some(TEST_STORE_UUID),
        status: OrderStatus::Pending,
        total_amount: items
            .iter()
            .map(|item| item.price * u64::from(item.quantity))
            .sum(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        items,
    }
}
