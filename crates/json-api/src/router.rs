//! App Router
//!
//! Static segments such as `products/search` and `stores/availability` are
//! pushed before their `{uuid}` siblings so they are matched first.

use salvo::Router;

use crate::{admin, auth, orders, products, services, stores, users, vendors, webhooks};

/// Routes anyone may call.
fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("services")
                .get(services::index::handler)
                .push(Router::with_path("search").get(services::search::handler)),
        )
        .push(
            Router::with_path("stores")
                .push(Router::with_path("availability").get(stores::availability::handler))
                .push(Router::with_path("{store}").get(stores::get::handler)),
        )
        .push(
            Router::with_path("vendors")
                .get(vendors::index::handler)
                .push(
                    Router::with_path("{vendor}")
                        .get(vendors::get::handler)
                        .push(Router::with_path("stores").get(vendors::stores::handler)),
                ),
        )
        .push(Router::with_path("webhooks/identity").post(webhooks::identity::handler))
}

/// Routes restricted to administrators.
fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::admin::require_admin)
        .push(Router::with_path("stats").get(admin::stats::handler))
        .push(
            Router::with_path("orders")
                .get(admin::orders::handler)
                .push(Router::with_path("{order}/status").put(admin::status::handler)),
        )
}

/// Routes that need a resolved caller.
fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("users/me")
                .get(users::me::handler)
                .put(users::update::handler),
        )
        .push(
            Router::with_path("vendors")
                .post(vendors::create::handler)
                .push(
                    Router::with_path("{vendor}")
                        .put(vendors::update::handler)
                        .delete(vendors::delete::handler),
                ),
        )
        .push(
            Router::with_path("stores").post(stores::create::handler).push(
                Router::with_path("{store}")
                    .put(stores::update::handler)
                    .delete(stores::delete::handler)
                    .push(Router::with_path("orders").get(stores::orders::handler))
                    .push(
                        Router::with_path("products")
                            .post(products::create::handler)
                            .push(
                                Router::with_path("{product}")
                                    .put(products::update::handler)
                                    .delete(products::delete::handler),
                            ),
                    )
                    .push(
                        Router::with_path("services")
                            .get(services::store_index::handler)
                            .post(services::create::handler)
                            .push(
                                Router::with_path("{service}")
                                    .put(services::update::handler)
                                    .delete(services::delete::handler),
                            ),
                    ),
            ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(admin_router())
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(authenticated_router())
}
