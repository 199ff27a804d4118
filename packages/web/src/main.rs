use dioxus::prelude::*;

use releases::MenuKey;
use ui::{AuthProvider, DataProvider};
use views::{Clients, Dashboard, Login, Modules, Register, Reports, SidebarLayout, Users, Versions};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(SidebarLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/modules")]
        Modules {},
        #[route("/clients")]
        Clients {},
        #[route("/versions")]
        Versions {},
        #[route("/reports")]
        Reports {},
        #[route("/users")]
        Users {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Menu entry a route belongs to, for routes inside the sidebar layout.
    fn menu(&self) -> Option<MenuKey> {
        match self {
            Route::Dashboard {} => Some(MenuKey::Dashboard),
            Route::Modules {} => Some(MenuKey::Modules),
            Route::Clients {} => Some(MenuKey::Clients),
            Route::Versions {} => Some(MenuKey::Versions),
            Route::Reports {} => Some(MenuKey::Reports),
            Route::Users {} => Some(MenuKey::Users),
            Route::Root {} | Route::Login {} | Route::Register {} | Route::NotFound { .. } => None,
        }
    }

    fn for_menu(key: MenuKey) -> Self {
        match key {
            MenuKey::Dashboard => Route::Dashboard {},
            MenuKey::Modules => Route::Modules {},
            MenuKey::Clients => Route::Clients {},
            MenuKey::Versions => Route::Versions {},
            MenuKey::Reports => Route::Reports {},
            MenuKey::Users => Route::Users {},
        }
    }
}

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = api::settings::settings();

    // Initialize database pool
    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    // Run migrations
    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to create session table");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.session.expiry_days)));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        AuthProvider {
            DataProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "splash",
            "Nothing at /{path}. "
            Link { to: Route::Dashboard {}, "Back to the dashboard" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_key_has_a_route() {
        for key in MenuKey::ALL {
            assert_eq!(Route::for_menu(key).menu(), Some(key));
        }
        assert_eq!(Route::Login {}.menu(), None);
    }
}
