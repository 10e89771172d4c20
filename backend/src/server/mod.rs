//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use itembox::Trace;
#[cfg(debug_assertions)]
use itembox::doc::ApiDoc;
use itembox::inbound::http;
use itembox::inbound::http::health::{HealthState, live, ready};
use itembox::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(http::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build handler state, bind the listener and mark the service ready.
///
/// # Errors
///
/// Fails when demo seeding fails or the socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config).await?;
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> ServerConfig {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("loopback address");
        ServerConfig::new(Key::generate(), false, addr)
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready(config: ServerConfig) {
        let health_state = web::Data::new(HealthState::new());
        assert!(!health_state.is_ready());

        let _server = create_server(health_state.clone(), config)
            .await
            .expect("server builds");

        assert!(health_state.is_ready());
    }

    #[rstest]
    #[actix_web::test]
    async fn in_memory_app_logs_in_demo_user(config: ServerConfig) {
        let http_state = build_http_state(&config).await.expect("state builds");
        let app = test::init_service(build_app(AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state,
            key: config.key.clone(),
            cookie_secure: false,
        }))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "john"), ("password", "maxsecure")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
    }
}
