use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use mcq_bank_server::{
    app_state::AppState, config::Config, graphql, handlers, middleware::RequestIdMiddleware,
};

fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::IF_NONE_MATCH])
        .expose_headers(vec![header::CONTENT_DISPOSITION, header::ETAG])
        .max_age(3600);

    match &config.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let bind_address = config.bind_address();

    let app_state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let schema = graphql::create_schema(app_state.clone());

    log::info!(
        "Starting HTTP server on http://{}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new("%a \"%r\" %s %b %{x-request-id}o %T"))
            .wrap(cors(&app_state.config))
            .configure(handlers::configure)
            .configure(graphql::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
