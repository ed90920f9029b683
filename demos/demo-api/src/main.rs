use dekor::prelude::*;

mod controllers;
mod models;

use controllers::{HealthController, UserController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut app = App::new();
    app.set_application_name("demo-api");
    app.set_global_prefix("api/v1")?;
    app.register_controllers(&controllers![UserController, HealthController])?;
    app.enable_cors(CorsLayer::permissive());
    app.enable_trace();
    app.install_exception_boundary();
    app.listen(8080).await
}
