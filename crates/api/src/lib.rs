mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
use finance_reminders_infra::ReminderContext;
use job_schedulers::start_send_reminders_job;
use std::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    shutdown: CancellationToken,
    reminders_job: JoinHandle<()>,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let shutdown = CancellationToken::new();
        let reminders_job = start_send_reminders_job(context, shutdown.clone());

        Ok(Self {
            server,
            port,
            shutdown,
            reminders_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(
        context: ReminderContext,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Runs the server until it is stopped, e.g. by Ctrl-C, and then waits
    /// for the reminders job to finish its current tick.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;

        info!("Server stopped, shutting down the reminders job");
        self.shutdown.cancel();
        if let Err(e) = self.reminders_job.await {
            error!("Reminders job did not shut down cleanly: {:?}", e);
        }

        res
    }
}
