use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{Instrument, error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::site::Site;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let site = Arc::new(Site::from_config(cfg)?);
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        "Listening on {}, serving {}",
        listener.local_addr()?,
        site.doc_root.display()
    );

    serve(listener, site).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, site: Arc<Site>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let site = site.clone();
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, site);
                if let Err(e) = conn.run().await {
                    warn!("Connection error: {:#}", e);
                }
                info!("Connection closed");
            }
            .instrument(span),
        );
    }
}
