//! ConnectionManager and the scoped connection it hands out.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tokio::runtime::{Handle, Runtime};

use crate::config::SessionConfig;
use crate::error::Result;

/// Owns the Tokio runtime that drives every driver call.
pub struct ConnectionManager {
    /// Tokio runtime for MongoDB async operations
    pub(crate) runtime: Runtime,
    /// Connections handed out and not yet shut down
    open: Arc<AtomicUsize>,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new()?;
        Ok(Self { runtime, open: Arc::new(AtomicUsize::new(0)) })
    }

    /// Number of connections from this manager that have not been released yet.
    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Open a connection for the configured database and collection and ping
    /// the server. The returned connection is shut down on `close` or drop.
    pub fn connect(&self, config: &SessionConfig) -> Result<ScopedConnection> {
        let client = self.runtime.block_on(async {
            let mut options = ClientOptions::parse(&config.uri).await?;
            if let Some(timeout) = config.server_selection_timeout() {
                options.server_selection_timeout = Some(timeout);
            }
            if let Some(app_name) = &config.app_name {
                options.app_name = Some(app_name.clone());
            }
            Client::with_options(options)
        })?;

        self.open.fetch_add(1, Ordering::SeqCst);
        let connection = ScopedConnection {
            client,
            handle: self.runtime.handle().clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
            open: Arc::clone(&self.open),
            closed: false,
        };
        connection.ping()?;
        log::info!(
            "Connected to {} ({}.{})",
            config.redacted_uri(),
            config.database,
            config.collection
        );
        Ok(connection)
    }
}

/// A live client bound to one database and collection.
///
/// Dropping the value shuts the client down, so every exit path of the code
/// holding it releases the connection.
pub struct ScopedConnection {
    client: Client,
    handle: Handle,
    database: String,
    collection: String,
    open: Arc<AtomicUsize>,
    closed: bool,
}

impl ScopedConnection {
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    pub fn collection(&self) -> Collection<Document> {
        self.database().collection::<Document>(&self.collection)
    }

    /// Drive a driver future to completion on the manager's runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.handle.block_on(future)
    }

    fn ping(&self) -> Result<()> {
        let client = self.client.clone();
        self.block_on(async move {
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            Ok(())
        })
    }

    /// Shut the client down and wait for its background tasks to finish.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.open.fetch_sub(1, Ordering::SeqCst);

        // block_on panics inside a runtime context; the driver cleans up on drop there.
        if Handle::try_current().is_ok() {
            log::warn!("Releasing connection to {} without graceful shutdown", self.database);
            return;
        }
        let client = self.client.clone();
        self.handle.block_on(async move { client.shutdown().await });
        log::info!("Connection to {} closed", self.database);
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.shutdown();
    }
}
