//! Shared MongoDB 7.0 container and a synchronous `TestStore` for seeding and
//! checking books collections. Each test gets its own database name.

#![allow(dead_code)]

pub mod fixtures;

use std::future::Future;
use std::sync::OnceLock;

use bookstore_queries::config::SessionConfig;
use bookstore_queries::models::Book;
use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::runtime::Runtime;

/// Connection info for the shared container.
struct SharedContainer {
    connection_string: String,
}

static SHARED: OnceLock<SharedContainer> = OnceLock::new();

/// Removed by `remove_container` at exit.
static CONTAINER_ID: OnceLock<String> = OnceLock::new();

unsafe extern "C" {
    fn atexit(f: extern "C" fn()) -> i32;
}

extern "C" fn remove_container() {
    if let Some(id) = CONTAINER_ID.get() {
        let _ = std::process::Command::new("docker")
            .args(["rm", "-f", id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
    }
}

/// Start the container on first use; it runs on its own thread until exit.
fn get_or_init_shared() -> &'static SharedContainer {
    SHARED.get_or_init(|| {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create container runtime");

            rt.block_on(async {
                let container = Mongo::default()
                    .with_tag("7.0")
                    .start()
                    .await
                    .expect("Failed to start MongoDB container");

                let _ = CONTAINER_ID.set(container.id().to_string());
                unsafe {
                    atexit(remove_container);
                }

                let host = container.get_host().await.expect("Failed to get host");
                let port = container.get_host_port_ipv4(27017).await.expect("Failed to get port");
                let connection_string = format!("mongodb://{}:{}", host, port);

                let opts = ClientOptions::parse(&connection_string).await.expect("Failed to parse");
                let client = Client::with_options(opts).expect("Failed to create client");
                for _ in 0..30 {
                    if client.list_database_names().await.is_ok() {
                        break;
                    }
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
                drop(client);

                tx.send(connection_string).expect("Failed to send connection string");

                std::future::pending::<()>().await;
            });
        });

        SharedContainer {
            connection_string: rx.recv().expect("Failed to receive connection string"),
        }
    })
}

/// A handle to the shared MongoDB container bound to one namespaced database.
pub struct TestStore {
    runtime: Runtime,
    client: Client,
    pub connection_string: String,
    pub database: String,
}

impl TestStore {
    /// Get a handle with a database named `{name}_{test_id}`.
    pub fn start(name: &str) -> Self {
        let shared = get_or_init_shared();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create test runtime");

        let client = runtime.block_on(async {
            let options = ClientOptions::parse(&shared.connection_string)
                .await
                .expect("Failed to parse connection string");
            Client::with_options(options).expect("Failed to create client")
        });

        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        Self {
            runtime,
            client,
            connection_string: shared.connection_string.clone(),
            database: format!("{}_{}", name, test_id),
        }
    }

    /// Runner configuration pointing at `collection` in this test's database.
    pub fn config(&self, collection: &str) -> SessionConfig {
        SessionConfig {
            uri: self.connection_string.clone(),
            database: self.database.clone(),
            collection: collection.to_string(),
            server_selection_timeout_ms: Some(10_000),
            ..SessionConfig::default()
        }
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.client.database(&self.database).collection(name)
    }

    pub fn seed(&self, collection: &str, books: &[Book]) {
        let docs: Vec<Document> =
            books.iter().map(|book| book.to_document().expect("Failed to serialize")).collect();
        self.seed_documents(collection, docs);
    }

    pub fn seed_documents(&self, collection: &str, docs: Vec<Document>) {
        let coll = self.collection(collection);
        self.block_on(async { coll.insert_many(docs).await.expect("Failed to insert") });
    }

    pub fn find_one(&self, collection: &str, filter: Document) -> Option<Document> {
        let coll = self.collection(collection);
        self.block_on(async { coll.find_one(filter).await.expect("Failed to find") })
    }

    pub fn count(&self, collection: &str, filter: Document) -> u64 {
        let coll = self.collection(collection);
        self.block_on(async { coll.count_documents(filter).await.expect("Failed to count") })
    }

    pub fn indexes(&self, collection: &str) -> Vec<IndexModel> {
        let coll = self.collection(collection);
        self.block_on(async {
            coll.list_indexes()
                .await
                .expect("Failed to list")
                .try_collect()
                .await
                .expect("Failed to collect")
        })
    }
}
