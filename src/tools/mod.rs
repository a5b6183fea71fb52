pub mod add_observations;
pub mod create_entities;
pub mod create_relations;
pub mod delete_entities;
pub mod delete_observations;
pub mod delete_relations;
pub mod open_nodes;
pub mod read_graph;
pub mod search_nodes;

use add_observations::AddObservationsParams;
use create_entities::CreateEntitiesParams;
use create_relations::CreateRelationsParams;
use delete_entities::DeleteEntitiesParams;
use delete_observations::DeleteObservationsParams;
use delete_relations::DeleteRelationsParams;
use open_nodes::OpenNodesParams;
use read_graph::ReadGraphParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use rusqlite::Connection;
use search_nodes::SearchNodesParams;
use std::sync::{Arc, Mutex};

use crate::graph::{forget, query, store};

/// The graphmem MCP tool handler. Holds the shared database connection and
/// exposes all nine knowledge-graph tools via the `#[tool_router]` macro.
///
/// Tool results are JSON serialized into the text-content envelope by rmcp;
/// a `Err(String)` surfaces the graph engine's message verbatim to the client.
#[derive(Clone)]
pub struct GraphTools {
    tool_router: ToolRouter<Self>,
    db: Arc<Mutex<Connection>>,
}

impl GraphTools {
    /// Run a graph operation on the blocking thread pool with exclusive access
    /// to the connection.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> anyhow::Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db
                .lock()
                .map_err(|e| anyhow::anyhow!("db lock poisoned: {e}"))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| format!("db task failed: {e}"))?
        .map_err(|e| e.to_string())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}

#[tool_router]
impl GraphTools {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            db,
        }
    }

    #[tool(description = "Create multiple new entities in the knowledge graph")]
    async fn create_entities(
        &self,
        Parameters(params): Parameters<CreateEntitiesParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.entities.len(), "create_entities called");
        let created = self
            .with_conn(move |conn| store::create_entities(conn, &params.entities))
            .await?;
        to_json(&created)
    }

    #[tool(
        description = "Create multiple new relations between entities in the knowledge graph. Relations should be in active voice"
    )]
    async fn create_relations(
        &self,
        Parameters(params): Parameters<CreateRelationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.relations.len(), "create_relations called");
        let created = self
            .with_conn(move |conn| store::create_relations(conn, &params.relations))
            .await?;
        to_json(&created)
    }

    #[tool(description = "Add new observations to existing entities in the knowledge graph")]
    async fn add_observations(
        &self,
        Parameters(params): Parameters<AddObservationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.observations.len(), "add_observations called");
        let results = self
            .with_conn(move |conn| store::add_observations(conn, &params.observations))
            .await?;
        to_json(&results)
    }

    #[tool(
        description = "Delete multiple entities and their associated relations from the knowledge graph"
    )]
    async fn delete_entities(
        &self,
        Parameters(params): Parameters<DeleteEntitiesParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.entity_names.len(), "delete_entities called");
        self.with_conn(move |conn| forget::delete_entities(conn, &params.entity_names))
            .await?;
        Ok("Entities deleted successfully".into())
    }

    #[tool(description = "Delete specific observations from entities in the knowledge graph")]
    async fn delete_observations(
        &self,
        Parameters(params): Parameters<DeleteObservationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.deletions.len(), "delete_observations called");
        self.with_conn(move |conn| forget::delete_observations(conn, &params.deletions))
            .await?;
        Ok("Observations deleted successfully".into())
    }

    #[tool(description = "Delete multiple relations from the knowledge graph")]
    async fn delete_relations(
        &self,
        Parameters(params): Parameters<DeleteRelationsParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.relations.len(), "delete_relations called");
        self.with_conn(move |conn| forget::delete_relations(conn, &params.relations))
            .await?;
        Ok("Relations deleted successfully".into())
    }

    #[tool(description = "Read the entire knowledge graph")]
    async fn read_graph(
        &self,
        Parameters(_params): Parameters<ReadGraphParams>,
    ) -> Result<String, String> {
        tracing::info!("read_graph called");
        let graph = self.with_conn(|conn| query::read_graph(conn)).await?;
        to_json(&graph)
    }

    #[tool(description = "Search for nodes in the knowledge graph based on a query")]
    async fn search_nodes(
        &self,
        Parameters(params): Parameters<SearchNodesParams>,
    ) -> Result<String, String> {
        tracing::info!(query = %params.query, "search_nodes called");
        let graph = self
            .with_conn(move |conn| query::search_nodes(conn, &params.query))
            .await?;
        to_json(&graph)
    }

    #[tool(description = "Open specific nodes in the knowledge graph by their names")]
    async fn open_nodes(
        &self,
        Parameters(params): Parameters<OpenNodesParams>,
    ) -> Result<String, String> {
        tracing::info!(count = params.names.len(), "open_nodes called");
        let graph = self
            .with_conn(move |conn| query::open_nodes(conn, &params.names))
            .await?;
        to_json(&graph)
    }
}

#[tool_handler]
impl ServerHandler for GraphTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Graphmem is a knowledge-graph memory server. Use create_entities, \
                 create_relations, and add_observations to build the graph; search_nodes \
                 and open_nodes to retrieve from it; read_graph to dump everything."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
