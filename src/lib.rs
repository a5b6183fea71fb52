//! Knowledge-graph memory for AI agents — persistent entities, observations, and
//! relations via MCP.
//!
//! Graphmem is an [MCP](https://modelcontextprotocol.io/) server that gives AI agents
//! a shared knowledge graph. The graph stores three kinds of records:
//!
//! | Kind | Purpose | Uniqueness |
//! |------|---------|------------|
//! | **Entity** | A named node with a free-form type label | Global on `name` |
//! | **Observation** | A text note attached to one entity | Per entity on `content` |
//! | **Relation** | A directed typed edge between two entities | On `(from, to, relationType)` |
//!
//! Nine MCP tools create, delete, search, and dump the graph. Every tool call runs as
//! a single SQLite transaction, so a failed batch leaves no partial effects, and
//! re-running a create is a cheap no-op.
//!
//! # Architecture
//!
//! - **Storage**: SQLite with FTS5 (porter stemming) for full-text search and
//!   `ON DELETE CASCADE` foreign keys for entity teardown
//! - **Search**: case-insensitive substring match combined with stemmed FTS5 match
//!   over entity names and observation contents
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, and migrations
//! - [`graph`] — Core graph engine: create, delete, and query operations

pub mod config;
pub mod db;
pub mod graph;
