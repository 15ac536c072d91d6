pub mod handlers;
pub mod models;
pub mod repository;

use async_trait::async_trait;
use axum::{
    routing::get,
    Router,
};

use libris_kernel::{InitCtx, Migration, Module};

use repository::BookRepository;

/// The book resource module: one table, four operations, mounted under
/// every API version prefix.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        let repo = BookRepository::new(ctx.db.clone());

        Router::new()
            .route("/", get(handlers::list_books).post(handlers::create_book))
            .route(
                "/{id}",
                get(handlers::get_book).delete(handlers::delete_book),
            )
            .with_state(repo)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List live books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Success envelope with result.books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ResponseForm" }
                                    }
                                }
                            },
                            "500": { "$ref": "#/components/responses/ErrorArray" }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Success envelope with result.book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ResponseForm" }
                                    }
                                }
                            },
                            "422": { "$ref": "#/components/responses/ErrorArray" },
                            "500": { "$ref": "#/components/responses/ErrorArray" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get one live book by id",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "minimum": 0 }
                        }],
                        "responses": {
                            "200": {
                                "description": "Success envelope with result.book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ResponseForm" }
                                    }
                                }
                            },
                            "400": { "$ref": "#/components/responses/ErrorArray" },
                            "404": { "$ref": "#/components/responses/ErrorArray" },
                            "500": { "$ref": "#/components/responses/ErrorArray" }
                        }
                    },
                    "delete": {
                        "summary": "Soft-delete one live book by id",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer", "minimum": 0 }
                        }],
                        "responses": {
                            "200": {
                                "description": "Success envelope echoing the tombstoned book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ResponseForm" }
                                    }
                                }
                            },
                            "400": { "$ref": "#/components/responses/ErrorArray" },
                            "404": { "description": "No live book with that id; empty body" },
                            "500": { "$ref": "#/components/responses/ErrorArray" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "rating": { "type": "number" },
                            "price": { "type": "number" },
                            "created_at": { "type": "string", "format": "date-time" },
                            "updated_at": { "type": "string", "format": "date-time" },
                            "deleted_at": { "type": "string", "format": "date-time", "nullable": true }
                        },
                        "required": ["id", "title", "author", "rating", "price"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "rating": { "type": "number" },
                            "price": { "type": "number" }
                        }
                    },
                    "ResponseForm": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "result": { "type": "object" },
                            "messages": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["success", "messages"]
                    }
                },
                "responses": {
                    "ErrorArray": {
                        "description": "Failure body: bare errors array, no envelope",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "errors": {
                                            "type": "array",
                                            "items": {
                                                "type": "object",
                                                "properties": {
                                                    "code": { "type": "integer" },
                                                    "source": { "type": "string" },
                                                    "title": { "type": "string" },
                                                    "message": { "type": "string" }
                                                },
                                                "required": ["code", "source", "title", "message"]
                                            }
                                        }
                                    },
                                    "required": ["errors"]
                                }
                            }
                        }
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_create_books",
                up: "CREATE TABLE IF NOT EXISTS books (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        title TEXT NOT NULL DEFAULT '',
                        author TEXT NOT NULL DEFAULT '',
                        rating REAL NOT NULL DEFAULT 0,
                        price REAL NOT NULL DEFAULT 0,
                        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                        deleted_at TIMESTAMP
                    )",
            },
            Migration {
                id: "002_index_books_deleted_at",
                up: "CREATE INDEX IF NOT EXISTS idx_books_deleted_at ON books (deleted_at)",
            },
        ]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
