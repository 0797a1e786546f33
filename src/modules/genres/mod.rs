pub mod auth;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_authz::{SharedAuthenticator, SharedSecret};
use catalog_kernel::{settings::AuthSettings, InitCtx, Module};
use serde_json::json;

use crate::modules::docs::{error_response, id_parameter};
use routes::GenresState;
use store::GenreStore;

/// Genres resource: genres, the books filed under them, and the flattened
/// book listing
pub struct GenresModule {
    store: Arc<GenreStore>,
    authenticator: SharedAuthenticator,
}

impl GenresModule {
    pub fn new(authenticator: SharedAuthenticator) -> Self {
        Self {
            store: Arc::new(GenreStore::new()),
            authenticator,
        }
    }
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.list_books().await.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "genres module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(GenresState {
            store: self.store.clone(),
            authenticator: self.authenticator.clone(),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_path = [id_parameter("genre_id"), id_parameter("book_id")];

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List every book across genres",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/genres": {
                    "get": {
                        "summary": "List genres with their books",
                        "tags": ["Genres"],
                        "responses": {
                            "200": {
                                "description": "List of genres",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Genre" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a genre",
                        "tags": ["Genres"],
                        "security": [{ "sharedSecret": [] }],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateGenre" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created genre",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Genre" }
                                    }
                                }
                            },
                            "401": error_response("Missing or rejected Authorization header")
                        }
                    }
                },
                "/genres/{genre_id}/books": {
                    "get": {
                        "summary": "List books of a genre",
                        "tags": ["Books"],
                        "parameters": [id_parameter("genre_id")],
                        "responses": {
                            "200": {
                                "description": "Books of the genre",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "404": error_response("Genre not found")
                        }
                    },
                    "post": {
                        "summary": "Create a book in a genre",
                        "tags": ["Books"],
                        "parameters": [id_parameter("genre_id")],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": error_response("Missing or invalid fields"),
                            "404": error_response("Genre not found")
                        }
                    }
                },
                "/genres/{genre_id}/books/{book_id}": {
                    "get": {
                        "summary": "Get a book within its genre",
                        "tags": ["Books"],
                        "parameters": book_path,
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": error_response("Book not found in this genre")
                        }
                    },
                    "patch": {
                        "summary": "Partially update a book",
                        "tags": ["Books"],
                        "parameters": book_path,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPatch" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": error_response("No updatable property, or unknown target genre"),
                            "404": error_response("Book not found in this genre")
                        }
                    }
                }
            },
            "components": {
                "securitySchemes": {
                    "sharedSecret": {
                        "type": "apiKey",
                        "in": "header",
                        "name": "Authorization"
                    }
                },
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genreId": { "type": "integer" }
                        },
                        "required": ["id", "title", "author", "genreId"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genreId": { "type": "integer" }
                        },
                        "required": ["title", "author"]
                    },
                    "BookPatch": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genreId": { "type": "integer" }
                        },
                        "minProperties": 1
                    },
                    "Genre": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["id", "name", "books"]
                    },
                    "CreateGenre": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "genres module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "genres module stopped");
        Ok(())
    }

    async fn reset(&self) {
        self.store.reset().await;
    }
}

/// Create a new instance of the genres module guarded by the configured
/// shared secret
pub fn create_module(auth: &AuthSettings) -> Arc<dyn Module> {
    Arc::new(GenresModule::new(SharedSecret::shared(
        auth.genre_credential.clone(),
    )))
}
