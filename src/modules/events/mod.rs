pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use crate::modules::docs::{error_response, id_parameter};
use store::EventStore;

/// Events resource: events and the attendees registered for them
pub struct EventsModule {
    store: Arc<EventStore>,
}

impl EventsModule {
    pub fn new() -> Self {
        Self {
            store: Arc::new(EventStore::new()),
        }
    }
}

impl Default for EventsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for EventsModule {
    fn name(&self) -> &'static str {
        "events"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let events = self.store.list().await.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            events,
            "events module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/events": {
                    "get": {
                        "summary": "List events",
                        "tags": ["Events"],
                        "responses": {
                            "200": {
                                "description": "List of events",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Event" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create an event",
                        "tags": ["Events"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateEvent" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created event",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Event" }
                                    }
                                }
                            },
                            "400": error_response("Missing or invalid fields")
                        }
                    }
                },
                "/events/{event_id}": {
                    "get": {
                        "summary": "Get an event",
                        "tags": ["Events"],
                        "parameters": [id_parameter("event_id")],
                        "responses": {
                            "200": {
                                "description": "The event",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Event" }
                                    }
                                }
                            },
                            "404": error_response("Event not found")
                        }
                    }
                },
                "/events/{event_id}/attendees": {
                    "get": {
                        "summary": "List attendees of an event",
                        "tags": ["Events"],
                        "parameters": [id_parameter("event_id")],
                        "responses": {
                            "200": {
                                "description": "Attendees",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Attendee" }
                                        }
                                    }
                                }
                            },
                            "404": error_response("Event not found")
                        }
                    },
                    "post": {
                        "summary": "Register an attendee",
                        "tags": ["Events"],
                        "parameters": [id_parameter("event_id")],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateAttendee" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Registered attendee",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Attendee" }
                                    }
                                }
                            },
                            "400": error_response("Missing or invalid fields"),
                            "404": error_response("Event not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Event": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "date": { "type": "string", "format": "date" },
                            "location": { "type": "string" }
                        },
                        "required": ["id", "name", "date", "location"]
                    },
                    "CreateEvent": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "date": { "type": "string", "format": "date" },
                            "location": { "type": "string" }
                        },
                        "required": ["name", "date", "location"]
                    },
                    "Attendee": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "eventId": { "type": "integer" },
                            "name": { "type": "string" },
                            "email": { "type": "string" }
                        },
                        "required": ["id", "eventId", "name"]
                    },
                    "CreateAttendee": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "email": { "type": "string" }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "events module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "events module stopped");
        Ok(())
    }

    async fn reset(&self) {
        self.store.reset().await;
    }
}

/// Create a new instance of the events module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(EventsModule::new())
}
