//! JSON Schema for the persisted registry document.
//!
//! The document is user-editable, so structural validation has to produce
//! readable, path-qualified messages rather than a single decode failure.
//! The schema mirrors the serde models in [`crate::document`] and rejects
//! unknown properties everywhere.

use serde_json::{Value, json};

/// Pattern for owner names.
pub const OWNER_NAME_PATTERN: &str = "^[A-Za-z0-9-_.]+$";

/// Pattern for `owner/repo` repository names.
pub const REPOSITORY_NAME_PATTERN: &str = "^[A-Za-z0-9-_.]+/[A-Za-z0-9-_.]+$";

/// The schema the structural validation phase checks raw documents against.
pub fn db_config_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "required": ["version", "databases"],
        "properties": {
            "version": { "type": "integer" },
            "databases": {
                "type": "object",
                "additionalProperties": false,
                "required": ["remote", "local"],
                "properties": {
                    "remote": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["repositoryLists", "owners", "repositories"],
                        "properties": {
                            "repositoryLists": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/remoteRepositoryList" }
                            },
                            "owners": {
                                "type": "array",
                                "items": { "type": "string", "pattern": OWNER_NAME_PATTERN }
                            },
                            "repositories": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/repositoryName" }
                            }
                        }
                    },
                    "local": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["lists", "databases"],
                        "properties": {
                            "lists": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/localList" }
                            },
                            "databases": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/localDatabase" }
                            }
                        }
                    }
                }
            },
            "selected": { "$ref": "#/definitions/selectedDbItem" },
            "expanded": {
                "type": "array",
                "items": { "$ref": "#/definitions/expandedDbItem" }
            }
        },
        "definitions": {
            "repositoryName": {
                "type": "string",
                "pattern": REPOSITORY_NAME_PATTERN
            },
            "remoteRepositoryList": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name", "repositories"],
                "properties": {
                    "name": { "type": "string" },
                    "repositories": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/repositoryName" }
                    }
                }
            },
            "localList": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name", "databases"],
                "properties": {
                    "name": { "type": "string" },
                    "databases": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/localDatabase" }
                    }
                }
            },
            "localDatabase": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name", "dateAdded", "language", "storagePath"],
                "properties": {
                    "name": { "type": "string" },
                    "dateAdded": { "type": "integer" },
                    "language": { "type": "string" },
                    "storagePath": { "type": "string" }
                }
            },
            "selectedDbItem": {
                "oneOf": [
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "listName"],
                        "properties": {
                            "kind": { "const": "localUserDefinedList" },
                            "listName": { "type": "string" }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "databaseName"],
                        "properties": {
                            "kind": { "const": "localDatabase" },
                            "databaseName": { "type": "string" },
                            "listName": { "type": "string" }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "listName"],
                        "properties": {
                            "kind": { "const": "remoteSystemDefinedList" },
                            "listName": { "type": "string" }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "listName"],
                        "properties": {
                            "kind": { "const": "remoteUserDefinedList" },
                            "listName": { "type": "string" }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "ownerName"],
                        "properties": {
                            "kind": { "const": "remoteOwner" },
                            "ownerName": { "type": "string", "pattern": OWNER_NAME_PATTERN }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "repositoryName"],
                        "properties": {
                            "kind": { "const": "remoteRepository" },
                            "repositoryName": { "$ref": "#/definitions/repositoryName" },
                            "listName": { "type": "string" }
                        }
                    }
                ]
            },
            "expandedDbItem": {
                "oneOf": [
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind"],
                        "properties": {
                            "kind": { "enum": ["rootLocal", "rootRemote"] }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["kind", "listName"],
                        "properties": {
                            "kind": {
                                "enum": ["localUserDefinedList", "remoteUserDefinedList"]
                            },
                            "listName": { "type": "string" }
                        }
                    }
                ]
            }
        }
    })
}
