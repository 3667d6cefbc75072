//! Resource URIs and descriptors.
//!
//! Every resource lives under `collection://`. Templated paths carry either
//! a single deck ID or name, a model name, or a comma-separated ID list.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};
use serde_json::json;

/// URI scheme shared by all resources.
pub const SCHEME: &str = "collection://";

/// MIME type of every resource body.
pub const JSON_MIME: &str = "application/json";

/// A parsed resource URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    /// `collection://decks`
    Decks,
    /// `collection://decks/{id}/config`
    DeckConfig(String),
    /// `collection://decks/{id}/stats`
    DeckStats(String),
    /// `collection://models`
    Models,
    /// `collection://models/{name}`
    Model(String),
    /// `collection://cards/{ids}/info`
    CardsInfo(String),
    /// `collection://notes/{ids}/info`
    NotesInfo(String),
    /// `collection://cards/{ids}/reviews`
    CardReviews(String),
    /// `collection://tags`
    Tags,
    /// `collection://session/current`
    CurrentSession,
    /// `collection://collection/stats`
    CollectionStats,
    /// `collection://stats/daily`
    DailyStats,
}

impl ResourceRoute {
    /// Match a URI against the known resources.
    ///
    /// ID list segments are returned raw; the engine splits and coerces them.
    pub fn parse(uri: &str) -> Option<Self> {
        let path = uri.strip_prefix(SCHEME)?;
        let segments: Vec<&str> = path.split('/').collect();

        let route = match segments.as_slice() {
            ["decks"] => ResourceRoute::Decks,
            ["decks", deck, "config"] if !deck.is_empty() => {
                ResourceRoute::DeckConfig(deck.to_string())
            }
            ["decks", deck, "stats"] if !deck.is_empty() => {
                ResourceRoute::DeckStats(deck.to_string())
            }
            ["models"] => ResourceRoute::Models,
            ["models", name] if !name.is_empty() => ResourceRoute::Model(name.to_string()),
            ["cards", ids, "info"] => ResourceRoute::CardsInfo(ids.to_string()),
            ["cards", ids, "reviews"] => ResourceRoute::CardReviews(ids.to_string()),
            ["notes", ids, "info"] => ResourceRoute::NotesInfo(ids.to_string()),
            ["tags"] => ResourceRoute::Tags,
            ["session", "current"] => ResourceRoute::CurrentSession,
            ["collection", "stats"] => ResourceRoute::CollectionStats,
            ["stats", "daily"] => ResourceRoute::DailyStats,
            _ => return None,
        };
        Some(route)
    }
}

struct Descriptor {
    uri: &'static str,
    name: &'static str,
    description: &'static str,
}

const STATIC_RESOURCES: [Descriptor; 6] = [
    Descriptor {
        uri: "collection://decks",
        name: "decks",
        description: "All decks as [{name, id}], sorted by name",
    },
    Descriptor {
        uri: "collection://models",
        name: "models",
        description: "Full definitions of every note type",
    },
    Descriptor {
        uri: "collection://tags",
        name: "tags",
        description: "Every tag in the collection",
    },
    Descriptor {
        uri: "collection://session/current",
        name: "current-session",
        description: "The card under review, or null outside a review",
    },
    Descriptor {
        uri: "collection://collection/stats",
        name: "collection-stats",
        description: "The collection statistics report as HTML",
    },
    Descriptor {
        uri: "collection://stats/daily",
        name: "daily-stats",
        description: "Number of cards reviewed today",
    },
];

const RESOURCE_TEMPLATES: [Descriptor; 6] = [
    Descriptor {
        uri: "collection://decks/{id}/config",
        name: "deck-config",
        description: "Options group of a deck, addressed by ID or name",
    },
    Descriptor {
        uri: "collection://decks/{id}/stats",
        name: "deck-stats",
        description: "Statistics for a deck",
    },
    Descriptor {
        uri: "collection://models/{name}",
        name: "model",
        description: "Fields used on each card template of a note type",
    },
    Descriptor {
        uri: "collection://cards/{ids}/info",
        name: "cards-info",
        description: "Card records for comma-separated card IDs; a single ID returns one record",
    },
    Descriptor {
        uri: "collection://notes/{ids}/info",
        name: "notes-info",
        description: "Note records for comma-separated note IDs; a single ID returns one record",
    },
    Descriptor {
        uri: "collection://cards/{ids}/reviews",
        name: "card-reviews",
        description: "Review history for comma-separated card IDs",
    },
];

/// Descriptors for the fixed-URI resources.
pub fn resources() -> Vec<Resource> {
    STATIC_RESOURCES
        .iter()
        .map(|d| {
            let mut resource = RawResource::new(d.uri, d.name);
            resource.description = Some(d.description.to_string());
            resource.mime_type = Some(JSON_MIME.to_string());
            resource.no_annotation()
        })
        .collect()
}

/// Descriptors for the templated resources.
pub fn resource_templates() -> Result<Vec<ResourceTemplate>, serde_json::Error> {
    RESOURCE_TEMPLATES
        .iter()
        .map(|d| {
            let template: RawResourceTemplate = serde_json::from_value(json!({
                "uriTemplate": d.uri,
                "name": d.name,
                "description": d.description,
                "mimeType": JSON_MIME,
            }))?;
            Ok(template.no_annotation())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_routes() {
        assert_eq!(ResourceRoute::parse("collection://decks"), Some(ResourceRoute::Decks));
        assert_eq!(ResourceRoute::parse("collection://tags"), Some(ResourceRoute::Tags));
        assert_eq!(
            ResourceRoute::parse("collection://session/current"),
            Some(ResourceRoute::CurrentSession)
        );
        assert_eq!(
            ResourceRoute::parse("collection://stats/daily"),
            Some(ResourceRoute::DailyStats)
        );
    }

    #[test]
    fn test_parse_templated_routes() {
        assert_eq!(
            ResourceRoute::parse("collection://decks/1651445861967/config"),
            Some(ResourceRoute::DeckConfig("1651445861967".into()))
        );
        assert_eq!(
            ResourceRoute::parse("collection://models/Basic"),
            Some(ResourceRoute::Model("Basic".into()))
        );
        assert_eq!(
            ResourceRoute::parse("collection://cards/1, 2,3/info"),
            Some(ResourceRoute::CardsInfo("1, 2,3".into()))
        );
        assert_eq!(
            ResourceRoute::parse("collection://cards/7/reviews"),
            Some(ResourceRoute::CardReviews("7".into()))
        );
    }

    #[test]
    fn test_empty_id_list_still_routes() {
        assert_eq!(
            ResourceRoute::parse("collection://notes//info"),
            Some(ResourceRoute::NotesInfo(String::new()))
        );
    }

    #[test]
    fn test_unknown_uris() {
        assert_eq!(ResourceRoute::parse("anki://decks"), None);
        assert_eq!(ResourceRoute::parse("collection://decks/1"), None);
        assert_eq!(ResourceRoute::parse("collection://decks//config"), None);
        assert_eq!(ResourceRoute::parse("collection://cards/1/info/extra"), None);
    }

    #[test]
    fn test_descriptors_cover_every_route() {
        for d in &STATIC_RESOURCES {
            assert!(ResourceRoute::parse(d.uri).is_some(), "{}", d.uri);
        }
        assert_eq!(resources().len(), 6);
        assert_eq!(resource_templates().unwrap().len(), 6);
    }
}
