//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()` and `resource_uris()`

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{LogsResource, ResourceDefinition, SettingsResource};
use super::service::ResourceEntry;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        render: R::render,
    }
}

/// Get all registered resources, in enumeration order.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<SettingsResource>(),
        build_resource::<LogsResource>(),
    ]
}

/// Get the list of all resource URIs, in enumeration order.
pub fn resource_uris() -> Vec<&'static str> {
    vec![SettingsResource::URI, LogsResource::URI]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["config://settings", "debug://logs"]);
    }

    #[test]
    fn test_resource_uris_match_entries() {
        let from_entries: Vec<_> = get_all_resources()
            .into_iter()
            .map(|r| r.resource.raw.uri.clone())
            .collect();
        assert_eq!(from_entries, resource_uris());
    }

    #[test]
    fn test_resource_metadata() {
        let resources = get_all_resources();
        let settings = &resources[0].resource.raw;
        assert_eq!(settings.name, "Application Settings");
        assert_eq!(settings.mime_type.as_deref(), Some("application/json"));

        let logs = &resources[1].resource.raw;
        assert_eq!(logs.mime_type.as_deref(), Some("text/plain"));
    }
}
