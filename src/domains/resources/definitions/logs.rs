//! Debug logs resource definition.

use super::ResourceDefinition;
use crate::core::config::ResourcesConfig;
use crate::core::time::now_iso8601;
use crate::domains::resources::ResourceError;

/// Recent server logs (plain-text status line).
pub struct LogsResource;

impl ResourceDefinition for LogsResource {
    const URI: &'static str = "debug://logs";
    const NAME: &'static str = "Debug Logs";
    const DESCRIPTION: &'static str = "Recent server logs";
    const MIME_TYPE: &'static str = "text/plain";

    fn render(_config: &ResourcesConfig) -> Result<String, ResourceError> {
        Ok(format!(
            "Debug logs as of {}\nServer is running normally.",
            now_iso8601()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_content() {
        let text = LogsResource::render(&ResourcesConfig::default()).unwrap();
        let (first, second) = text.split_once('\n').unwrap();
        assert!(first.starts_with("Debug logs as of "));
        assert_eq!(second, "Server is running normally.");
    }
}
