//! Pieces shared by every crate in the workspace: log initialisation and
//! the small wire types that do not belong to a single resource.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn log_format_parses_known_names() {
        use utils::logging::LogFormat;
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn unknown_log_format_names_the_choices() {
        use utils::logging::LogFormat;
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown log format 'xml', expected 'compact' or 'json'");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn named_init_falls_back_to_compact() {
        use utils::logging::{init_logging_named, LogFormat};
        assert_eq!(init_logging_named("xml"), LogFormat::Compact);
        // the subscriber is already installed; the parsed format is still reported
        assert_eq!(init_logging_named("json"), LogFormat::Json);
    }
}
