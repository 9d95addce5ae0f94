use crate::conf::JobConfig;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Read and decode a config file. `.json` files are read as JSON, anything else as XML.
pub fn load_config(path: &str) -> anyhow::Result<JobConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;

    let is_json = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let cfg = if is_json {
        JobConfig::from_json_str(&text)
    } else {
        JobConfig::from_xml_str(&text)
    }
    .with_context(|| format!("decode config file {}", path))?;

    tracing::debug!(
        path,
        tables = cfg.tables.len(),
        jobs = cfg.jobs.len(),
        "loaded config"
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_tmp(name: &str, body: &str) -> String {
        let dir = std::env::temp_dir().join(format!("jobgraph-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn picks_decoder_from_extension() {
        let json = write_tmp("jobs.json", r#"{"tables": [{"name": "t"}]}"#);
        assert_eq!(load_config(&json).unwrap().tables[0].name, "t");

        let xml = write_tmp(
            "jobs.xml",
            r#"<config><modules><module><config><tables><table name="t"/></tables></config></module></modules></config>"#,
        );
        assert_eq!(load_config(&xml).unwrap().tables[0].name, "t");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config("/nonexistent/jobs.xml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/jobs.xml"));
    }

    #[test]
    fn decode_error_names_the_path() {
        let bad = write_tmp("bad.json", "{ not json");
        let err = load_config(&bad).unwrap_err();
        assert!(format!("{:#}", err).contains("decode config file"));
    }
}
