use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a financial payload file as a generic JSON value. The payload is
/// left untyped so the sanitiser can coerce loose numbers and key styles.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_text(path)?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read a UTF-8 file, returning the resolved path alongside its contents.
pub fn read_text(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.is_file() {
        let reason = if canonical.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{}: {}", reason, canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_json_value("definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = std::env::temp_dir();
        let err = read_text(dir.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }

    #[test]
    fn test_reads_payload() {
        let path = std::env::temp_dir().join("fhc_file_test_payload.json");
        fs::write(&path, r#"{"periods": [{"revenue": "10"}]}"#).unwrap();
        let value = read_json_value(path.to_str().unwrap()).unwrap();
        assert_eq!(value["periods"][0]["revenue"], "10");
        let _ = fs::remove_file(path);
    }
}
