//! Artifact files written by `dynasync synth`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dynasync_core::provision::{ApiDescriptor, DataSourceDescriptor};
use dynasync_core::SynthesisOutput;
use serde::Serialize;

pub const SCHEMA_FILE: &str = "schema.graphql";
pub const RESOLVERS_FILE: &str = "resolvers.json";
pub const TABLES_FILE: &str = "tables.json";
pub const API_FILE: &str = "api.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiArtifact<'a> {
    api: &'a ApiDescriptor,
    data_sources: &'a [DataSourceDescriptor],
}

/// Writes every artifact into `dir`, creating it if needed. Returns the
/// written paths.
pub fn write_artifacts(output: &SynthesisOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let api = ApiArtifact {
        api: &output.api,
        data_sources: &output.data_sources,
    };
    let files = [
        (SCHEMA_FILE, output.schema.clone()),
        (RESOLVERS_FILE, to_json(&output.bindings)?),
        (TABLES_FILE, to_json(&output.tables)?),
        (API_FILE, to_json(&api)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "artifact written");
        written.push(path);
    }
    Ok(written)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynasync_core::{synthesize, DynasyncConfig, TableDeclaration};

    fn output() -> SynthesisOutput {
        let config = DynasyncConfig::default().with_table(
            TableDeclaration::new("Dog", "dogId")
                .with_attributes([("dogId", "ID!"), ("name", "String")]),
        );
        synthesize("Pets", config, None).unwrap()
    }

    #[test]
    fn test_write_artifacts() {
        let dir = std::env::temp_dir().join(format!("dynasync-out-{}", uuid::Uuid::new_v4()));
        let output = output();

        let written = write_artifacts(&output, &dir).unwrap();
        assert_eq!(written.len(), 4);

        let schema = std::fs::read_to_string(dir.join(SCHEMA_FILE)).unwrap();
        assert_eq!(schema, output.schema);

        let resolvers: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(RESOLVERS_FILE)).unwrap())
                .unwrap();
        assert_eq!(resolvers[0]["operationName"], "getDogByDogId");
        assert_eq!(resolvers[0]["dataSource"], "DogDataSource");

        let api: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(API_FILE)).unwrap()).unwrap();
        assert_eq!(api["api"]["name"], "Pets-GraphQlApi");
        assert_eq!(api["dataSources"][0]["tableName"], "Dog");

        std::fs::remove_dir_all(dir).unwrap();
    }
}
