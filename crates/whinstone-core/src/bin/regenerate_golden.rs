use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use whinstone_core::{
    BlockProgram, LayoutNode, MetadataRecord, encode_code, encode_layout, encode_metadata,
};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    for kind in ["layout", "code", "metadata"] {
        let kind_dir = root.join(kind);
        let entries = fs::read_dir(&kind_dir)
            .map_err(|err| format!("failed to read {}: {}", kind_dir.display(), err))?;

        for entry in entries {
            let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let input = path.join("input.json");
            if !input.exists() {
                continue;
            }
            regenerate_one(kind, &input, &path.join("expected.bin"))?;
        }
    }
    Ok(())
}

fn regenerate_one(kind: &str, input: &Path, output: &Path) -> Result<(), String> {
    let json = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let bytes = match kind {
        "layout" => encode_layout(&parse_json::<LayoutNode>(&json, input)?)
            .map_err(|err| format!("layout encoding failed for {}: {}", input.display(), err))?,
        "code" => encode_code(&parse_json::<BlockProgram>(&json, input)?)
            .map_err(|err| format!("code encoding failed for {}: {}", input.display(), err))?,
        _ => encode_metadata(&parse_json::<MetadataRecord>(&json, input)?).map_err(|err| {
            format!("metadata encoding failed for {}: {}", input.display(), err)
        })?,
    };
    fs::write(output, bytes)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, input: &Path) -> Result<T, String> {
    serde_json::from_str(json)
        .map_err(|err| format!("JSON parsing failed for {}: {}", input.display(), err))
}
