use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Level;
use whinstone_core::{
    BlockProgram, LayoutNode, MetadataRecord, ProjectFile, RawProject, decode_code, decode_layout,
    decode_metadata, encode_code, encode_layout, encode_metadata, generate_free_id, load_project,
    save_project,
};

#[derive(Parser, Debug)]
#[command(name = "whinstone")]
#[command(version)]
#[command(
    about = "Encode and decode block-editor project blobs (layout, code, metadata).",
    long_about = None,
    after_help = "Examples:\n  whinstone encode layout layout.json -o layout\n  whinstone decode code code --stdout --pretty\n  whinstone project save --metadata m.json --code c.json --layout l.json --root projects"
)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON artifact into its binary blob.
    Encode {
        /// Artifact kind
        kind: Artifact,

        /// Path to the JSON input (a glob matching one file is accepted)
        input: PathBuf,

        /// Output blob path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the blob to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Decode a binary blob into JSON.
    Decode {
        /// Artifact kind
        kind: Artifact,

        /// Path to the blob (a glob matching one file is accepted)
        input: PathBuf,

        /// Output JSON path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Operations on project directories (one file per blob).
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// Encode all artifacts into a new project directory under ROOT.
    Save {
        /// Metadata JSON
        #[arg(long)]
        metadata: PathBuf,

        /// Block program JSON
        #[arg(long)]
        code: PathBuf,

        /// Layout tree JSON
        #[arg(long)]
        layout: PathBuf,

        /// Directory holding one sub-directory per project
        #[arg(long)]
        root: PathBuf,
    },
    /// Decode a project directory and print it as JSON.
    Load {
        /// Project directory
        dir: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Artifact {
    Layout,
    Code,
    Metadata,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Encode {
            kind,
            input,
            output,
            stdout,
        } => cmd_encode(kind, &input, output, stdout, cli.quiet),
        Commands::Decode {
            kind,
            input,
            output,
            stdout,
            pretty,
        } => cmd_decode(kind, &input, output, stdout, pretty, cli.quiet),
        Commands::Project { command } => match command {
            ProjectCommands::Save {
                metadata,
                code,
                layout,
                root,
            } => cmd_project_save(&metadata, &code, &layout, &root, cli.quiet),
            ProjectCommands::Load { dir, pretty } => cmd_project_load(&dir, pretty),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_encode(
    kind: Artifact,
    input: &Path,
    output: Option<PathBuf>,
    stdout: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let bytes = match kind {
        Artifact::Layout => encode_layout(&parse_json::<LayoutNode>(&json, &input)?)
            .map_err(|err| encode_error(kind, err))?,
        Artifact::Code => encode_code(&parse_json::<BlockProgram>(&json, &input)?)
            .map_err(|err| encode_error(kind, err))?,
        Artifact::Metadata => encode_metadata(&parse_json::<MetadataRecord>(&json, &input)?)
            .map_err(|err| encode_error(kind, err))?,
    };

    if stdout {
        std::io::stdout()
            .write_all(&bytes)
            .context("Failed to write blob to stdout")?;
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    write_output(&output, &bytes)?;
    if !quiet {
        eprintln!("OK: {} bytes written -> {}", bytes.len(), output.display());
    }
    Ok(())
}

fn cmd_decode(
    kind: Artifact,
    input: &Path,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(input)?;
    let bytes =
        fs::read(&input).with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let json = match kind {
        Artifact::Layout => to_json(
            &decode_layout(&bytes).map_err(|err| decode_error(kind, err))?,
            pretty,
        )?,
        Artifact::Code => to_json(
            &decode_code(&bytes).map_err(|err| decode_error(kind, err))?,
            pretty,
        )?,
        Artifact::Metadata => to_json(
            &decode_metadata(&bytes).map_err(|err| decode_error(kind, err))?,
            pretty,
        )?,
    };

    if stdout {
        println!("{}", json);
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    write_output(&output, json.as_bytes())?;
    if !quiet {
        eprintln!("OK: decoded {} -> {}", kind_name(kind), output.display());
    }
    Ok(())
}

fn cmd_project_save(
    metadata: &Path,
    code: &Path,
    layout: &Path,
    root: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let metadata: MetadataRecord = read_json(metadata)?;
    let code: BlockProgram = read_json(code)?;
    let layout: LayoutNode = read_json(layout)?;

    let raw = save_project(&metadata, &code, &layout).map_err(|err| {
        CliError::new(
            format!("project encoding failed: {}", err),
            Some("a text field contains a byte the format uses as a marker".to_string()),
        )
    })?;

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create project root: {}", root.display()))?;
    let existing = existing_project_ids(root)?;
    let id = generate_free_id(&existing).context("Failed to generate project id")?;
    let dir = root.join(&id);
    fs::create_dir(&dir)
        .with_context(|| format!("Failed to create project directory: {}", dir.display()))?;

    for file in &raw.files {
        let path = dir.join(&file.name);
        fs::write(&path, &file.data)
            .with_context(|| format!("Failed to write blob: {}", path.display()))?;
    }
    tracing::debug!(%id, blobs = raw.files.len(), "project saved");

    println!("{}", id);
    if !quiet {
        eprintln!("OK: project written -> {}", dir.display());
    }
    Ok(())
}

fn cmd_project_load(dir: &Path, pretty: bool) -> Result<(), CliError> {
    if !dir.is_dir() {
        return Err(CliError::new(
            format!("project directory not found: {}", dir.display()),
            Some("pass the directory printed by `whinstone project save`".to_string()),
        ));
    }
    let raw = read_project_dir(dir)?;
    let project = load_project(&raw).map_err(|err| {
        CliError::new(
            format!("project decoding failed: {}", err),
            Some(format!("check the blobs in {}", dir.display())),
        )
    })?;
    println!("{}", to_json(&project, pretty)?);
    Ok(())
}

fn read_project_dir(dir: &Path) -> Result<RawProject, CliError> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read project directory: {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read project entry")?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let data = fs::read(&path)
            .with_context(|| format!("Failed to read blob: {}", path.display()))?;
        files.push(ProjectFile::new(name, data));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(RawProject { files })
}

fn existing_project_ids(root: &Path) -> Result<HashSet<String>, CliError> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read project root: {}", root.display()))?;
    let mut ids = HashSet::new();
    for entry in entries {
        let entry = entry.context("Failed to read project root entry")?;
        if entry.path().is_dir() {
            ids.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(ids)
}

fn read_json<T: DeserializeOwned>(input: &Path) -> Result<T, CliError> {
    let input = resolve_input_path(input)?;
    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    parse_json(&json, &input)
}

fn parse_json<T: DeserializeOwned>(json: &str, input: &Path) -> Result<T, CliError> {
    serde_json::from_str(json).map_err(|err| {
        CliError::new(
            format!("invalid JSON in {}: {}", input.display(), err),
            Some("see `whinstone decode --help` for the expected shape".to_string()),
        )
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

fn kind_name(kind: Artifact) -> &'static str {
    match kind {
        Artifact::Layout => "layout",
        Artifact::Code => "code",
        Artifact::Metadata => "metadata",
    }
}

fn encode_error(kind: Artifact, err: impl std::fmt::Display) -> CliError {
    CliError::new(
        format!("{} encoding failed: {}", kind_name(kind), err),
        Some("the format has no escaping; remove reserved bytes from text fields".to_string()),
    )
}

fn decode_error(kind: Artifact, err: impl std::fmt::Display) -> CliError {
    CliError::new(
        format!("{} decoding failed: {}", kind_name(kind), err),
        Some(format!("is this really a {} blob?", kind_name(kind))),
    )
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        if !input.exists() {
            return Err(CliError::new(
                format!("input file not found: {}", input.display()),
                Some("check the path".to_string()),
            ));
        }
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{Artifact, is_glob_pattern, kind_name};

    #[test]
    fn detects_glob_patterns() {
        assert!(is_glob_pattern("blobs/*.bin"));
        assert!(is_glob_pattern("layout?.json"));
        assert!(!is_glob_pattern("layout.json"));
    }

    #[test]
    fn kind_names_match_blob_names() {
        assert_eq!(kind_name(Artifact::Layout), whinstone_core::LAYOUT_BLOB);
        assert_eq!(kind_name(Artifact::Code), whinstone_core::CODE_BLOB);
        assert_eq!(kind_name(Artifact::Metadata), whinstone_core::METADATA_BLOB);
    }
}
