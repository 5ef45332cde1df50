use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use outline::fold::FoldState;
use outline::hierarchy::{OutlineTree, tag_statistics};
use outline::storage::{DocumentStore, JsonFileStore, OutlineParser};
use outline::{
    Document, EditorSession, Settings, TextOutlineParser, build_tree, compute_fold_states,
    format_document,
};
use tracing::{Level, debug};

#[derive(Debug, Parser)]
#[command(
    name = "outline",
    about = "Inspect and rearrange outline documents",
    version
)]
struct Cli {
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    /// JSON settings file (history limit, indent width, schema version).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every line with its fold state.
    Folds(FoldsArgs),

    /// Print the derived tree with inherited tags.
    Tree(ViewArgs),

    /// Aggregate per-tag statistics.
    Tags(ViewArgs),

    /// Drag lines to a new position, carrying folded subtrees along.
    Move(MoveArgs),

    /// Convert indented plain text into a JSON document.
    Import(ImportArgs),

    /// Write a JSON document as indented plain text.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct FoldsArgs {
    /// JSON document to read.
    document: PathBuf,
    /// Skip lines hidden inside folds.
    #[arg(long)]
    visible_only: bool,
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// JSON document to read.
    document: PathBuf,
    /// Emit JSON instead of a human-readable listing.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct MoveArgs {
    /// JSON document to edit.
    document: PathBuf,
    /// Zero-based indices of the lines to drag (comma separated).
    #[arg(long, value_delimiter = ',', required = true)]
    lines: Vec<usize>,
    /// Index of the line the selection is dropped in front of; past the end appends.
    #[arg(long)]
    before: usize,
    /// Overwrite the document instead of printing the result.
    #[arg(long)]
    in_place: bool,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Indented text file.
    input: PathBuf,
    /// Write the JSON document here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// JSON document to read.
    document: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    match cli.command {
        Commands::Folds(args) => handle_folds(args),
        Commands::Tree(args) => handle_tree(args),
        Commands::Tags(args) => handle_tags(args),
        Commands::Move(args) => handle_move(args, &settings),
        Commands::Import(args) => handle_import(args, &settings),
        Commands::Export(args) => handle_export(args, &settings),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(path: &Path) -> Result<Document> {
    debug!(?path, "loading document");
    JsonFileStore.load(path)
}

fn handle_folds(args: FoldsArgs) -> Result<()> {
    let FoldsArgs {
        document,
        visible_only,
    } = args;
    let doc = load(&document)?;
    let states = compute_fold_states(&doc.children);
    for (index, (line, state)) in doc.children.iter().zip(&states).enumerate() {
        if visible_only && state.is_hidden() {
            continue;
        }
        let marker = match state {
            FoldState::Uncollapsed => ' ',
            FoldState::CollapseStart => '+',
            FoldState::Collapsed => '.',
        };
        println!(
            "{:>4} {} {}{}",
            index,
            marker,
            "  ".repeat(line.indent as usize),
            line.content
        );
    }
    Ok(())
}

fn handle_tree(args: ViewArgs) -> Result<()> {
    let ViewArgs { document, json } = args;
    let tree = build_tree(&load(&document)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}

fn render_tree(tree: &OutlineTree) -> String {
    let mut out = String::new();
    tree.walk(|node, depth| {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.line.content);
        if !node.tags.is_empty() {
            let tags: Vec<&str> = node.tags.iter().map(|t| t.0.as_str()).collect();
            out.push_str(&format!("  [{}]", tags.join(", ")));
        }
        out.push('\n');
    });
    out
}

fn handle_tags(args: ViewArgs) -> Result<()> {
    let ViewArgs { document, json } = args;
    let stats = tag_statistics(&build_tree(&load(&document)?));
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    if stats.is_empty() {
        eprintln!("No tags found in {:?}.", document);
        return Ok(());
    }
    for (tag, s) in &stats {
        println!(
            "{:<20} lines {:>4}  declared {:>4}  done {:>4}/{:<4} time {}s",
            tag.0,
            s.lines,
            s.declared,
            s.complete,
            s.complete + s.incomplete,
            s.elapsed_seconds
        );
    }
    Ok(())
}

fn handle_move(args: MoveArgs, settings: &Settings) -> Result<()> {
    let MoveArgs {
        document,
        lines,
        before,
        in_place,
    } = args;
    let doc = load(&document)?;
    let mut session = EditorSession::new(doc, settings);
    let changed = session
        .move_lines(&lines, before)
        .with_context(|| format!("moving lines {:?} before {}", lines, before))?;
    if !changed {
        eprintln!("Move leaves the document unchanged.");
    }

    if in_place {
        if changed {
            JsonFileStore.save(&document, session.document())?;
            println!("Updated {:?}", document);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(session.document())?);
    }
    Ok(())
}

fn handle_import(args: ImportArgs, settings: &Settings) -> Result<()> {
    let ImportArgs { input, output } = args;
    let parser = TextOutlineParser {
        indent_width: settings.indent_width,
    };
    let mut doc = parser.parse_file(&input)?;
    doc.schema_version = settings.schema_version;
    debug!(lines = doc.line_count(), ?input, "imported outline");

    match output {
        Some(path) => {
            JsonFileStore.save(&path, &doc)?;
            println!("Wrote {} lines to {:?}", doc.line_count(), path);
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

fn handle_export(args: ExportArgs, settings: &Settings) -> Result<()> {
    let doc = load(&args.document)?;
    print!("{}", format_document(&doc, settings.indent_width));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn import_fixture(dir: &Path, text: &str) -> PathBuf {
        let input = dir.join("notes.txt");
        let output = dir.join("notes.json");
        fs::write(&input, text).expect("write notes");
        handle_import(
            ImportArgs {
                input,
                output: Some(output.clone()),
            },
            &Settings::default(),
        )
        .expect("import");
        output
    }

    #[test]
    fn import_stamps_configured_schema_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let input = tmp.path().join("notes.txt");
        let output = tmp.path().join("notes.json");
        fs::write(&input, "a\n").expect("write notes");
        let settings = Settings::from_json_str(r#"{"schemaVersion": 7}"#).expect("settings");
        handle_import(
            ImportArgs {
                input,
                output: Some(output.clone()),
            },
            &settings,
        )
        .expect("import");
        assert_eq!(JsonFileStore.load(&output).expect("reload").schema_version, 7);
    }

    #[test]
    fn import_then_move_in_place() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = import_fixture(tmp.path(), "a\nb\n  b1\nc\n");

        handle_move(
            MoveArgs {
                document: path.clone(),
                lines: vec![0],
                before: 4,
                in_place: true,
            },
            &Settings::default(),
        )
        .expect("move");

        let doc = JsonFileStore.load(&path).expect("reload");
        let names: Vec<_> = doc.children.iter().map(|l| l.content.as_str()).collect();
        assert_eq!(names, vec!["b", "b1", "c", "a"]);
    }

    #[test]
    fn rejected_move_reports_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = import_fixture(tmp.path(), "a\nb\n");
        let err = handle_move(
            MoveArgs {
                document: path,
                lines: vec![7],
                before: 0,
                in_place: true,
            },
            &Settings::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[test]
    fn tree_rendering_shows_inherited_tags() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = import_fixture(tmp.path(), "p #a\n  c\n    g #b\n");
        let tree = build_tree(&JsonFileStore.load(&path).expect("load"));
        assert_eq!(
            render_tree(&tree),
            "p #a  [#a]\n  c  [#a]\n    g #b  [#b, #a]\n"
        );
    }

    #[test]
    fn cli_parses_comma_separated_lines() {
        let cli = Cli::try_parse_from([
            "outline", "--verbose", "move", "doc.json", "--lines", "1,3", "--before", "0",
        ])
        .expect("parse args");
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.lines, vec![1, 3]);
                assert_eq!(args.before, 0);
                assert!(!args.in_place);
            }
            other => panic!("expected move, got {:?}", other),
        }
        assert!(cli.verbose);
    }
}
