//! Command-line interface for applying selection commands to files
//!
//! Supports:
//! - Indenting/outdenting the lines of a range
//! - Moving or expanding a selection and printing the result
//! - Listing line spans
//!
//! Ranges are given as `LOCATION:LENGTH` in chars.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::editable::{Destination, Direction, LineIndex, LineSpan, TextBuffer, TextRange, TextSelection};
use crate::messages::Msg;
use crate::model::EditorModel;
use crate::update::update;

/// Selection and line indentation for text files
#[derive(Parser, Debug)]
#[command(name = "token-select", version, about = "Selection and line indentation for text files")]
pub struct CliArgs {
    /// YAML config file (indent unit, tab width)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Indent unit, overriding the config (e.g. "\t" or "    ")
    #[arg(long, global = true, value_name = "TEXT")]
    pub unit: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write debug logs to this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Insert one indent unit at the start of every line in the range
    Indent(EditArgs),
    /// Remove one level of indentation from every line in the range
    Outdent(EditArgs),
    /// Apply a movement or selection command and print the new selection
    Select(SelectArgs),
    /// Print the start, content end and end offset of every line
    Lines {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct EditArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Selected range as LOCATION:LENGTH
    #[arg(long, value_name = "LOC:LEN", value_parser = parse_range, default_value = "0:0")]
    pub range: RawRange,

    /// Rewrite the file instead of printing the result
    #[arg(long)]
    pub in_place: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SelectArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Starting selection as LOCATION:LENGTH
    #[arg(long, value_name = "LOC:LEN", value_parser = parse_range, default_value = "0:0")]
    pub range: RawRange,

    #[arg(long, value_enum)]
    pub motion: Motion,

    /// Extend the selection instead of moving the caret
    #[arg(long)]
    pub extend: bool,

    /// Stop at the current line or paragraph boundary
    #[arg(long)]
    pub confined: bool,
}

/// A `LOCATION:LENGTH` pair as typed, possibly negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRange {
    pub location: i64,
    pub length: i64,
}

/// Parse `LOCATION:LENGTH`
pub fn parse_range(s: &str) -> Result<RawRange, String> {
    let (location, length) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LOCATION:LENGTH, got {:?}", s))?;
    let location = location
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid location {:?}: {}", location, e))?;
    let length = length
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid length {:?}: {}", length, e))?;
    Ok(RawRange { location, length })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Backward,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
    ParagraphStart,
    ParagraphEnd,
    DocumentStart,
    DocumentEnd,
    SelectAll,
    SelectWord,
    SelectLine,
    SelectParagraph,
}

impl Motion {
    pub fn to_msg(self, extend: bool, confined: bool) -> Msg {
        let (direction, destination) = match self {
            Motion::Left => (Direction::Left, Destination::Character),
            Motion::Right => (Direction::Right, Destination::Character),
            Motion::Up => (Direction::Up, Destination::Character),
            Motion::Down => (Direction::Down, Destination::Character),
            Motion::Forward => (Direction::Forward, Destination::Character),
            Motion::Backward => (Direction::Backward, Destination::Character),
            Motion::WordForward => (Direction::Forward, Destination::Word),
            Motion::WordBackward => (Direction::Backward, Destination::Word),
            Motion::LineStart => (Direction::Backward, Destination::Line),
            Motion::LineEnd => (Direction::Forward, Destination::Line),
            Motion::ParagraphStart => (Direction::Backward, Destination::Paragraph),
            Motion::ParagraphEnd => (Direction::Forward, Destination::Paragraph),
            Motion::DocumentStart => (Direction::Backward, Destination::Document),
            Motion::DocumentEnd => (Direction::Forward, Destination::Document),
            Motion::SelectAll => return Msg::SelectAll,
            Motion::SelectWord => return Msg::SelectWord,
            Motion::SelectLine => return Msg::SelectLine,
            Motion::SelectParagraph => return Msg::SelectParagraph,
        };
        if confined {
            Msg::move_within(direction, destination, extend)
        } else if extend {
            Msg::extend_by(direction, destination)
        } else {
            Msg::move_by(direction, destination)
        }
    }
}

impl CliArgs {
    /// Config from `--config` (or defaults) with `--unit` applied
    pub fn editor_config(&self) -> anyhow::Result<EditorConfig> {
        let mut config = match &self.config {
            Some(path) => EditorConfig::from_path(path)?,
            None => EditorConfig::default(),
        };
        if let Some(unit) = &self.unit {
            config.indent_unit = unit.replace("\\t", "\t");
        }
        config.validate().context("Invalid --unit")?;
        Ok(config)
    }
}

/// Result of an edit or selection command
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub text: String,
    pub selection: TextSelection,
    pub changed: bool,
    pub commands: Vec<Cmd>,
}

/// Run a parsed command and return what should be printed
pub fn run(args: &CliArgs) -> anyhow::Result<String> {
    let config = args.editor_config()?;

    match &args.command {
        CliCommand::Indent(edit) => run_edit(args, config, edit, Msg::Indent),
        CliCommand::Outdent(edit) => run_edit(args, config, edit, Msg::Outdent),
        CliCommand::Select(select) => {
            let text = read_file(&select.file)?;
            let mut model = model_with_range(&text, config, select.range)?;
            let cmd = update(&mut model, select.motion.to_msg(select.extend, select.confined));
            let report = Report {
                changed: cmd.is_some(),
                text,
                selection: model.last_selection(),
                commands: cmd.map(Cmd::flatten).unwrap_or_default(),
            };
            if args.json {
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            Ok(describe_selection(&report.selection))
        }
        CliCommand::Lines { file } => {
            let text = read_file(file)?;
            let model = EditorModel::new(&text, config);
            let spans: Vec<LineSpan> = LineIndex::new(&model.buffer).spans().collect();
            if args.json {
                return Ok(serde_json::to_string_pretty(&spans)?);
            }
            Ok(spans
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}\t{}\t{}\t{}", i, s.start, s.content_end, s.end))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn run_edit(args: &CliArgs, config: EditorConfig, edit: &EditArgs, msg: Msg) -> anyhow::Result<String> {
    let text = read_file(&edit.file)?;
    let mut model = model_with_range(&text, config, edit.range)?;
    let cmd = update(&mut model, msg);
    let output = model.text();

    if edit.in_place && cmd.is_some() {
        std::fs::write(&edit.file, &output)
            .with_context(|| format!("Failed to write {}", edit.file.display()))?;
        tracing::info!("Rewrote {}", edit.file.display());
    }

    let report = Report {
        changed: cmd.is_some(),
        text: output,
        selection: model.primary_selection(),
        commands: cmd.map(Cmd::flatten).unwrap_or_default(),
    };
    if args.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    if edit.in_place {
        return Ok(describe_selection(&report.selection));
    }
    Ok(report.text)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn model_with_range(text: &str, config: EditorConfig, range: RawRange) -> anyhow::Result<EditorModel> {
    let model = EditorModel::new(text, config);
    let len = model.buffer.len_chars();
    let range = TextRange::from_raw(range.location, range.length, len).context("Invalid --range")?;
    Ok(model.with_selection(TextSelection::new(range)))
}

fn describe_selection(selection: &TextSelection) -> String {
    selection
        .ranges
        .iter()
        .map(|r| format!("{}:{}", r.location, r.length))
        .collect::<Vec<_>>()
        .join(" ")
}
