use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use prospector_core::api::{DatePreset, ExportFormat, Sentiment, SortKey, Stage, WorkflowVariant};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "prospector", version, about = "Review and enrich news-derived business leads")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Working set file. Defaults to `<data.directory>/<data.working_set>` from config.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Stage chain to use: three (prospecting..collecting) or four (surveying..collecting).
    #[arg(long, global = true)]
    pub variant: Option<WorkflowVariant>,
}

/// Filter and sort flags shared by `list`, `export` and `stats`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Exact company name (case-sensitive).
    #[arg(long, conflicts_with = "company_contains")]
    pub company: Option<String>,

    /// Case-insensitive substring of the company name.
    #[arg(long)]
    pub company_contains: Option<String>,

    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// today, yesterday or last-7-days.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<DatePreset>,

    #[arg(long)]
    pub stage: Option<Stage>,

    #[arg(long, conflicts_with = "not_analyzed")]
    pub analyzed: bool,

    #[arg(long)]
    pub not_analyzed: bool,

    /// date or confidence.
    #[arg(long)]
    pub sort: Option<SortKey>,

    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    #[arg(long)]
    pub asc: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SurveyArgs {
    /// JSON array of surveyed leads to merge into the working set.
    #[arg(long)]
    pub from: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ShowArgs {
    pub id: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AdvanceArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SetStageArgs {
    pub id: String,
    pub stage: Stage,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AnnotateArgs {
    pub id: String,

    #[arg(long)]
    pub confidence: Option<f64>,

    /// Extracted field (KEY=VALUE, VALUE read as JSON when it parses).
    /// Can be specified multiple times.
    #[arg(long = "set", action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    #[arg(long = "unset", action = clap::ArgAction::Append)]
    pub unset: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AnalyzeArgs {
    pub id: String,

    /// Reviewer confidence, 0-100.
    #[arg(long)]
    pub confidence: f64,

    #[arg(long)]
    pub explanation: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MineArgs {
    pub id: String,

    #[arg(long = "entity", action = clap::ArgAction::Append)]
    pub entities: Vec<String>,

    #[arg(long = "topic", action = clap::ArgAction::Append)]
    pub topics: Vec<String>,

    #[arg(long, default_value_t = Sentiment::Neutral)]
    pub sentiment: Sentiment,

    /// 0-10
    #[arg(long, default_value_t = 5)]
    pub relevance: u8,

    /// 0-10
    #[arg(long, default_value_t = 5)]
    pub potential_value: u8,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExportArgs {
    /// json, csv or xlsx. Defaults to `export.default_format`.
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Output file. Defaults to `<export.directory>/<export.basename>.<ext>`.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the stages of the active workflow.
    Stages,
    /// Merge newly surveyed leads into the working set.
    Survey(SurveyArgs),
    List(ListArgs),
    Show(ShowArgs),
    /// Move records one stage forward.
    Advance(AdvanceArgs),
    /// Put a record at any stage of the workflow (corrections).
    SetStage(SetStageArgs),
    Annotate(AnnotateArgs),
    Analyze(AnalyzeArgs),
    Mine(MineArgs),
    /// Write the visible records as json, csv or xlsx.
    Export(ExportArgs),
    Stats(StatsArgs),
}
