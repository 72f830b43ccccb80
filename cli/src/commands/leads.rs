//! Read-side commands: survey, list, show, export and stats.
use prospector_core::api::{format_stats, CliError, Session};
use prospector_plugins::factory;

use crate::app::{self, AppContext};
use crate::commands::cli::{ExportArgs, ListArgs, OutputFormat, ShowArgs, StatsArgs, SurveyArgs, ViewArgs};
use crate::commands::to_json;
use crate::render;

fn open_view(ctx: &AppContext, view: &ViewArgs) -> Result<Session, CliError> {
    let mut session = ctx.open_session()?;
    app::apply_view_args(session.view_mut(), view, app::now());
    Ok(session)
}

pub fn handle_survey(args: SurveyArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let mut session = ctx.open_session()?;
    let report = session.survey(factory::build_source(&args.from).as_ref())?;
    ctx.save_session(&session)?;
    println!(
        "surveyed {}: {} added, {} updated, {} total in {}",
        args.from.display(),
        report.added,
        report.updated,
        session.store().len(),
        ctx.working_set().display()
    );
    Ok(0)
}

pub fn handle_list(args: ListArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let session = open_view(ctx, &args.view)?;
    let visible = session.visible_records();
    match args.format {
        OutputFormat::Text => print!("{}", render::records_table(&visible)),
        OutputFormat::Json => println!("{}", to_json(&visible)?),
    }
    Ok(0)
}

pub fn handle_show(args: ShowArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let session = ctx.open_session()?;
    let record = session.get(&args.id)?;
    match args.format {
        OutputFormat::Text => print!("{}", render::record_detail(record)),
        OutputFormat::Json => println!("{}", to_json(record)?),
    }
    Ok(0)
}

pub fn handle_export(args: ExportArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let session = open_view(ctx, &args.view)?;
    let format = args.format.unwrap_or(ctx.cfg().export.default_format);

    let bytes = session.export_visible(format)?;
    let path = ctx
        .export_writer()
        .write(format, &bytes, args.out.as_deref())?;

    println!(
        "exported {} record(s) to {}",
        session.visible_records().len(),
        path.display()
    );
    Ok(0)
}

pub fn handle_stats(args: StatsArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let session = open_view(ctx, &args.view)?;
    let stats = session.stats();
    match args.format {
        OutputFormat::Text => print!("{}", format_stats(&stats)),
        OutputFormat::Json => println!("{}", to_json(&stats)?),
    }
    Ok(0)
}
