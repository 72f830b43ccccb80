//! Edits to a single record: confidence, extracted fields, analysis, mining.
use prospector_core::api::{parse_field_assignment, validate_field_key, CliError, LeadError, MiningNotes};

use crate::app::{self, AppContext};
use crate::commands::cli::{AnalyzeArgs, AnnotateArgs, MineArgs};

pub fn handle_annotate(args: AnnotateArgs, ctx: &AppContext) -> Result<i32, CliError> {
    if args.confidence.is_none() && args.set.is_empty() && args.unset.is_empty() {
        return Err(CliError::Command(
            "nothing to annotate (use --confidence, --set or --unset)".to_string(),
        ));
    }

    // Parse everything before touching the session so a bad flag changes nothing.
    let assignments = args
        .set
        .iter()
        .map(|raw| parse_field_assignment(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(LeadError::Validation)?;
    for key in &args.unset {
        validate_field_key(key).map_err(LeadError::Validation)?;
    }

    let mut session = ctx.open_session()?;
    if let Some(value) = args.confidence {
        session.set_confidence(&args.id, value)?;
    }
    for (key, value) in assignments {
        session.set_field(&args.id, &key, value)?;
    }
    for key in &args.unset {
        if session.remove_field(&args.id, key)?.is_none() {
            eprintln!("{}: field '{}' was not set", args.id, key.trim());
        }
    }

    ctx.save_session(&session)?;
    println!("{} updated", args.id);
    Ok(0)
}

pub fn handle_analyze(args: AnalyzeArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let mut session = ctx.open_session()?;
    let analysis = session.analyze(&args.id, args.confidence, &args.explanation, app::now())?;
    ctx.save_session(&session)?;
    println!(
        "{} analyzed: confidence {} -> {}",
        args.id, analysis.original_confidence, analysis.analysis_confidence
    );
    Ok(0)
}

pub fn handle_mine(args: MineArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let notes = MiningNotes {
        key_entities: args.entities,
        topics: args.topics,
        sentiment: args.sentiment,
        relevance: args.relevance,
        potential_value: args.potential_value,
        notes: args.notes,
    };
    notes.validate().map_err(LeadError::Validation)?;

    let mut session = ctx.open_session()?;
    session.mine(&args.id, notes, app::now())?;
    ctx.save_session(&session)?;
    println!("{} mined", args.id);
    Ok(0)
}
