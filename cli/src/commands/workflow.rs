//! Stage listing and stage changes.
use prospector_core::api::{CliError, StageTransition};

use crate::app::{exit_code_for_lead, AppContext};
use crate::commands::cli::{AdvanceArgs, SetStageArgs};

pub fn handle_stages(ctx: &AppContext) -> Result<i32, CliError> {
    let variant = ctx.cfg().workflow.variant;
    println!("workflow: {variant}");
    for (pos, stage) in variant.stages().iter().enumerate() {
        println!(
            "  {}. {:<12} {}",
            pos + 1,
            stage.as_str(),
            StageTransition::stage_description(*stage)
        );
    }
    Ok(0)
}

/// Advances each id independently and saves whatever succeeded. The exit
/// code is the one of the first failure, if any.
pub fn handle_advance(args: AdvanceArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let mut session = ctx.open_session()?;
    let outcomes = session.advance_all(&args.ids);

    let mut exit = 0;
    let mut changed = false;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(stage) => {
                changed = true;
                println!("{} -> {}", outcome.id, stage);
            }
            Err(e) => {
                eprintln!("{e}");
                if exit == 0 {
                    exit = exit_code_for_lead(e);
                }
            }
        }
    }

    if changed {
        ctx.save_session(&session)?;
    }
    Ok(exit)
}

pub fn handle_set_stage(args: SetStageArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let mut session = ctx.open_session()?;
    let previous = session.set_stage(&args.id, args.stage)?;
    ctx.save_session(&session)?;
    println!("{}: {} -> {}", args.id, previous, args.stage);
    Ok(0)
}
