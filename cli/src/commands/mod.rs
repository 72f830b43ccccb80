pub mod annotate;
pub mod cli;
pub mod leads;
pub mod workflow;

use prospector_core::api::CliError;

use crate::app::AppContext;
use cli::Commands;

pub fn dispatch(cmd: Commands, ctx: &AppContext) -> Result<i32, CliError> {
    match cmd {
        Commands::Stages => workflow::handle_stages(ctx),
        Commands::Survey(args) => leads::handle_survey(args, ctx),
        Commands::List(args) => leads::handle_list(args, ctx),
        Commands::Show(args) => leads::handle_show(args, ctx),
        Commands::Advance(args) => workflow::handle_advance(args, ctx),
        Commands::SetStage(args) => workflow::handle_set_stage(args, ctx),
        Commands::Annotate(args) => annotate::handle_annotate(args, ctx),
        Commands::Analyze(args) => annotate::handle_analyze(args, ctx),
        Commands::Mine(args) => annotate::handle_mine(args, ctx),
        Commands::Export(args) => leads::handle_export(args, ctx),
        Commands::Stats(args) => leads::handle_stats(args, ctx),
    }
}

pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Command(format!("failed to render json: {e}")))
}
