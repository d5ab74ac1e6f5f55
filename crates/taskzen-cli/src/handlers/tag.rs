use crate::cli::TagAction;
use crate::context::CliContext;
use crate::output;
use taskzen_domain::{BoardOps, NewTag, TagPatch};

pub async fn handle(ctx: &mut CliContext, action: TagAction) -> anyhow::Result<()> {
    match action {
        TagAction::Add { name, color } => {
            let id = ctx.store.add_tag(NewTag { name, color })?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().tags[&id]);
        }
        TagAction::Edit { id, name, color } => {
            ctx.store.edit_tag(&id, TagPatch { name, color })?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().tags[&id]);
        }
        TagAction::Delete { id } => {
            ctx.store.delete_tag(&id)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
        TagAction::List => {
            let tags: Vec<_> = ctx.store.board().tags.values().cloned().collect();
            output::output_list(tags);
        }
    }
    Ok(())
}
