use crate::cli::ProfileAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &mut CliContext, action: ProfileAction) -> anyhow::Result<()> {
    match action {
        ProfileAction::Create { name } => {
            let profile = ctx.create_profile(&name).await?;
            output::output_success(&profile);
        }
        ProfileAction::List => {
            let active = ctx.active_profile().map(|p| p.id);
            let profiles: Vec<_> = ctx
                .profiles()
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "name": p.name,
                        "slug": p.slug,
                        "lastAccessed": p.last_accessed,
                        "active": Some(p.id) == active,
                    })
                })
                .collect();
            output::output_list(profiles);
        }
        ProfileAction::Switch { id } => {
            let profile = ctx.switch_profile(id).await?;
            output::output_success(&profile);
        }
        ProfileAction::Rename { id, name } => {
            let profile = ctx.rename_profile(id, &name).await?;
            output::output_success(&profile);
        }
        ProfileAction::Delete { id } => {
            let removed = ctx.delete_profile(id).await?;
            output::output_success(serde_json::json!({"deleted": removed.slug}));
        }
    }
    Ok(())
}
