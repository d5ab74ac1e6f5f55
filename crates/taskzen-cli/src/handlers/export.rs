use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use taskzen_domain::search::total_card_count;
use taskzen_domain::BoardOps;
use tokio::io::AsyncReadExt;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let document = ctx.store.export_json()?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &document).await?;
            output::output_success(serde_json::json!({
                "exported": path.display().to_string(),
                "bytes": document.len(),
            }));
        }
        None => {
            // The document itself is the output, pipeable straight into import.
            println!("{}", document);
        }
    }
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let data = match args.input {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    ctx.store.import_json(&data)?;
    ctx.save().await?;

    output::output_success(serde_json::json!({
        "imported": true,
        "cards": total_card_count(ctx.store.board()),
        "tags": ctx.store.board().tags.len(),
    }));
    Ok(())
}
