use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use taskzen_domain::search::{card_count, total_card_count};
use taskzen_domain::{BoardOps, ColumnId};

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show => {
            output::output_success(ctx.store.board());
        }
        BoardAction::Clear => {
            ctx.store.clear_all()?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"cleared": true}));
        }
        BoardAction::Counts => {
            let board = ctx.store.board();
            let mut counts = serde_json::Map::new();
            for column in ColumnId::ALL {
                counts.insert(
                    column.to_string(),
                    serde_json::json!(card_count(board, column)),
                );
            }
            counts.insert(
                "total".to_string(),
                serde_json::json!(total_card_count(board)),
            );
            output::output_success(serde_json::Value::Object(counts));
        }
    }
    Ok(())
}
