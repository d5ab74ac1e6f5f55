use crate::cli::{CardAction, CardAddArgs, CardEditArgs, CardListArgs};
use crate::context::CliContext;
use crate::output;
use taskzen_domain::search::{cards_in_column, CardMatcher, TextMatcher};
use taskzen_domain::{BoardOps, Card, CardPatch, ColumnId, FieldUpdate, NewCard};

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add(args) => {
            let id = ctx.store.add_card(args.column, build_new_card(args))?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Edit(args) => {
            let id = args.id.clone();
            ctx.store.edit_card(&id, build_patch(args))?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Delete { id } => {
            ctx.store.delete_card(&id)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
        CardAction::Archive { id } => {
            ctx.store.archive_card(&id)?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Restore { id } => {
            ctx.store.restore_card(&id)?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Move { id, to, index } => {
            ctx.store.move_card(&id, to, index)?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Reorder { column, id, index } => {
            ctx.store.reorder_card(column, &id, index)?;
            ctx.save().await?;
            output::output_success(serde_json::json!({
                "column": column.to_string(),
                "cardOrder": ctx.store.board().columns.get(column).card_order,
            }));
        }
        CardAction::List(args) => {
            let cards = list_cards(ctx, &args);
            output::output_list(cards);
        }
        CardAction::Get { id } => match ctx.store.board().cards.get(&id) {
            Some(card) => output::output_success(card),
            None => output::output_error(&format!("Card not found: {}", id)),
        },
        CardAction::Tag { id, tag_id } => {
            ctx.store.add_card_tag(&id, &tag_id)?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
        CardAction::Untag { id, tag_id } => {
            ctx.store.remove_card_tag(&id, &tag_id)?;
            ctx.save().await?;
            output::output_success(&ctx.store.board().cards[&id]);
        }
    }
    Ok(())
}

fn build_new_card(args: CardAddArgs) -> NewCard {
    NewCard {
        title: args.title,
        description: args.description,
        tags: args.tags,
    }
}

fn build_patch(args: CardEditArgs) -> CardPatch {
    let description = if args.clear_description {
        FieldUpdate::Clear
    } else {
        args.description
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };
    CardPatch {
        title: args.title,
        description,
        tags: args.tags,
    }
}

fn list_cards(ctx: &CliContext, args: &CardListArgs) -> Vec<Card> {
    let board = ctx.store.board();

    let base: Vec<&Card> = if args.archived {
        cards_in_column(board, ColumnId::Archive)
    } else if let Some(column) = args.column {
        cards_in_column(board, column)
    } else {
        ColumnId::CORE
            .into_iter()
            .flat_map(|column| cards_in_column(board, column))
            .collect()
    };

    match &args.query {
        Some(query) if !query.trim().is_empty() => {
            let matcher = TextMatcher::new(query.clone());
            base.into_iter()
                .filter(|card| matcher.matches(card))
                .cloned()
                .collect()
        }
        _ => base.into_iter().cloned().collect(),
    }
}
