use clap::Args;
use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};

use crate::cli::{
    ConnectionArgs,
    promotion::{describe_discount, describe_usage, describe_window},
};

#[derive(Debug, Args)]
pub(crate) struct ListPromotionsArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
}

pub(crate) async fn run(args: ListPromotionsArgs) -> Result<(), String> {
    let context = args.connection.connect().await?;

    let records = context
        .promotions
        .list_promotions()
        .await
        .map_err(|error| format!("failed to list promotions: {error}"))?;

    if records.is_empty() {
        println!("no promotions found");
        return Ok(());
    }

    let now = Timestamp::now();

    let mut builder = Builder::default();

    builder.push_record(["Code", "Discount", "Members", "Status", "Used", "Window"]);

    for record in &records {
        let promotion = &record.promotion;

        builder.push_record([
            promotion.code.to_string(),
            describe_discount(&promotion.discount, &context.currency),
            promotion
                .membership
                .map_or_else(|| "anyone".to_string(), |tier| tier.to_string()),
            promotion.status_at(now).to_string(),
            describe_usage(promotion),
            describe_window(promotion.starts_at, promotion.ends_at),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    println!("{table}");

    Ok(())
}
