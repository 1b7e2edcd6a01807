use clap::Args;
use jiff::Timestamp;

use crate::cli::{
    ConnectionArgs,
    promotion::{describe_discount, describe_usage, describe_window},
};

#[derive(Debug, Args)]
pub(crate) struct ShowPromotionArgs {
    /// Promotion code, any case
    code: String,

    #[command(flatten)]
    connection: ConnectionArgs,
}

pub(crate) async fn run(args: ShowPromotionArgs) -> Result<(), String> {
    let context = args.connection.connect().await?;

    let record = context
        .promotions
        .get_promotion_by_code(args.code)
        .await
        .map_err(|error| format!("failed to get promotion: {error}"))?;

    let promotion = &record.promotion;
    let currency = &context.currency;

    println!("promotion_uuid: {}", promotion.uuid);
    println!("code: {}", promotion.code);
    println!("discount: {}", describe_discount(&promotion.discount, currency));
    println!(
        "membership: {}",
        promotion
            .membership
            .map_or_else(|| "anyone".to_string(), |tier| tier.to_string())
    );
    println!(
        "min_order_value: {}",
        currency.format(promotion.min_order_value)
    );
    println!("used: {}", describe_usage(promotion));
    println!(
        "window: {}",
        describe_window(promotion.starts_at, promotion.ends_at)
    );
    println!("is_active: {}", promotion.is_active);
    println!("status: {}", promotion.status_at(Timestamp::now()));

    if promotion.is_product_restricted() {
        println!("applicable_products:");

        for product in promotion.applicable_products.to_sorted_vec() {
            println!("  {product}");
        }
    } else {
        println!("applicable_products: all");
    }

    println!("created_at: {}", record.created_at);
    println!("updated_at: {}", record.updated_at);

    Ok(())
}
