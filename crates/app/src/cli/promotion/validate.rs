use clap::Args;
use jiff::Timestamp;
use storefront::{
    membership::CustomerUuid,
    products::{ItemRef, LineItem, ProductUuid, VariantUuid},
    promotions::evaluation::Validation,
};
use storefront_app::domain::promotions::data::ValidatePromotion;

use crate::cli::ConnectionArgs;

#[derive(Debug, Args)]
pub(crate) struct ValidatePromotionArgs {
    /// Code as a customer would type it
    #[arg(long)]
    code: String,

    /// Order total in minor units
    #[arg(long)]
    total: u64,

    /// Signed-in customer UUID; anonymous when omitted
    #[arg(long)]
    customer: Option<CustomerUuid>,

    /// Variant in the order (repeatable)
    #[arg(long = "variant")]
    variants: Vec<VariantUuid>,

    /// Product in the order (repeatable)
    #[arg(long = "product")]
    products: Vec<ProductUuid>,

    /// Evaluate as of this instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

pub(crate) async fn run(args: ValidatePromotionArgs) -> Result<(), String> {
    let context = args.connection.connect().await?;

    let items = args
        .variants
        .into_iter()
        .map(ItemRef::Variant)
        .chain(args.products.into_iter().map(ItemRef::Product))
        .map(|item| LineItem { item, quantity: 1 })
        .collect();

    let validation = context
        .promotions
        .validate_promotion(
            ValidatePromotion {
                code: args.code,
                order_total: args.total,
                customer: args.customer,
                items,
            },
            args.at.unwrap_or_else(Timestamp::now),
        )
        .await
        .map_err(|error| format!("failed to validate promotion: {error}"))?;

    let currency = &context.currency;

    match validation {
        Validation::Eligible(applied) => {
            println!("eligible: true");
            println!("promotion_uuid: {}", applied.promotion);
            println!("discount_type: {}", applied.kind.as_str());
            println!("discount_amount: {}", currency.format(applied.discount_amount));
            println!(
                "shipping_discount: {}",
                currency.format(applied.shipping_discount)
            );
        }
        Validation::Ineligible(reason) => {
            println!("eligible: false");
            println!("reason: {}", reason.reason());
            println!("message: {}", reason.message(currency));
        }
    }

    Ok(())
}
