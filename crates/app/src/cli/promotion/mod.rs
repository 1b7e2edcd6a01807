use clap::{Args, Subcommand};
use jiff::Timestamp;
use storefront::{
    money::StoreCurrency,
    promotions::{Promotion, PromotionDiscount},
};

mod list;
mod show;
mod validate;

#[derive(Debug, Args)]
pub(crate) struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    /// List every live promotion with its current status
    List(list::ListPromotionsArgs),

    /// Show a single promotion by code
    Show(show::ShowPromotionArgs),

    /// Check a code against an order without redeeming it
    Validate(validate::ValidatePromotionArgs),
}

pub(crate) async fn run(command: PromotionCommand) -> Result<(), String> {
    match command.command {
        PromotionSubcommand::List(args) => list::run(args).await,
        PromotionSubcommand::Show(args) => show::run(args).await,
        PromotionSubcommand::Validate(args) => validate::run(args).await,
    }
}

fn describe_discount(discount: &PromotionDiscount, currency: &StoreCurrency) -> String {
    match discount {
        PromotionDiscount::PercentageOff {
            percentage,
            max_discount: Some(cap),
        } => format!("{percentage}% off, up to {}", currency.format(*cap)),
        PromotionDiscount::PercentageOff {
            percentage,
            max_discount: None,
        } => format!("{percentage}% off"),
        PromotionDiscount::AmountOff { amount } => format!("{} off", currency.format(*amount)),
        PromotionDiscount::ShippingOff { amount } => {
            format!("{} off shipping", currency.format(*amount))
        }
    }
}

fn describe_usage(promotion: &Promotion) -> String {
    if promotion.max_uses == 0 {
        format!("{} / unlimited", promotion.used_count)
    } else {
        format!("{} / {}", promotion.used_count, promotion.max_uses)
    }
}

fn describe_window(starts_at: Option<Timestamp>, ends_at: Option<Timestamp>) -> String {
    let bound = |value: Option<Timestamp>| value.map_or_else(|| "open".to_string(), |ts| ts.to_string());

    format!("{} .. {}", bound(starts_at), bound(ends_at))
}
